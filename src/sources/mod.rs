// src/sources/mod.rs
pub mod document;
pub mod sheet;

use std::path::Path;

use crate::utils::error::SourceError;
pub use document::DocumentSource;
pub use sheet::SheetSource;

/// Header of the description column in source spreadsheets.
pub const DEFAULT_DESCRIPTION_COLUMN: &str = "Наименование позиции";

/// One input row's description cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Description {
    Text(String),
    /// Absent or whitespace-only; the row produces no record.
    Blank,
    /// The cell holds something that is not text, e.g. a spreadsheet error value.
    Unreadable(String),
}

impl Description {
    /// Classifies a raw text value: whitespace-only text is `Blank`.
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.trim().is_empty() {
            Self::Blank
        } else {
            Self::Text(text)
        }
    }
}

/// Anything that yields product descriptions in row order.
///
/// The input is fully loaded when the source is opened, so iteration cannot
/// fail and each call to `descriptions` starts again from the first row.
pub trait DescriptionSource {
    /// Human-readable origin, used in logs and run metadata.
    fn label(&self) -> String;

    fn descriptions(&self) -> Box<dyn Iterator<Item = Description> + '_>;
}

/// Opens `path` with the adapter matching its extension.
pub fn open_source(path: &Path, column: &str) -> Result<Box<dyn DescriptionSource>, SourceError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "xlsx" => Ok(Box::new(SheetSource::open(path, column)?)),
        "docx" => Ok(Box::new(DocumentSource::open(path)?)),
        _ => Err(SourceError::UnsupportedFormat(path.display().to_string())),
    }
}
