// src/storage/mod.rs
use std::fs;
use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Format, Workbook};

use crate::pipeline::{OutputTable, RunSummary};
use crate::utils::error::StorageError;

const SHEET_NAME: &str = "Форма 2";
// Extra characters added to the widest value of a column
const COLUMN_WIDTH_PADDING: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReportFormat {
    Xlsx,
    Csv,
}

pub struct ReportWriter {
    output: PathBuf,
    format: ReportFormat,
}

impl ReportWriter {
    /// Creates a writer for `output`. The format comes from the file extension
    /// (`.xlsx` or `.csv`); the parent directory is created if it doesn't exist.
    pub fn new<P: AsRef<Path>>(output: P) -> Result<Self, StorageError> {
        let output = output.as_ref().to_path_buf();
        let format = match output
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .as_deref()
        {
            Some("xlsx") => ReportFormat::Xlsx,
            Some("csv") => ReportFormat::Csv,
            _ => return Err(StorageError::UnsupportedFormat(output.display().to_string())),
        };

        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(StorageError::Io)?;
            }
        }

        Ok(Self { output, format })
    }

    /// Writes the whole table: a header row with the schema columns, then one row
    /// per record. Absent values are written as empty cells.
    pub fn save_table(&self, table: &OutputTable) -> Result<PathBuf, StorageError> {
        match self.format {
            ReportFormat::Xlsx => self.write_xlsx(table)?,
            ReportFormat::Csv => self.write_csv(table)?,
        }
        tracing::info!("Saved {} records to {}", table.len(), self.output.display());
        Ok(self.output.clone())
    }

    /// Saves run metadata next to the report as `<output>.meta.json`.
    pub fn save_metadata(
        &self,
        table: &OutputTable,
        summary: &RunSummary,
        source: &str,
    ) -> Result<PathBuf, StorageError> {
        let mut file_name = self
            .output
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        file_name.push(".meta.json");
        let file_path = self.output.with_file_name(file_name);

        let metadata = serde_json::json!({
            "source": source,
            "output": self.output.display().to_string(),
            "summary": summary,
            "columns": table.schema().columns(),
            "extraction_timestamp": chrono::Utc::now().to_rfc3339(),
        });

        let metadata_str = serde_json::to_string_pretty(&metadata)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        fs::write(&file_path, metadata_str).map_err(StorageError::Io)?;

        tracing::info!("Saved metadata to {}", file_path.display());
        Ok(file_path)
    }

    fn write_xlsx(&self, table: &OutputTable) -> Result<(), StorageError> {
        let mut workbook = Workbook::new();
        let header_format = Format::new().set_bold();
        // Blanks with the default format are not written; empty records need a formatted blank
        let blank_format = Format::new().set_text_wrap();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(SHEET_NAME)?;

        for (col, name) in table.schema().columns().iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, name, &header_format)?;
        }

        for (i, record) in table.records().iter().enumerate() {
            let row = i as u32 + 1;
            for (col, value) in record.values().iter().enumerate() {
                match value {
                    Some(value) => worksheet.write_string(row, col as u16, value)?,
                    None => worksheet.write_blank(row, col as u16, &blank_format)?,
                };
            }
        }

        // Widths are cosmetic; a failure here must not lose the report
        for (col, width) in column_widths(table).into_iter().enumerate() {
            if let Err(e) = worksheet.set_column_width(col as u16, width) {
                tracing::warn!("Failed to set width of column {}: {}", col, e);
            }
        }

        workbook.save(&self.output)?;
        Ok(())
    }

    fn write_csv(&self, table: &OutputTable) -> Result<(), StorageError> {
        let mut writer = csv::Writer::from_path(&self.output)?;
        writer.write_record(table.schema().columns())?;
        for record in table.records() {
            writer.write_record(record.values().iter().map(|v| v.as_deref().unwrap_or("")))?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// Width per column: the longest of header and values, in characters, plus padding.
fn column_widths(table: &OutputTable) -> Vec<f64> {
    table
        .schema()
        .columns()
        .iter()
        .enumerate()
        .map(|(col, header)| {
            let widest = table
                .records()
                .iter()
                .filter_map(|record| record.get(col))
                .map(|value| value.chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0);
            (widest + COLUMN_WIDTH_PADDING) as f64
        })
        .collect()
}
