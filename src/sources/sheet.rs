// src/sources/sheet.rs
use std::path::{Path, PathBuf};

use calamine::{open_workbook, Data, Reader, Xlsx};

use crate::sources::{Description, DescriptionSource};
use crate::utils::error::SourceError;

/// Description column of the first worksheet of an `.xlsx` workbook.
#[derive(Debug)]
pub struct SheetSource {
    path: PathBuf,
    column: String,
    cells: Vec<Description>,
}

impl SheetSource {
    /// Reads the first worksheet. The first row is the header; header names are
    /// compared after trimming surrounding whitespace.
    pub fn open(path: &Path, column: &str) -> Result<Self, SourceError> {
        tracing::info!("Reading workbook: {}", path.display());
        let mut workbook: Xlsx<_> = open_workbook(path)?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or(SourceError::NoWorksheet)??;

        let mut rows = range.rows();
        let headers: Vec<String> = rows
            .next()
            .map(|row| row.iter().map(|cell| cell.to_string().trim().to_string()).collect())
            .unwrap_or_default();

        let index = headers
            .iter()
            .position(|header| header == column)
            .ok_or_else(|| SourceError::MissingColumn {
                column: column.to_string(),
                available: headers.iter().filter(|h| !h.is_empty()).cloned().collect(),
            })?;
        tracing::debug!("Description column '{}' found at index {}", column, index);

        let cells: Vec<Description> = rows.map(|row| describe_cell(row.get(index))).collect();
        tracing::info!("Loaded {} rows from {}", cells.len(), path.display());

        Ok(Self {
            path: path.to_path_buf(),
            column: column.to_string(),
            cells,
        })
    }
}

impl DescriptionSource for SheetSource {
    fn label(&self) -> String {
        format!("{} [{}]", self.path.display(), self.column)
    }

    fn descriptions(&self) -> Box<dyn Iterator<Item = Description> + '_> {
        Box::new(self.cells.iter().cloned())
    }
}

fn describe_cell(cell: Option<&Data>) -> Description {
    match cell {
        None | Some(Data::Empty) => Description::Blank,
        Some(Data::Error(err)) => Description::Unreadable(format!("cell error {}", err)),
        Some(Data::String(text)) => Description::from_text(text.as_str()),
        Some(other) => Description::from_text(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::CellErrorType;
    use rust_xlsxwriter::Workbook;

    fn write_sheet(path: &Path, header: &str, cells: &[Option<&str>]) {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.write_string(0, 0, "Артикул").unwrap();
        worksheet.write_string(0, 1, header).unwrap();
        for (i, cell) in cells.iter().enumerate() {
            let row = i as u32 + 1;
            worksheet.write_number(row, 0, row as f64).unwrap();
            if let Some(text) = cell {
                worksheet.write_string(row, 1, *text).unwrap();
            }
        }
        workbook.save(path).unwrap();
    }

    #[test]
    fn test_reads_description_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.xlsx");
        write_sheet(
            &path,
            "  Наименование позиции ",
            &[Some("Светильник РИСТ-200, мощность: 50 Вт"), None, Some("   "), Some("IP54")],
        );

        let source = SheetSource::open(&path, "Наименование позиции").unwrap();
        let cells: Vec<Description> = source.descriptions().collect();
        assert_eq!(
            cells,
            vec![
                Description::Text("Светильник РИСТ-200, мощность: 50 Вт".to_string()),
                Description::Blank,
                Description::Blank,
                Description::Text("IP54".to_string()),
            ]
        );
        // Restartable
        assert_eq!(source.descriptions().count(), 4);
        assert!(source.label().contains("Наименование позиции"));
    }

    #[test]
    fn test_missing_column_lists_headers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.xlsx");
        write_sheet(&path, "Описание", &[Some("мощность 5 Вт")]);

        match SheetSource::open(&path, "Наименование позиции") {
            Err(SourceError::MissingColumn { column, available }) => {
                assert_eq!(column, "Наименование позиции");
                assert_eq!(available, vec!["Артикул".to_string(), "Описание".to_string()]);
            }
            other => panic!("expected MissingColumn, got {:?}", other),
        }
    }

    #[test]
    fn test_cell_classification() {
        assert_eq!(describe_cell(None), Description::Blank);
        assert_eq!(describe_cell(Some(&Data::Empty)), Description::Blank);
        assert_eq!(
            describe_cell(Some(&Data::Float(42.0))),
            Description::Text("42".to_string())
        );
        assert_eq!(
            describe_cell(Some(&Data::Error(CellErrorType::NA))),
            Description::Unreadable("cell error #N/A".to_string())
        );
    }
}
