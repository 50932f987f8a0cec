// src/utils/error.rs
use thiserror::Error;

// Define specific error types for different parts of the application
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Unsupported input format: {0} (only Excel .xlsx and Word .docx files are supported)")]
    UnsupportedFormat(String),

    #[error("Column '{column}' not found in the input file (available: {available:?})")]
    MissingColumn {
        column: String,
        available: Vec<String>,
    },

    #[error("Workbook has no worksheets")]
    NoWorksheet,

    #[error("Failed to read workbook: {0}")]
    Workbook(#[from] calamine::XlsxError),

    #[error("Failed to open document archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("Failed to parse document XML: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to write workbook: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Unsupported output format: {0} (use .xlsx or .csv)")]
    UnsupportedFormat(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Could not read input: {0}")]
    Source(#[from] SourceError),

    #[error("Could not write report: {0}")]
    Storage(#[from] StorageError),
}
