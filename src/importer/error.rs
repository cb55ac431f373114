// ==========================================
// Breather Advisor - Importer Error Types
// ==========================================
// thiserror derive, one variant per failure family. Catalog schema
// problems fail loudly; survey data problems degrade at the field
// level and are logged instead.
// ==========================================

use thiserror::Error;

/// Importer error type.
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== File errors =====
    #[error("file not found: {0}")]
    FileNotFound(String),

    #[error("unsupported file format: {0} (only .xlsx/.xls/.csv)")]
    UnsupportedFormat(String),

    #[error("file read failed: {0}")]
    FileReadError(String),

    #[error("Excel parse failed: {0}")]
    ExcelParseError(String),

    #[error("CSV parse failed: {0}")]
    CsvParseError(String),

    // ===== Schema errors =====
    #[error("required column missing in {file}: {column}")]
    MissingColumn { file: String, column: String },

    #[error("type conversion failed (row {row}, column {column}): {message}")]
    TypeConversionError {
        row: usize,
        column: String,
        message: String,
    },

    #[error("file contains no data rows: {0}")]
    EmptyFile(String),

    // ===== General =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

/// Result type alias.
pub type ImportResult<T> = Result<T, ImportError>;
