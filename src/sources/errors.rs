use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Source file [{path}] could not be read: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error
    },
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("Invalid spreadsheet: {0}")]
    Spreadsheet(#[from] calamine::Error),
    #[error("Spreadsheet has no worksheets")]
    NoWorksheet,
    #[error("Expected {expected} but found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str
    }
}

impl SourceError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}
