mod delimited;
mod errors;
mod json_file;
mod spreadsheet;
#[cfg(test)]
mod tests;

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use tracing::{error, info};

use crate::models::RawRecord;
use crate::sources::delimited::CsvFileSource;
use crate::sources::errors::SourceError;
use crate::sources::json_file::JsonFileSource;
use crate::sources::spreadsheet::XlsxFileSource;

/// Where raw transaction rows come from.
///
/// `read` reports why a source could not be used. `load` is the boundary the
/// pipeline sees: it either gets rows or gets nothing.
pub trait TransactionSource {
    fn describe(&self) -> String;
    fn read(&self) -> Result<Vec<RawRecord>, SourceError>;

    fn load(&self) -> Vec<RawRecord> {
        match self.read() {
            Ok(records) => {
                info!("Loaded {} record(s) from {}", records.len(), self.describe());
                records
            }
            Err(error) => {
                error!("Could not read {}: {error}", self.describe());
                Vec::new()
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SourceKind {
    Json,
    Csv,
    Xlsx
}

impl SourceKind {
    pub fn default_path(&self) -> PathBuf {
        match self {
            SourceKind::Json => PathBuf::from("data/operations.json"),
            SourceKind::Csv => PathBuf::from("data/transactions.csv"),
            SourceKind::Xlsx => PathBuf::from("data/transactions_excel.xlsx")
        }
    }

    /// Infers the source kind from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_lowercase();

        match extension.as_str() {
            "json" => Some(SourceKind::Json),
            "csv" => Some(SourceKind::Csv),
            "xlsx" | "xls" | "xlsm" | "ods" => Some(SourceKind::Xlsx),
            _ => None
        }
    }

    /// Builds the adapter for this kind. `delimiter` only applies to CSV.
    pub fn open(&self, path: impl Into<PathBuf>, delimiter: Option<u8>) -> Box<dyn TransactionSource> {
        match self {
            SourceKind::Json => Box::new(JsonFileSource::new(path)),
            SourceKind::Csv => match delimiter {
                Some(delimiter) => Box::new(CsvFileSource::new(path).with_delimiter(delimiter)),
                None => Box::new(CsvFileSource::new(path))
            },
            SourceKind::Xlsx => Box::new(XlsxFileSource::new(path))
        }
    }
}
