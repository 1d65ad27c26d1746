use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use serde_json::Value;
use tracing::warn;

use crate::models::{RawKey, RawRecord};
use crate::sources::errors::SourceError;
use crate::sources::TransactionSource;

/// A JSON document holding a top-level array of record objects.
pub struct JsonFileSource {
    path: PathBuf
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TransactionSource for JsonFileSource {
    fn describe(&self) -> String {
        format!("JSON file [{}]", self.path.display())
    }

    fn read(&self) -> Result<Vec<RawRecord>, SourceError> {
        let file = File::open(&self.path).map_err(|error| SourceError::io(&self.path, error))?;
        let document: Value = serde_json::from_reader(BufReader::new(file))?;

        parse_document(document)
    }
}

pub(crate) fn parse_document(document: Value) -> Result<Vec<RawRecord>, SourceError> {
    let Value::Array(items) = document else {
        return Err(SourceError::TypeMismatch {
            expected: "an array of records",
            found: kind_of(&document)
        });
    };

    let total = items.len();
    let records: Vec<RawRecord> = items.into_iter()
        .filter_map(|item| match item {
            Value::Object(fields) => Some(fields.into_iter()
                .map(|(key, value)| (RawKey::from(key.as_str()), value))
                .collect()),
            _ => None
        })
        .collect();

    if records.len() < total {
        warn!("Skipped {} element(s) that are not records", total - records.len());
    }

    Ok(records)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object"
    }
}
