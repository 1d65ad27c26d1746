use std::path::PathBuf;

use calamine::{open_workbook_auto, Data, Range, Reader};
use serde_json::{Number, Value};

use crate::models::{RawKey, RawRecord};
use crate::sources::errors::SourceError;
use crate::sources::TransactionSource;

/// The first worksheet of a spreadsheet, header in the first row.
pub struct XlsxFileSource {
    path: PathBuf
}

impl XlsxFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TransactionSource for XlsxFileSource {
    fn describe(&self) -> String {
        format!("spreadsheet [{}]", self.path.display())
    }

    fn read(&self) -> Result<Vec<RawRecord>, SourceError> {
        let mut workbook = open_workbook_auto(&self.path)?;
        let range = workbook.worksheet_range_at(0).ok_or(SourceError::NoWorksheet)??;

        Ok(parse_range(&range))
    }
}

pub(crate) fn parse_range(range: &Range<Data>) -> Vec<RawRecord> {
    let mut rows = range.rows();

    let Some(header) = rows.next() else {
        return Vec::new();
    };

    let keys: Vec<RawKey> = header.iter().map(header_key).collect();

    rows.filter(|row| row.iter().any(|cell| !matches!(cell, Data::Empty)))
        .map(|row| keys.iter().cloned().zip(row.iter().map(cell_value)).collect())
        .collect()
}

fn header_key(cell: &Data) -> RawKey {
    match cell {
        Data::String(text) => RawKey::from(text.as_str()),
        Data::Int(value) => RawKey::Integer(*value),
        Data::Float(value) => RawKey::Float(*value),
        Data::Bool(value) => RawKey::Bool(*value),
        Data::Empty => RawKey::Empty,
        other => RawKey::Text(other.to_string())
    }
}

fn cell_value(cell: &Data) -> Value {
    match cell {
        Data::Empty => Value::Null,
        Data::String(text) if text.is_empty() => Value::Null,
        Data::String(text) => Value::String(text.clone()),
        Data::Int(value) => Value::from(*value),
        Data::Float(value) => float_value(*value),
        Data::Bool(value) => Value::Bool(*value),
        other => Value::String(other.to_string())
    }
}

//NOTE: Spreadsheets store every number as a float, whole values are read back as integers
fn float_value(value: f64) -> Value {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        return Value::from(value as i64);
    }

    Number::from_f64(value).map(Value::Number).unwrap_or(Value::Null)
}
