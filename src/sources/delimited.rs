use std::fs::File;
use std::io::{BufReader, Read};
use std::path::PathBuf;

use csv::{ReaderBuilder, Trim};
use serde_json::Value;
use tracing::{error, warn};

use crate::models::{RawKey, RawRecord};
use crate::sources::errors::SourceError;
use crate::sources::TransactionSource;

const DEFAULT_DELIMITER: u8 = b';';

/// A delimited text file with a header row. Bank exports use `;` by default.
pub struct CsvFileSource {
    path: PathBuf,
    delimiter: u8
}

impl CsvFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            delimiter: DEFAULT_DELIMITER
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

impl TransactionSource for CsvFileSource {
    fn describe(&self) -> String {
        format!("CSV file [{}]", self.path.display())
    }

    fn read(&self) -> Result<Vec<RawRecord>, SourceError> {
        let file = File::open(&self.path).map_err(|error| SourceError::io(&self.path, error))?;

        parse_delimited(BufReader::new(file), self.delimiter)
    }
}

pub(crate) fn parse_delimited<R: Read>(input: R, delimiter: u8) -> Result<Vec<RawRecord>, SourceError> {
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(Trim::All)
        .flexible(true)
        .from_reader(input);

    let headers = reader.headers()?.clone();
    let mut records = Vec::new();
    let mut malformed = 0usize;

    for result in reader.records() {
        let row = match result {
            Ok(row) => row,
            Err(error) => {
                error!("CSV row error: {error}");
                malformed += 1;
                continue;
            }
        };

        let record: RawRecord = headers.iter()
            .enumerate()
            .map(|(index, header)| {
                let value = match row.get(index) {
                    Some(cell) if !cell.is_empty() => Value::String(cell.to_string()),
                    _ => Value::Null
                };

                (RawKey::from(header), value)
            })
            .collect();

        records.push(record);
    }

    if malformed > 0 {
        warn!("Skipped {malformed} malformed CSV row(s)");
    }

    Ok(records)
}
