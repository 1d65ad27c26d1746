use serde_json::Value;
use std::fmt;
use std::fmt::{Display, Formatter};

/// A field name as delivered by an ingestion adapter, before coercion to text.
///
/// Spreadsheet header cells keep their cell type, so a header row may hold
/// numbers, booleans or blanks next to ordinary text.
#[derive(Debug, Clone, PartialEq)]
pub enum RawKey {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Empty
}

impl Display for RawKey {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            RawKey::Text(text) => formatter.write_str(text),
            RawKey::Integer(value) => write!(formatter, "{value}"),
            RawKey::Float(value) => write!(formatter, "{value}"),
            RawKey::Bool(value) => write!(formatter, "{value}"),
            RawKey::Empty => Ok(())
        }
    }
}

impl From<&str> for RawKey {
    fn from(value: &str) -> Self {
        if value.is_empty() {
            RawKey::Empty
        } else {
            RawKey::Text(value.to_string())
        }
    }
}

/// One ingested row: ordered `(key, value)` pairs exactly as the source produced them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    pub fields: Vec<(RawKey, Value)>
}

impl FromIterator<(RawKey, Value)> for RawRecord {
    fn from_iter<I: IntoIterator<Item = (RawKey, Value)>>(iter: I) -> Self {
        Self { fields: iter.into_iter().collect() }
    }
}
