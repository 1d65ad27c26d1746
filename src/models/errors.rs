use thiserror::Error;

/// Failure to read a field a pipeline stage depends on.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("Record is missing required field [{field}]")]
    MissingField {
        field: &'static str
    },
    #[error("Record field [{field}] is not a {expected}")]
    InvalidFieldType {
        field: &'static str,
        expected: &'static str
    }
}

impl RecordError {
    pub fn missing(field: &'static str) -> Self {
        Self::MissingField { field }
    }

    pub fn invalid(field: &'static str, expected: &'static str) -> Self {
        Self::InvalidFieldType { field, expected }
    }
}

/// Failure to coerce an ingested row into the canonical string-keyed shape.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConversionError {
    #[error("Record is not a mapping of fields")]
    NotAnObject,
    #[error("Column [{position}] has an empty key")]
    EmptyKey {
        position: usize
    },
    #[error("Column [{position}] has a non-finite numeric key")]
    NonFiniteKey {
        position: usize
    },
    #[error("Key [{key}] appears more than once after coercion to text")]
    DuplicateKey {
        key: String
    }
}
