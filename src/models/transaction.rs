use serde_json::{Map, Value};

use crate::models::errors::{ConversionError, RecordError};

/// A single transaction: a mapping from string field names to JSON values.
///
/// Records are never mutated once built. Every pipeline stage reads them
/// through the accessors below and produces a new collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transaction {
    fields: Map<String, Value>
}

impl Transaction {
    pub fn from_fields(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Lifecycle status, or `None` when absent or not text.
    pub fn state(&self) -> Option<&str> {
        self.get("state").and_then(Value::as_str)
    }

    /// The raw timestamp text used for chronological ordering.
    pub fn date(&self) -> Result<&str, RecordError> {
        self.get("date")
            .ok_or_else(|| RecordError::missing("date"))?
            .as_str()
            .ok_or_else(|| RecordError::invalid("date", "string"))
    }

    pub fn description(&self) -> Option<&str> {
        self.get("description").and_then(Value::as_str)
    }

    /// Resolves `operationAmount.currency.code`, naming the first missing segment.
    pub fn currency_code(&self) -> Result<&str, RecordError> {
        self.operation_amount()?
            .get("currency")
            .ok_or_else(|| RecordError::missing("operationAmount.currency"))?
            .get("code")
            .ok_or_else(|| RecordError::missing("operationAmount.currency.code"))?
            .as_str()
            .ok_or_else(|| RecordError::invalid("operationAmount.currency.code", "string"))
    }

    /// Transaction quantity as text; numeric amounts are rendered as written.
    pub fn amount(&self) -> Result<String, RecordError> {
        match self.operation_amount()?.get("amount") {
            Some(Value::String(amount)) => Ok(amount.clone()),
            Some(Value::Number(amount)) => Ok(amount.to_string()),
            Some(_) => Err(RecordError::invalid("operationAmount.amount", "string or number")),
            None => Err(RecordError::missing("operationAmount.amount"))
        }
    }

    pub fn from_account(&self) -> Option<&str> {
        self.get("from").and_then(Value::as_str)
    }

    pub fn to_account(&self) -> Option<&str> {
        self.get("to").and_then(Value::as_str)
    }

    fn operation_amount(&self) -> Result<&Value, RecordError> {
        self.get("operationAmount")
            .filter(|value| value.is_object())
            .ok_or_else(|| RecordError::missing("operationAmount"))
    }
}

impl TryFrom<Value> for Transaction {
    type Error = ConversionError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(fields) => Ok(Self::from_fields(fields)),
            _ => Err(ConversionError::NotAnObject)
        }
    }
}
