use serde_json::{Map, Value, json};
use tracing::{info, warn};

use crate::models::errors::ConversionError;
use crate::models::raw::{RawKey, RawRecord};
use crate::models::Transaction;

/// Outcome of normalizing a whole ingested batch.
#[derive(Debug, Default)]
pub struct Normalized {
    pub records: Vec<Transaction>,
    pub skipped: usize
}

/// Coerces a raw row into a canonical [`Transaction`].
///
/// Keys are rendered as text. Tabular sources deliver the amount and currency
/// as flat columns, those are folded into the nested `operationAmount` shape
/// the JSON source uses so every later stage sees one layout.
pub fn normalize(raw: RawRecord) -> Result<Transaction, ConversionError> {
    let mut fields = Map::with_capacity(raw.fields.len());

    for (position, (key, value)) in raw.fields.into_iter().enumerate() {
        let key = coerce_key(&key, position)?;

        if fields.contains_key(&key) {
            return Err(ConversionError::DuplicateKey { key });
        }

        fields.insert(key, value);
    }

    nest_operation_amount(&mut fields);

    Ok(Transaction::from_fields(fields))
}

/// Normalizes every row, keeping the successes and counting the rest.
pub fn normalize_all(raws: Vec<RawRecord>) -> Normalized {
    let mut normalized = Normalized {
        records: Vec::with_capacity(raws.len()),
        skipped: 0
    };

    for (index, raw) in raws.into_iter().enumerate() {
        match normalize(raw) {
            Ok(record) => normalized.records.push(record),
            Err(error) => {
                warn!("Skipping record [{index}]: {error}");
                normalized.skipped += 1;
            }
        }
    }

    if normalized.skipped > 0 {
        warn!("Skipped {} record(s) that could not be normalized", normalized.skipped);
    }

    info!("Normalized {} record(s)", normalized.records.len());

    normalized
}

fn coerce_key(key: &RawKey, position: usize) -> Result<String, ConversionError> {
    match key {
        RawKey::Empty => Err(ConversionError::EmptyKey { position }),
        RawKey::Text(text) if text.is_empty() => Err(ConversionError::EmptyKey { position }),
        RawKey::Float(value) if !value.is_finite() => Err(ConversionError::NonFiniteKey { position }),
        other => Ok(other.to_string())
    }
}

fn nest_operation_amount(fields: &mut Map<String, Value>) {
    if fields.contains_key("operationAmount") {
        return;
    }

    if !fields.contains_key("amount") || !fields.contains_key("currency_code") {
        return;
    }

    let amount = fields.remove("amount").unwrap_or(Value::Null);
    let code = fields.remove("currency_code").unwrap_or(Value::Null);
    let name = fields.remove("currency_name").unwrap_or(Value::Null);

    fields.insert("operationAmount".to_string(), json!({
        "amount": amount,
        "currency": {
            "name": name,
            "code": code
        }
    }));
}
