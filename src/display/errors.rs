use thiserror::Error;

use crate::models::RecordError;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MaskError {
    #[error("Card number must be 16 digits")]
    InvalidCardNumber,
    #[error("Account number must be 20 digits")]
    InvalidAccountNumber,
    #[error("[{0}] does not end in a card or account number")]
    Unrecognized(String)
}

#[derive(Debug, Error)]
pub enum ConversionFailure {
    #[error("Currency conversion is not configured")]
    NotConfigured,
    #[error(transparent)]
    Record(#[from] RecordError),
    #[error("Exchange rate request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Exchange rate service answered with status {0}")]
    Status(u16)
}
