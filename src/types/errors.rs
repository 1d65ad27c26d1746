use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StatusError {
    #[error("Status '{0}' is not available, expected one of: EXECUTED, CANCELED, PENDING")]
    Unknown(String)
}
