use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PatternError {
    #[error("Search term [{pattern}] is not a valid pattern: {reason}")]
    Malformed {
        pattern: String,
        reason: String
    }
}
