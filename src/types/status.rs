use crate::types::errors::StatusError;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Lifecycle status of a transaction as recorded in the `state` field.
///
/// Only these three values can be filtered on. Records carrying any other
/// `state` are still ingested, they simply never match a status filter.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Status {
    Executed,
    Canceled,
    Pending
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Executed, Status::Canceled, Status::Pending];

    /// The exact text stored in a record's `state` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Executed => "EXECUTED",
            Status::Canceled => "CANCELED",
            Status::Pending => "PENDING"
        }
    }
}

impl Display for Status {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = StatusError;

    /// Parses user input, ignoring case and surrounding whitespace.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_uppercase();

        Status::ALL.into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| StatusError::Unknown(value.trim().to_string()))
    }
}
