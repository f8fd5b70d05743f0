//! Poll cycle error types

use thiserror::Error;

/// Poll result type alias
pub type Result<T> = std::result::Result<T, PollError>;

/// Reasons a single poll cycle can fail.
///
/// The poll loop folds every variant into the same failure streak; the
/// variants exist so the cause can still be logged.
#[derive(Error, Debug)]
pub enum PollError {
    /// Connection, DNS, timeout or body read failure
    #[error("Transport error: {0}")]
    Transport(String),

    /// Endpoint answered with something other than 200 OK
    #[error("Unexpected HTTP status: {0}")]
    Status(u16),

    /// Body was empty after trimming whitespace
    #[error("Empty response body")]
    EmptyBody,

    /// Body did not split into the expected number of fields
    #[error("Expected {expected} comma-separated fields, got {actual}")]
    FieldCount { expected: usize, actual: usize },

    /// A field could not be parsed as its numeric type
    #[error("Invalid {field} value: {value:?}")]
    NumericFormat { field: &'static str, value: String },
}

impl From<reqwest::Error> for PollError {
    fn from(err: reqwest::Error) -> Self {
        PollError::Transport(err.to_string())
    }
}
