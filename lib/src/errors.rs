// MalformedRow and Publish errors

use std::fmt;

/// A source row is missing a required field or carries an unusable value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedRowError {
    /// 1-based data row number (the header is not counted)
    pub row: usize,
    pub field: String,
    pub reason: String,
}

impl MalformedRowError {
    pub fn missing(row: usize, field: &str) -> Self {
        Self {
            row,
            field: field.to_string(),
            reason: "is missing".to_string(),
        }
    }

    pub fn invalid(row: usize, field: &str, reason: impl Into<String>) -> Self {
        Self {
            row,
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for MalformedRowError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Malformed row {}: field '{}' {}",
            self.row, self.field, self.reason
        )
    }
}

impl std::error::Error for MalformedRowError {}

#[derive(Debug)]
pub struct PublishError {
    pub server: String,
    pub status: u16,
    pub body: String,
}

impl fmt::Display for PublishError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Failed to publish nanopub to {} (HTTP {}): {}",
            self.server, self.status, self.body
        )
    }
}

impl std::error::Error for PublishError {}
