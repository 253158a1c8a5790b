//! Error types for the read path.
//!
//! Grammar-parser errors are fatal for the file being parsed and are not
//! caught locally; they propagate to the caller, which owns any file-level
//! rollback. Recoverable conditions (a skipped table, a degraded field
//! rendering) are not errors — they travel through
//! [`Diagnostics`](crate::gssha::diagnostics::Diagnostics) instead.

use std::fmt;

/// Errors raised while parsing a GSSHA text file.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// A required token, field, or chunk was absent from its expected
    /// position, or a structural count did not match the data.
    MalformedInput(String),
    /// A continuation line was seen before any keyword line opened a chunk.
    OrphanLine(String),
    /// A field that must be numeric could not be parsed as a number.
    BadNumber { field: String, token: String },
}

impl ParseError {
    pub fn malformed(message: impl Into<String>) -> Self {
        ParseError::MalformedInput(message.into())
    }

    pub fn bad_number(field: impl Into<String>, token: impl Into<String>) -> Self {
        ParseError::BadNumber {
            field: field.into(),
            token: token.into(),
        }
    }
}

impl std::error::Error for ParseError {}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::MalformedInput(message) => write!(f, "malformed input: {}", message),
            ParseError::OrphanLine(line) => {
                write!(f, "line belongs to no chunk (no keyword seen yet): {}", line)
            }
            ParseError::BadNumber { field, token } => {
                write!(f, "field {} is not a number: {:?}", field, token)
            }
        }
    }
}
