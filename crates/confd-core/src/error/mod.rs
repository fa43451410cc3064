//! Error types and result aliases for confd operations.
//!
//! A directory that does not exist is not an error anywhere in confd: resolvers
//! report it as an absent document. The variants here are the conditions that
//! fail a whole resolution.

use thiserror::Error;

/// Unified error type for all confd operations
#[derive(Error, Debug)]
pub enum ConfdError {
    // Validation errors
    #[error("Argument '{field}' is invalid: {reason}")]
    InvalidArgument { field: String, reason: String },

    #[error("No such strategy (\"{value}\")")]
    InvalidStrategy { value: String },

    // Fragment errors
    #[error("Failed to parse fragment {path}: {message}")]
    FragmentParse { path: String, message: String },

    // IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for confd operations
pub type ConfdResult<T> = Result<T, ConfdError>;

impl ConfdError {
    /// Create an invalid-argument error
    pub fn invalid_argument(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create an IO error from std::io::Error
    pub fn io(message: String, source: std::io::Error) -> Self {
        Self::Io { message, source }
    }

    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ConfdError::Io { .. })
    }

    /// Get a user-friendly suggestion for fixing this error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            ConfdError::InvalidStrategy { .. } => {
                Some("Use one of LEAVES, BACKCURSION or ARRAY (case-insensitive)")
            },
            ConfdError::FragmentParse { .. } => {
                Some("Fragments must contain valid JSON, whatever their .conf/.json suffix")
            },
            ConfdError::Io { .. } => Some("Check that the file is readable by the current user"),
            ConfdError::InvalidArgument { .. } => None,
        }
    }
}
