//! Error handling for GridFrame
//!
//! The geometry and ratio engines never fail; they degrade to empty or
//! default values. Errors surface from the persistence layer and from
//! configuration handling, and are collected here into one taxonomy.
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for GridFrame
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed unit, non-finite measurement or unusable rectangle
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// What was wrong with the input.
        reason: String,
    },

    /// A requested record does not exist
    #[error("Not found: {what}")]
    NotFound {
        /// Description of the missing record.
        what: String,
    },

    /// Underlying storage read/write or serialization failure
    #[error("Storage failure: {reason}")]
    Storage {
        /// The reason the storage operation failed.
        reason: String,
    },

    /// The project index and the detail records disagree
    #[error("Consistency violation: {reason}")]
    Consistency {
        /// Description of the divergence.
        reason: String,
    },

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Error::InvalidInput {
            reason: reason.into(),
        }
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Error::NotFound { what: what.into() }
    }

    pub fn storage(reason: impl Into<String>) -> Self {
        Error::Storage {
            reason: reason.into(),
        }
    }

    /// Check if this is a not-found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }

    /// Check if this is a storage-level failure
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            Error::Storage { .. } | Error::Io(_) | Error::Serialization(_)
        )
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
