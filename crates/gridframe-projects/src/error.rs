//! Error types for the projects crate.
//!
//! Read paths map missing or unparseable records to "not found" before
//! they reach these types. An unparseable index is a consistency error
//! on paths that would rewrite it.

use std::io;
use thiserror::Error;

/// Errors that can occur during project persistence operations.
#[derive(Error, Debug)]
pub enum ProjectError {
    /// The requested project was not found.
    #[error("Project not found: {0}")]
    NotFound(String),

    /// The project record is unusable.
    #[error("Invalid project: {0}")]
    InvalidProject(String),

    /// The key-value backend failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// The index is unreadable or disagrees with the detail records.
    #[error("Consistency violation: {0}")]
    Consistency(String),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ProjectError {
    pub fn storage(reason: impl Into<String>) -> Self {
        Self::Storage(reason.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    pub fn is_consistency(&self) -> bool {
        matches!(self, Self::Consistency(_))
    }
}

impl From<ProjectError> for gridframe_core::Error {
    fn from(err: ProjectError) -> Self {
        match err {
            ProjectError::NotFound(id) => gridframe_core::Error::not_found(format!("project {id}")),
            ProjectError::InvalidProject(reason) => gridframe_core::Error::invalid_input(reason),
            ProjectError::Storage(reason) => gridframe_core::Error::storage(reason),
            ProjectError::Consistency(reason) => gridframe_core::Error::Consistency { reason },
            ProjectError::Io(e) => gridframe_core::Error::Io(e),
            ProjectError::Serialization(e) => gridframe_core::Error::Serialization(e),
        }
    }
}

/// Result type alias for project operations.
pub type ProjectResult<T> = Result<T, ProjectError>;
