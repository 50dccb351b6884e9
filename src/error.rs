//! Error types for Toolify
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// All error types that can occur in Toolify
#[derive(Debug, Error)]
pub enum ToolifyError {
    /// Tool not found in the working set
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    /// A tool with this identifier is already loaded
    #[error("Duplicate tool id: {0}")]
    DuplicateId(String),

    /// Deletion is switched off for this directory
    #[error("Deleting tools is disabled")]
    DeleteDisabled,

    /// Category string outside software/plugin/script
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// Submission form is incomplete
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    /// Tool source could not deliver the batch
    #[error("Load failed: {0}")]
    Load(String),

    /// Persistence collaborator rejected a submission
    #[error("Submission failed: {0}")]
    Submission(String),

    /// A submission is already in flight
    #[error("Submission already in progress")]
    SubmissionInProgress,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for Toolify operations
pub type Result<T> = std::result::Result<T, ToolifyError>;
