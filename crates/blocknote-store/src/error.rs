//! Error types for the storage layer.

use thiserror::Error;
use uuid::Uuid;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur during storage operations.
///
/// `NotebookNotFound` and `BlockNotFound` deliberately cover three distinct
/// situations each: the entity does not exist, the caller holds no connector
/// row for it, or (for blocks) the block is not a member of the requested
/// notebook. Callers must not be able to tell these apart.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Notebook not found or not reachable by the caller.
    #[error("notebook not found: {0}")]
    NotebookNotFound(Uuid),

    /// Block not found, or not a member of the requested notebook.
    #[error("block not found: {0}")]
    BlockNotFound(Uuid),

    /// User not found.
    #[error("user not found: {0}")]
    UserNotFound(Uuid),

    /// Email already registered.
    #[error("email already registered: {0}")]
    EmailTaken(String),

    /// A required field is missing or blank.
    #[error("validation failed on {field}: {reason}")]
    Validation {
        field: &'static str,
        reason: String,
    },

    /// Migration error.
    #[error("migration error: {0}")]
    Migration(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl StoreError {
    /// Shorthand for a blank/missing required field.
    pub fn blank_field(field: &'static str) -> Self {
        Self::Validation {
            field,
            reason: "must not be empty".to_string(),
        }
    }
}
