//! Store error types

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Failures reported by a relational or reputation store
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Backend could not be reached or refused the operation
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// A writer panicked while holding the store
    #[error("store lock poisoned")]
    LockPoisoned,

    /// Unique constraint violated
    #[error("unique constraint violated: {0}")]
    Conflict(String),

    /// Foreign key points at a row that does not exist
    #[error("missing referenced row: {0}")]
    MissingReference(String),

    /// Failure forced through a fault point
    #[error("injected fault at '{0}'")]
    Injected(&'static str),
}
