//! # Errors
//!
//! Crate-wide error taxonomy. Client errors describe a bad request against
//! the current state; storage errors mean the unit of work was rolled back.

use thiserror::Error;

use crate::store::StoreError;

/// Result type for answerdb operations
pub type QaResult<T> = Result<T, QaError>;

/// Errors surfaced to callers
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QaError {
    /// Referenced question, answer or user does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// A content-identical record already exists
    #[error("Duplicate: {0}")]
    Duplicate(String),

    /// Request is well-formed but not acceptable in the current state
    #[error("Invalid request: {0}")]
    Validation(String),

    /// Underlying store failed
    #[error("Storage error: {0}")]
    Storage(String),
}

impl QaError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            QaError::Validation(_) => 400,
            QaError::NotFound(_) => 404,
            QaError::Duplicate(_) => 409,
            QaError::Storage(_) => 500,
        }
    }

    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            QaError::NotFound(_) => "QA_NOT_FOUND",
            QaError::Duplicate(_) => "QA_DUPLICATE",
            QaError::Validation(_) => "QA_VALIDATION",
            QaError::Storage(_) => "QA_STORAGE",
        }
    }

    /// Returns whether the caller is at fault
    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}

impl From<StoreError> for QaError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict(msg) => QaError::Duplicate(msg),
            StoreError::MissingReference(msg) => QaError::NotFound(msg),
            other => QaError::Storage(other.to_string()),
        }
    }
}
