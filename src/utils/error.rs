//! Application error type
//!
//! Covers the registry/catalog/backup/document surfaces. The order engine
//! carries its own [`crate::orders::OrderError`] with finer-grained variants.

use crate::store::StoreError;
use thiserror::Error;

/// Application error
#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or malformed required field. The operation was aborted with
    /// no partial state change.
    #[error("{0}")]
    Validation(String),

    /// A referenced record does not exist.
    #[error("{0} not found")]
    NotFound(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF generation failed: {0}")]
    Pdf(String),
}

impl AppError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a not found error
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound(resource.into())
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_display() {
        let err = AppError::validation("weight must be a number");
        assert_eq!(format!("{}", err), "weight must be a number");
    }

    #[test]
    fn test_not_found_display() {
        let err = AppError::not_found("Customer");
        assert_eq!(format!("{}", err), "Customer not found");
    }
}
