//! Custom error types for cardsplit
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.
//!
//! Input mistakes made at the allocation prompt never surface here: the
//! allocation engine drops them silently so the operator can simply retry.

use thiserror::Error;

/// The main error type for cardsplit operations
#[derive(Error, Debug)]
pub enum CardsplitError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for command line or config values
    #[error("Validation error: {0}")]
    Validation(String),

    /// An allocation was requested before any category set was established
    #[error("Category set not initialized: configure allocation columns first")]
    UninitializedCategorySet,

    /// Fewer than two categories were configured
    #[error("Two or more allocation categories are required, got {0}")]
    TooFewCategories(usize),

    /// The same category code was configured twice
    #[error("Duplicate allocation category: {0}")]
    DuplicateCategory(String),

    /// A category code that cannot be typed at the prompt
    #[error("Invalid allocation category '{0}': codes must be non-empty, without whitespace, and not '?'")]
    InvalidCategory(String),

    /// Transaction direction other than CREDIT or DEBIT
    #[error("Unsupported transaction direction '{direction}' for transaction {id}")]
    UnsupportedDirection { id: String, direction: String },

    /// Direction and amount sign disagree
    #[error("Sign mismatch for transaction {id}: {direction} with amount {amount}")]
    SignMismatch {
        id: String,
        direction: String,
        amount: String,
    },

    /// Allocated amounts do not add up once the remainder reached zero
    #[error("Transaction {id} incorrectly allocated: {allocated} != {expected}")]
    AllocationIntegrity {
        id: String,
        allocated: String,
        expected: String,
    },

    /// Export parsing errors
    #[error("Import error: {0}")]
    Import(String),

    /// Ledger read/write errors
    #[error("Ledger error: {0}")]
    Ledger(String),

    /// The ledger partition carries a header for a different layout
    #[error("Ledger header mismatch: got [{got}], expected [{expected}]")]
    HeaderMismatch { got: String, expected: String },

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl CardsplitError {
    /// Create a sign mismatch error for a transaction
    pub fn sign_mismatch(
        id: impl Into<String>,
        direction: impl Into<String>,
        amount: impl ToString,
    ) -> Self {
        Self::SignMismatch {
            id: id.into(),
            direction: direction.into(),
            amount: amount.to_string(),
        }
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for CardsplitError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CardsplitError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for CardsplitError {
    fn from(err: csv::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

/// Result type alias for cardsplit operations
pub type CardsplitResult<T> = Result<T, CardsplitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CardsplitError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_sign_mismatch_error() {
        let err = CardsplitError::sign_mismatch("8423858PG12AM3XZE", "CREDIT", "-5.00");
        assert_eq!(
            err.to_string(),
            "Sign mismatch for transaction 8423858PG12AM3XZE: CREDIT with amount -5.00"
        );
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: CardsplitError = io_err.into();
        assert!(matches!(err, CardsplitError::Io(_)));
    }
}
