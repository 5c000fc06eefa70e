//! Custom error types for the envelope ledger
//!
//! This module defines the error hierarchy for the ledger using thiserror.
//! Callers that need to branch on the failure (such as the request handler)
//! dispatch on [`ErrorKind`] rather than on message text.

use thiserror::Error;

use crate::models::{EnvelopeId, Money};

/// The main error type for ledger operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Malformed or out-of-range input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Another envelope already uses this category
    #[error("Envelope category already exists: {category}")]
    DuplicateCategory { category: String },

    /// The sum of envelope budgets would exceed the total budget
    #[error("Budget exceeded: requested {requested}, but only {available} of {total} is unallocated")]
    BudgetExceeded {
        requested: Money,
        available: Money,
        total: Money,
    },

    /// No envelope with this identifier
    #[error("Envelope not found: {identifier}")]
    NotFound { identifier: String },

    /// The operation would drive a balance below zero
    #[error("Insufficient balance in envelope '{category}': need {needed}, have {available}")]
    InsufficientBalance {
        category: String,
        needed: Money,
        available: Money,
    },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// In-memory state could not be accessed (poisoned lock)
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Fieldless classification of a [`LedgerError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    DuplicateCategory,
    BudgetExceeded,
    NotFound,
    InsufficientBalance,
    Config,
    Io,
    Json,
    Storage,
}

impl LedgerError {
    /// Create a "not found" error for an envelope id
    pub fn envelope_not_found(id: EnvelopeId) -> Self {
        Self::NotFound {
            identifier: id.to_string(),
        }
    }

    /// Create a "not found" error for a free-form identifier (name or id)
    pub fn identifier_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            identifier: identifier.into(),
        }
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::DuplicateCategory { .. } => ErrorKind::DuplicateCategory,
            Self::BudgetExceeded { .. } => ErrorKind::BudgetExceeded,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::InsufficientBalance { .. } => ErrorKind::InsufficientBalance,
            Self::Config(_) => ErrorKind::Config,
            Self::Io(_) => ErrorKind::Io,
            Self::Json(_) => ErrorKind::Json,
            Self::Storage(_) => ErrorKind::Storage,
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LedgerError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = LedgerError::envelope_not_found(EnvelopeId::new(7));
        assert_eq!(err.to_string(), "Envelope not found: 7");
        assert!(err.is_not_found());
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_insufficient_balance_error() {
        let err = LedgerError::InsufficientBalance {
            category: "Groceries".into(),
            needed: Money::from_cents(5000),
            available: Money::from_cents(3000),
        };
        assert_eq!(
            err.to_string(),
            "Insufficient balance in envelope 'Groceries': need $50.00, have $30.00"
        );
        assert_eq!(err.kind(), ErrorKind::InsufficientBalance);
    }

    #[test]
    fn test_budget_exceeded_error() {
        let err = LedgerError::BudgetExceeded {
            requested: Money::from_cents(60000),
            available: Money::from_cents(50000),
            total: Money::from_cents(200000),
        };
        assert!(err.to_string().contains("only $500.00 of $2000.00"));
        assert!(!err.is_validation());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: LedgerError = io_err.into();
        assert_eq!(err.kind(), ErrorKind::Io);
    }
}
