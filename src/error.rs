//! Custom error types for fairshare
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for fairshare operations
#[derive(Error, Debug)]
pub enum FairshareError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors, detected before anything reaches a store
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Entity is still referenced and cannot be removed
    #[error("{entity_type} is in use: {reason}")]
    InUse {
        entity_type: &'static str,
        reason: String,
    },

    /// Local storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Remote store returned a non-success status or could not be reached
    #[error("API error{}: {message}", status_suffix(.status))]
    Api {
        status: Option<u16>,
        message: String,
    },

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl FairshareError {
    /// Create a "not found" error for people
    pub fn person_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Person",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for expenses
    pub fn expense_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Expense",
            identifier: identifier.into(),
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

    /// Check if this error came from a store round trip rather than user input
    pub fn is_store_failure(&self) -> bool {
        matches!(self, Self::Storage(_) | Self::Api { .. } | Self::Io(_))
    }
}

impl From<std::io::Error> for FairshareError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for FairshareError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<reqwest::Error> for FairshareError {
    fn from(err: reqwest::Error) -> Self {
        Self::Api {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" ({})", s)).unwrap_or_default()
}

/// Result type alias for fairshare operations
pub type FairshareResult<T> = Result<T, FairshareError>;
