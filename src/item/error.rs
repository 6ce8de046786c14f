//! Error types for item store operations.

use thiserror::Error;

use super::types::ItemStatus;
use crate::persistence::SnapshotError;

/// Error type for item domain operations.
#[derive(Error, Debug)]
pub enum ItemError {
    #[error("Validation error: {field}: {message}")]
    ValidationError { field: &'static str, message: String },

    #[error("Item not found: {0}")]
    NotFound(String),

    #[error("Invalid transition for item {id}: {from} -> {to}")]
    InvalidTransition {
        id: String,
        from: ItemStatus,
        to: ItemStatus,
    },

    #[error("Persistence error: {0}")]
    Persistence(#[from] SnapshotError),
}

impl ItemError {
    /// Create a validation error for a named field
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        ItemError::ValidationError {
            field,
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(id: impl Into<String>) -> Self {
        ItemError::NotFound(id.into())
    }

    /// The offending field, for validation failures.
    #[must_use]
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ItemError::ValidationError { field, .. } => Some(field),
            _ => None,
        }
    }
}
