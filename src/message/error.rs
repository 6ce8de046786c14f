use thiserror::Error;

use crate::item::ItemError;
use crate::persistence::SnapshotError;

#[derive(Error, Debug)]
pub enum MessageError {
    #[error("Validation error: {field}: {message}")]
    ValidationError { field: &'static str, message: String },

    #[error("Item not found: {0}")]
    ItemNotFound(String),

    #[error("Item store error: {0}")]
    Store(#[source] ItemError),

    #[error("Persistence error: {0}")]
    Persistence(#[from] SnapshotError),
}

impl MessageError {
    #[must_use]
    pub fn field(&self) -> Option<&'static str> {
        match self {
            MessageError::ValidationError { field, .. } => Some(field),
            _ => None,
        }
    }
}

impl From<ItemError> for MessageError {
    fn from(err: ItemError) -> Self {
        match err {
            ItemError::ValidationError { field, message } => {
                MessageError::ValidationError { field, message }
            }
            ItemError::NotFound(id) => MessageError::ItemNotFound(id),
            ItemError::Persistence(e) => MessageError::Persistence(e),
            other @ ItemError::InvalidTransition { .. } => MessageError::Store(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_validation_maps_to_message_validation() {
        let err = MessageError::from(ItemError::validation("fromEmail", "is required"));
        assert_eq!(err.field(), Some("fromEmail"));
        assert_eq!(err.to_string(), "Validation error: fromEmail: is required");
    }

    #[test]
    fn test_item_not_found_maps_to_item_not_found() {
        let err = MessageError::from(ItemError::not_found("abc"));
        assert!(matches!(err, MessageError::ItemNotFound(ref id) if id == "abc"));
    }
}
