//! Error types shared by the model services.

use thiserror::Error;

use crate::store::StorageError;

/// A draft was submitted with required fields missing or unusable.
///
/// Lists every missing field so the caller can report them all at once.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Missing required fields: {}", .missing.join(", "))]
pub struct ValidationError {
    pub missing: Vec<&'static str>,
}

impl ValidationError {
    pub fn new(missing: Vec<&'static str>) -> Self {
        Self { missing }
    }
}

/// Errors returned by the pantry, shopping list, favorites, meal plan and
/// recipe services.
#[derive(Debug, Error)]
pub enum ChefError {
    /// Input rejected before any state changed.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The store could not be read or written.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// An operation referenced an id that is not in the collection.
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },
}

impl ChefError {
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        ChefError::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// Returns true for conditions a caller should report as a notice
    /// rather than a failure.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ChefError::Storage(_) | ChefError::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_lists_fields() {
        let err = ValidationError::new(vec!["name", "unit"]);
        assert_eq!(err.to_string(), "Missing required fields: name, unit");
    }

    #[test]
    fn test_not_found_display() {
        let err = ChefError::not_found("Pantry item", "42");
        assert_eq!(err.to_string(), "Pantry item not found: 42");
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_validation_is_not_recoverable() {
        let err: ChefError = ValidationError::new(vec!["name"]).into();
        assert!(!err.is_recoverable());
    }
}
