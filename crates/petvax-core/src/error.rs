//! # Error Types
//!
//! Domain-specific error types for petvax-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  petvax-core errors (this file)                                        │
//! │  ├── CoreError         - Service-level failures                        │
//! │  ├── ValidationErrors  - Every violation found in one request          │
//! │  └── ValidationError   - A single field violation                      │
//! │                                                                         │
//! │  petvax-db errors (separate crate)                                     │
//! │  └── DbError           - Database operation failures                   │
//! │                                                                         │
//! │  REST errors (apps/api)                                                │
//! │  └── ApiError          - Status code + response envelope               │
//! │                                                                         │
//! │  Flow: ValidationError → ValidationErrors → CoreError → ApiError       │
//! │        DbError → CoreError::Storage → ApiError (500)                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeMap;

use thiserror::Error;

use crate::types::PetId;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised by the pet record service and the ports it calls.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No pet exists under this identifier.
    ///
    /// ## When This Occurs
    /// - Updating or deleting an id that was never assigned
    /// - Updating or deleting a pet that was already deleted
    ///
    /// Reads do not raise this; they return `None` and let the caller decide.
    #[error("Pet with ID: {id} was not found.")]
    PetNotFound { id: PetId },

    /// The request broke one or more validation rules.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// The store adapter failed for a reason unrelated to the request.
    #[error("Storage failure: {0}")]
    Storage(String),
}

impl CoreError {
    /// Creates a PetNotFound error.
    pub fn not_found(id: PetId) -> Self {
        CoreError::PetNotFound { id }
    }

    /// Returns true for [`CoreError::PetNotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, CoreError::PetNotFound { .. })
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// A single input validation failure.
///
/// `field` is the wire path of the offending value (`ownerContact`,
/// `vaccines[1].dateGiven`) so the boundary can report it verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must not exceed {max} characters")]
    TooLong { field: String, max: usize },

    /// Invalid format (contact number, email address).
    #[error("{field} {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {}", .allowed.join(", "))]
    NotAllowed { field: String, allowed: Vec<String> },

    /// Date lies after today.
    #[error("{field} must be in the past or present")]
    InFuture { field: String },
}

impl ValidationError {
    /// The wire path this error refers to.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::TooLong { field, .. }
            | ValidationError::InvalidFormat { field, .. }
            | ValidationError::NotAllowed { field, .. }
            | ValidationError::InFuture { field } => field,
        }
    }
}

/// Every validation failure found in one request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{} field(s) invalid", .0.len())]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    /// Creates an empty collection.
    pub fn new() -> Self {
        ValidationErrors::default()
    }

    /// Records one failure.
    pub fn push(&mut self, error: ValidationError) {
        self.0.push(error);
    }

    /// Records the failure carried by `result`, if any.
    pub fn check(&mut self, result: Result<(), ValidationError>) {
        if let Err(e) = result {
            self.push(e);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over the recorded failures in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    /// Returns true if any failure refers to `field`.
    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field() == field)
    }

    /// Field → message map for the response body.
    ///
    /// When one field fails several rules, the first failure wins.
    pub fn field_messages(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        for error in &self.0 {
            map.entry(error.field().to_string())
                .or_insert_with(|| error.to_string());
        }
        map
    }

    /// `Ok(value)` when nothing was recorded, otherwise `Err(self)`.
    pub fn into_result<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        ValidationErrors(vec![error])
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = CoreError::not_found(999);
        assert_eq!(err.to_string(), "Pet with ID: 999 was not found.");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "ownerName".to_string(),
        };
        assert_eq!(err.to_string(), "ownerName is required");

        let err = ValidationError::TooLong {
            field: "name".to_string(),
            max: 50,
        };
        assert_eq!(err.to_string(), "name must not exceed 50 characters");

        let err = ValidationError::NotAllowed {
            field: "species".to_string(),
            allowed: vec!["DOG".to_string(), "CAT".to_string()],
        };
        assert_eq!(err.to_string(), "species must be one of: DOG, CAT");
    }

    #[test]
    fn test_field_messages_keep_first_failure() {
        let mut errors = ValidationErrors::new();
        errors.push(ValidationError::Required {
            field: "name".to_string(),
        });
        errors.push(ValidationError::TooLong {
            field: "name".to_string(),
            max: 50,
        });
        errors.push(ValidationError::InFuture {
            field: "vaccines[0].dateGiven".to_string(),
        });

        let map = errors.field_messages();
        assert_eq!(map.len(), 2);
        assert_eq!(map["name"], "name is required");
        assert_eq!(
            map["vaccines[0].dateGiven"],
            "vaccines[0].dateGiven must be in the past or present"
        );
    }

    #[test]
    fn test_into_result() {
        assert_eq!(ValidationErrors::new().into_result(5), Ok(5));

        let errors: ValidationErrors = ValidationError::Required {
            field: "ownerEmail".to_string(),
        }
        .into();
        assert!(errors.into_result(()).is_err());
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let errors: ValidationErrors = ValidationError::Required {
            field: "name".to_string(),
        }
        .into();
        let core_err: CoreError = errors.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
