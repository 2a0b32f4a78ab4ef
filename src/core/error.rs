//! Typed error handling for the Boi na Nuvem library
//!
//! The list query pipeline never fails: bad intermediate states (unknown sort
//! keys, out-of-range pages) degrade to no-ops. Errors only come from the
//! surrounding collaborators.
//!
//! # Error Categories
//!
//! - [`EntityError`]: Errors related to entity operations (CRUD)
//! - [`ConfigError`]: Errors related to configuration parsing and validation
//! - [`ValidationError`]: Errors related to registration form validation
//! - [`StorageError`]: Errors related to the in-memory repository
//!
//! # Example
//!
//! ```rust,ignore
//! match repository.update(&id, animal).await {
//!     Ok(animal) => println!("Updated: {}", animal.code),
//!     Err(BoiError::Entity(EntityError::NotFound { id, .. })) => {
//!         println!("Animal {} not found", id);
//!     }
//!     Err(e) => eprintln!("Other error: {} ({})", e, e.error_code()),
//! }
//! ```

use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// The main error type of the library
#[derive(Debug, Error)]
pub enum BoiError {
    /// Entity-related errors (CRUD operations)
    #[error(transparent)]
    Entity(#[from] EntityError),

    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Storage errors
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl BoiError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            BoiError::Entity(e) => e.error_code(),
            BoiError::Config(_) => "CONFIG_ERROR",
            BoiError::Validation(_) => "VALIDATION_ERROR",
            BoiError::Storage(_) => "STORAGE_ERROR",
        }
    }
}

// =============================================================================
// Entity Errors
// =============================================================================

/// Errors related to entity operations
#[derive(Debug, Error)]
pub enum EntityError {
    /// Entity was not found
    #[error("{entity_type} with id '{id}' not found")]
    NotFound { entity_type: String, id: Uuid },

    /// Entity already exists (conflict)
    #[error("{entity_type} with id '{id}' already exists")]
    AlreadyExists { entity_type: String, id: Uuid },

    /// The id in the path and the id of the payload disagree
    #[error("{entity_type} id mismatch: expected '{expected}', got '{actual}'")]
    IdMismatch {
        entity_type: String,
        expected: Uuid,
        actual: Uuid,
    },
}

impl EntityError {
    pub fn error_code(&self) -> &'static str {
        match self {
            EntityError::NotFound { .. } => "ENTITY_NOT_FOUND",
            EntityError::AlreadyExists { .. } => "ENTITY_ALREADY_EXISTS",
            EntityError::IdMismatch { .. } => "ENTITY_ID_MISMATCH",
        }
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read or parse the configuration document
    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    /// A list section names an entity type that does not exist
    #[error("Unknown entity type in configuration: {entity_type}")]
    UnknownEntity { entity_type: String },

    /// A default sort names a field the entity does not have
    #[error("Unknown sort field '{field}' for {entity_type}")]
    UnknownSortField { entity_type: String, field: String },

    /// Page size must be at least one
    #[error("items_per_page must be greater than zero for {entity_type}")]
    InvalidItemsPerPage { entity_type: String },
}

// =============================================================================
// Validation Errors
// =============================================================================

/// A single field validation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Errors related to input validation
#[derive(Debug, Error)]
pub enum ValidationError {
    /// One or more fields failed validation
    #[error("Validation failed: {}", format_field_errors(.0))]
    FieldErrors(Vec<FieldError>),
}

impl ValidationError {
    /// The individual field failures
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            ValidationError::FieldErrors(errors) => errors,
        }
    }

    /// Whether a given field failed
    pub fn has_field(&self, field: &str) -> bool {
        self.field_errors().iter().any(|e| e.field == field)
    }
}

fn format_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors related to the in-memory repository
#[derive(Debug, Error)]
pub enum StorageError {
    /// The collection lock was poisoned by a panicking writer
    #[error("Failed to acquire {operation} lock: {message}")]
    LockPoisoned { operation: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_not_found_message() {
        let id = Uuid::new_v4();
        let err = BoiError::from(EntityError::NotFound {
            entity_type: "animal".to_string(),
            id,
        });

        assert_eq!(err.to_string(), format!("animal with id '{}' not found", id));
        assert_eq!(err.error_code(), "ENTITY_NOT_FOUND");
    }

    #[test]
    fn test_validation_error_lists_fields() {
        let err = ValidationError::FieldErrors(vec![
            FieldError {
                field: "name".to_string(),
                message: "obrigatório".to_string(),
            },
            FieldError {
                field: "email".to_string(),
                message: "inválido".to_string(),
            },
        ]);

        assert!(err.has_field("email"));
        assert!(!err.has_field("phone"));
        assert_eq!(
            err.to_string(),
            "Validation failed: name: obrigatório; email: inválido"
        );
        assert_eq!(BoiError::from(err).error_code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_config_error_code() {
        let err = BoiError::from(ConfigError::UnknownEntity {
            entity_type: "tractor".to_string(),
        });
        assert_eq!(err.error_code(), "CONFIG_ERROR");
        assert!(err.to_string().contains("tractor"));
    }
}
