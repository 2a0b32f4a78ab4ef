//! Validation system for registration forms
//!
//! Entities describe their rules as a chain of field checks:
//!
//! ```rust,ignore
//! impl Validate for Supplier {
//!     fn validate(&self) -> Result<(), ValidationError> {
//!         Validator::new()
//!             .field("name", self.name.as_str(), &[&required(), &string_length(2, 120)])
//!             .field("email", self.email.clone(), &[&format(FieldFormat::Email)])
//!             .finish()
//!     }
//! }
//! ```

pub mod validators;

use crate::core::error::{FieldError, ValidationError};
use crate::core::field::FieldValue;

pub use validators::{
    date_not_after, format, in_list, max_value, non_negative, positive, required, string_length,
};

/// A single field rule
pub type Rule<'a> = &'a dyn Fn(&str, &FieldValue) -> Result<(), String>;

/// Trait for entities that validate themselves before being stored
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Collects field errors across a chain of rules
///
/// Every rule of every field runs; the first failure of a field is kept so a
/// form can show one message per input.
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check one field against its rules
    pub fn field(mut self, field: &str, value: impl Into<FieldValue>, rules: &[Rule<'_>]) -> Self {
        let value = value.into();
        if let Some(message) = rules.iter().find_map(|rule| rule(field, &value).err()) {
            self.errors.push(FieldError {
                field: field.to_string(),
                message,
            });
        }
        self
    }

    /// Finish the chain
    pub fn finish(self) -> Result<(), ValidationError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::FieldErrors(self.errors))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::field::FieldFormat;

    #[test]
    fn test_validator_collects_one_error_per_field() {
        let result = Validator::new()
            .field("name", "", &[&required(), &string_length(2, 10)])
            .field("email", "nope", &[&format(FieldFormat::Email)])
            .field("area", 12.5, &[&positive()])
            .finish();

        let err = result.unwrap_err();
        assert_eq!(err.field_errors().len(), 2);
        assert!(err.has_field("name"));
        assert!(err.has_field("email"));
        assert!(!err.has_field("area"));
    }

    #[test]
    fn test_validator_ok_when_all_pass() {
        let result = Validator::new()
            .field("name", "Fazenda Boa Vista", &[&required(), &string_length(2, 120)])
            .field("notes", None::<String>, &[])
            .finish();

        assert!(result.is_ok());
    }
}
