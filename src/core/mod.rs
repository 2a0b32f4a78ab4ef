//! Core module containing fundamental traits and types of the library

pub mod entity;
pub mod error;
pub mod events;
pub mod field;
pub mod validation;

pub use entity::{Entity, ProjectionContext, Queryable};
pub use error::{BoiError, ConfigError, EntityError, FieldError, StorageError, ValidationError};
pub use events::{
    Breadcrumb, Breadcrumbs, EntityEvent, EventBus, EventEnvelope, SelectedProperty,
    SelectionStore,
};
pub use field::{DATE_LIKE_FIELDS, FieldFormat, FieldValue, QueryField};
pub use validation::{Validate, Validator};
