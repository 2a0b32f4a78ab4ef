//! Entity traits defining the core abstraction for all registrable records

use crate::core::field::{FieldValue, QueryField};
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

/// Base trait for all entities in the system.
///
/// Every registrable record (property, animal, location, supplier, buyer,
/// employee, service provider) has:
/// - id: Unique identifier
/// - created_at: Registration timestamp
/// - status: Current status of the record
pub trait Entity: Clone + Send + Sync + 'static {
    /// The singular entity type name (e.g., "animal", "service_provider")
    fn entity_type() -> &'static str;

    /// The plural resource name (e.g., "animals", "service_providers")
    fn resource_name() -> &'static str;

    /// Get the unique identifier for this entity instance
    fn id(&self) -> Uuid;

    /// Get the registration timestamp
    fn created_at(&self) -> DateTime<Utc>;

    /// Get the entity status
    fn status(&self) -> &str;

    /// Check if the entity is active
    fn is_active(&self) -> bool {
        self.status() == "active"
    }
}

/// Values that computed fields are derived from
///
/// Computed fields such as an animal's age in months depend on the current
/// date; the context pins that date so a projection is reproducible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectionContext {
    pub today: NaiveDate,
}

impl ProjectionContext {
    /// Context anchored on the current UTC date
    pub fn today() -> Self {
        Self {
            today: Utc::now().date_naive(),
        }
    }

    /// Context anchored on a fixed date
    pub fn at(today: NaiveDate) -> Self {
        Self { today }
    }
}

impl Default for ProjectionContext {
    fn default() -> Self {
        Self::today()
    }
}

/// Trait for entities that can be searched, filtered and sorted by the list pipeline.
///
/// Field access goes through the entity's [`QueryField`] enum, so every
/// searchable or sortable key is known at compile time.
pub trait Queryable: Entity {
    /// Field identifiers of this entity, raw and computed
    type Field: QueryField;

    /// Read one field, computing derived values from `context`
    ///
    /// Returns `None` (or [`FieldValue::Null`]) for absent optional fields.
    fn field_value(&self, field: Self::Field, context: &ProjectionContext) -> Option<FieldValue>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug)]
    struct TestEntity {
        id: Uuid,
        created_at: DateTime<Utc>,
        status: String,
    }

    impl Entity for TestEntity {
        fn entity_type() -> &'static str {
            "test_entity"
        }

        fn resource_name() -> &'static str {
            "test_entities"
        }

        fn id(&self) -> Uuid {
            self.id
        }

        fn created_at(&self) -> DateTime<Utc> {
            self.created_at
        }

        fn status(&self) -> &str {
            &self.status
        }
    }

    #[test]
    fn test_entity_is_active() {
        let mut entity = TestEntity {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            status: "active".to_string(),
        };
        assert!(entity.is_active());

        entity.status = "inactive".to_string();
        assert!(!entity.is_active());
    }

    #[test]
    fn test_entity_metadata() {
        assert_eq!(TestEntity::entity_type(), "test_entity");
        assert_eq!(TestEntity::resource_name(), "test_entities");
    }

    #[test]
    fn test_projection_context_at() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        assert_eq!(ProjectionContext::at(date).today, date);
    }
}
