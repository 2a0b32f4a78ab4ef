//! Locations inside a property (pastures, corrals, barns)

use crate::core::entity::{Entity, ProjectionContext, Queryable};
use crate::core::error::ValidationError;
use crate::core::field::FieldValue;
use crate::core::validation::{Validate, Validator, positive, required, string_length};
use crate::entities::RecordStatus;
use crate::query::{Column, ListDescriptor, ListEntity, SortSpec};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

value_enum! {
    pub enum LocationKind {
        Pasture => "pasture",
        Corral => "corral",
        Barn => "barn",
        Feedlot => "feedlot",
        Other => "other",
    }
}

query_fields! {
    pub enum LocationField {
        Code => "code",
        Name => "name",
        Kind => "kind",
        PropertyId => "property_id",
        PropertyName => "property_name",
        Capacity => "capacity",
        Area => "area",
        Status => "status",
        CreatedAt => "created_at",
    }
}

const SEARCHABLE_FIELDS: &[LocationField] = &[
    LocationField::Code,
    LocationField::Name,
    LocationField::Kind,
    LocationField::PropertyName,
];

const COLUMNS: &[Column<LocationField>] = &[
    Column::new(LocationField::Code, "Código"),
    Column::new(LocationField::Name, "Nome"),
    Column::new(LocationField::Kind, "Tipo"),
    Column::new(LocationField::PropertyName, "Propriedade"),
    Column::new(LocationField::Capacity, "Capacidade"),
    Column::unsortable(LocationField::Status, "Status"),
    Column::new(LocationField::CreatedAt, "Cadastrado em"),
];

/// A location within a property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub kind: LocationKind,
    pub property_id: Uuid,

    /// Name of the owning property, denormalized for listing
    pub property_name: String,

    /// Head of cattle the location holds
    pub capacity: Option<u32>,

    /// Area, in hectares
    pub area: Option<f64>,

    pub status: RecordStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl_entity!(Location, "location", "locations");

impl Location {
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        kind: LocationKind,
        property_id: Uuid,
        property_name: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            code: code.into(),
            name: name.into(),
            kind,
            property_id,
            property_name: property_name.into(),
            capacity: None,
            area: None,
            status: RecordStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = Some(capacity);
        self
    }

    pub fn with_area(mut self, area: f64) -> Self {
        self.area = Some(area);
        self
    }

    pub fn with_status(mut self, status: RecordStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self.updated_at = created_at;
        self
    }
}

impl Queryable for Location {
    type Field = LocationField;

    fn field_value(&self, field: LocationField, _context: &ProjectionContext) -> Option<FieldValue> {
        let value = match field {
            LocationField::Code => FieldValue::from(self.code.as_str()),
            LocationField::Name => FieldValue::from(self.name.as_str()),
            LocationField::Kind => FieldValue::from(self.kind),
            LocationField::PropertyId => FieldValue::from(self.property_id),
            LocationField::PropertyName => FieldValue::from(self.property_name.as_str()),
            LocationField::Capacity => FieldValue::from(self.capacity),
            LocationField::Area => FieldValue::from(self.area),
            LocationField::Status => FieldValue::from(self.status),
            LocationField::CreatedAt => FieldValue::from(self.created_at),
        };
        Some(value)
    }
}

impl ListEntity for Location {
    fn list_descriptor() -> ListDescriptor<LocationField> {
        ListDescriptor::new(Self::entity_type(), SEARCHABLE_FIELDS)
            .with_filter(LocationField::Status)
            .with_default_sort(SortSpec::desc(LocationField::CreatedAt))
            .with_columns(COLUMNS)
    }
}

impl Validate for Location {
    fn validate(&self) -> Result<(), ValidationError> {
        Validator::new()
            .field("code", self.code.as_str(), &[&required(), &string_length(1, 20)])
            .field("name", self.name.as_str(), &[&required(), &string_length(2, 80)])
            .field("property_name", self.property_name.as_str(), &[&required()])
            .field("capacity", self.capacity, &[&positive()])
            .field("area", self.area, &[&positive()])
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pasto() -> Location {
        Location::new("P-07", "Pasto da Baixada", LocationKind::Pasture, Uuid::new_v4(), "Fazenda Boa Vista")
    }

    #[test]
    fn test_kind_is_searchable_text() {
        let location = pasto();
        let value = location.field_value(LocationField::Kind, &ProjectionContext::default());
        assert_eq!(value, Some(FieldValue::from("pasture")));
        assert!(Location::list_descriptor().searchable_fields.contains(&LocationField::Kind));
    }

    #[test]
    fn test_missing_capacity_projects_to_null() {
        let context = ProjectionContext::default();
        assert_eq!(pasto().field_value(LocationField::Capacity, &context), Some(FieldValue::Null));
        assert_eq!(
            pasto().with_capacity(120).field_value(LocationField::Capacity, &context),
            Some(FieldValue::Integer(120))
        );
    }

    #[test]
    fn test_validation() {
        assert!(pasto().with_area(12.0).validate().is_ok());

        let err = pasto().with_capacity(0).validate().unwrap_err();
        assert!(err.has_field("capacity"));
        assert_eq!(err.field_errors().len(), 1);
    }
}
