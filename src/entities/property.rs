//! Rural property (farm) registration

use crate::core::entity::{Entity, ProjectionContext, Queryable};
use crate::core::error::ValidationError;
use crate::core::field::FieldValue;
use crate::core::validation::{
    Validate, Validator, date_not_after, in_list, positive, required, string_length,
};
use crate::entities::{BRAZILIAN_STATES, RecordStatus};
use crate::query::{Column, ListDescriptor, ListEntity, SortSpec};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

query_fields! {
    pub enum PropertyField {
        Code => "code",
        Name => "name",
        Owner => "owner",
        City => "city",
        State => "state",
        TotalArea => "total_area",
        AcquisitionDate => "acquisition_date",
        Status => "status",
        CreatedAt => "created_at",
    }
}

const SEARCHABLE_FIELDS: &[PropertyField] = &[
    PropertyField::Name,
    PropertyField::Code,
    PropertyField::Owner,
    PropertyField::City,
    PropertyField::State,
];

const COLUMNS: &[Column<PropertyField>] = &[
    Column::new(PropertyField::Code, "Código"),
    Column::new(PropertyField::Name, "Nome"),
    Column::new(PropertyField::Owner, "Proprietário"),
    Column::new(PropertyField::City, "Cidade"),
    Column::new(PropertyField::State, "UF"),
    Column::new(PropertyField::TotalArea, "Área (ha)"),
    Column::unsortable(PropertyField::Status, "Status"),
    Column::new(PropertyField::CreatedAt, "Cadastrado em"),
];

/// A registered rural property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub owner: String,
    pub city: String,

    /// State abbreviation (UF)
    pub state: String,

    /// Total area, in hectares
    pub total_area: f64,

    pub acquisition_date: Option<NaiveDate>,
    pub status: RecordStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl_entity!(Property, "property", "properties");

impl Property {
    /// Create a new active property
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        owner: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        total_area: f64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            code: code.into(),
            name: name.into(),
            owner: owner.into(),
            city: city.into(),
            state: state.into(),
            total_area,
            acquisition_date: None,
            status: RecordStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_acquisition_date(mut self, date: NaiveDate) -> Self {
        self.acquisition_date = Some(date);
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

impl Queryable for Property {
    type Field = PropertyField;

    fn field_value(&self, field: PropertyField, _context: &ProjectionContext) -> Option<FieldValue> {
        let value = match field {
            PropertyField::Code => FieldValue::from(self.code.as_str()),
            PropertyField::Name => FieldValue::from(self.name.as_str()),
            PropertyField::Owner => FieldValue::from(self.owner.as_str()),
            PropertyField::City => FieldValue::from(self.city.as_str()),
            PropertyField::State => FieldValue::from(self.state.as_str()),
            PropertyField::TotalArea => FieldValue::from(self.total_area),
            PropertyField::AcquisitionDate => FieldValue::from(self.acquisition_date),
            PropertyField::Status => FieldValue::from(self.status),
            PropertyField::CreatedAt => FieldValue::from(self.created_at),
        };
        Some(value)
    }
}

impl ListEntity for Property {
    fn list_descriptor() -> ListDescriptor<PropertyField> {
        ListDescriptor::new(Self::entity_type(), SEARCHABLE_FIELDS)
            .with_filter(PropertyField::Status)
            .with_default_sort(SortSpec::desc(PropertyField::CreatedAt))
            .with_columns(COLUMNS)
    }
}

impl Validate for Property {
    fn validate(&self) -> Result<(), ValidationError> {
        let today = Utc::now().date_naive();
        Validator::new()
            .field("code", self.code.as_str(), &[&required(), &string_length(1, 20)])
            .field("name", self.name.as_str(), &[&required(), &string_length(2, 120)])
            .field("owner", self.owner.as_str(), &[&required(), &string_length(2, 120)])
            .field("city", self.city.as_str(), &[&required()])
            .field("state", self.state.as_str(), &[&required(), &in_list(BRAZILIAN_STATES)])
            .field("total_area", self.total_area, &[&positive()])
            .field("acquisition_date", self.acquisition_date, &[&date_not_after(today)])
            .finish()
    }
}
