//! Supplier registration (feed, medicine, equipment vendors)

use crate::core::entity::{Entity, ProjectionContext, Queryable};
use crate::core::error::ValidationError;
use crate::core::field::{FieldFormat, FieldValue};
use crate::core::validation::{Validate, Validator, format, in_list, required, string_length};
use crate::entities::{BRAZILIAN_STATES, RecordStatus};
use crate::query::{Column, ListDescriptor, ListEntity, SortSpec};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

query_fields! {
    pub enum SupplierField {
        Name => "name",
        Document => "document",
        Email => "email",
        Phone => "phone",
        City => "city",
        State => "state",
        Category => "category",
        Status => "status",
        CreatedAt => "created_at",
    }
}

const SEARCHABLE_FIELDS: &[SupplierField] = &[
    SupplierField::Name,
    SupplierField::Document,
    SupplierField::Email,
    SupplierField::Phone,
    SupplierField::City,
];

const COLUMNS: &[Column<SupplierField>] = &[
    Column::new(SupplierField::Name, "Nome"),
    Column::unsortable(SupplierField::Document, "CPF/CNPJ"),
    Column::new(SupplierField::Email, "E-mail"),
    Column::unsortable(SupplierField::Phone, "Telefone"),
    Column::new(SupplierField::City, "Cidade"),
    Column::new(SupplierField::Category, "Categoria"),
    Column::unsortable(SupplierField::Status, "Status"),
    Column::new(SupplierField::CreatedAt, "Cadastrado em"),
];

/// A registered supplier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: Uuid,
    pub name: String,

    /// CPF or CNPJ
    pub document: String,

    pub email: Option<String>,
    pub phone: String,
    pub city: String,
    pub state: String,

    /// What the supplier sells (e.g., "ração", "vacinas")
    pub category: Option<String>,

    pub status: RecordStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl_entity!(Supplier, "supplier", "suppliers");

impl Supplier {
    pub fn new(
        name: impl Into<String>,
        document: impl Into<String>,
        phone: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            document: document.into(),
            email: None,
            phone: phone.into(),
            city: city.into(),
            state: state.into(),
            category: None,
            status: RecordStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
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

impl Queryable for Supplier {
    type Field = SupplierField;

    fn field_value(&self, field: SupplierField, _context: &ProjectionContext) -> Option<FieldValue> {
        let value = match field {
            SupplierField::Name => FieldValue::from(self.name.as_str()),
            SupplierField::Document => FieldValue::from(self.document.as_str()),
            SupplierField::Email => FieldValue::from(self.email.clone()),
            SupplierField::Phone => FieldValue::from(self.phone.as_str()),
            SupplierField::City => FieldValue::from(self.city.as_str()),
            SupplierField::State => FieldValue::from(self.state.as_str()),
            SupplierField::Category => FieldValue::from(self.category.clone()),
            SupplierField::Status => FieldValue::from(self.status),
            SupplierField::CreatedAt => FieldValue::from(self.created_at),
        };
        Some(value)
    }
}

impl ListEntity for Supplier {
    fn list_descriptor() -> ListDescriptor<SupplierField> {
        ListDescriptor::new(Self::entity_type(), SEARCHABLE_FIELDS)
            .with_filter(SupplierField::Status)
            .with_default_sort(SortSpec::desc(SupplierField::CreatedAt))
            .with_columns(COLUMNS)
    }
}

impl Validate for Supplier {
    fn validate(&self) -> Result<(), ValidationError> {
        Validator::new()
            .field("name", self.name.as_str(), &[&required(), &string_length(2, 120)])
            .field(
                "document",
                self.document.as_str(),
                &[&required(), &format(FieldFormat::Document)],
            )
            .field("email", self.email.clone(), &[&format(FieldFormat::Email)])
            .field("phone", self.phone.as_str(), &[&required(), &format(FieldFormat::Phone)])
            .field("city", self.city.as_str(), &[&required()])
            .field("state", self.state.as_str(), &[&required(), &in_list(BRAZILIAN_STATES)])
            .finish()
    }
}
