//! Buyer registration (slaughterhouses, traders, other farms)

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
    pub enum BuyerField {
        Name => "name",
        Document => "document",
        Email => "email",
        Phone => "phone",
        City => "city",
        State => "state",
        Status => "status",
        CreatedAt => "created_at",
    }
}

const SEARCHABLE_FIELDS: &[BuyerField] = &[
    BuyerField::Name,
    BuyerField::Document,
    BuyerField::Email,
    BuyerField::Phone,
    BuyerField::City,
];

const COLUMNS: &[Column<BuyerField>] = &[
    Column::new(BuyerField::Name, "Nome"),
    Column::unsortable(BuyerField::Document, "CPF/CNPJ"),
    Column::new(BuyerField::Email, "E-mail"),
    Column::unsortable(BuyerField::Phone, "Telefone"),
    Column::new(BuyerField::City, "Cidade"),
    Column::new(BuyerField::State, "UF"),
    Column::unsortable(BuyerField::Status, "Status"),
    Column::new(BuyerField::CreatedAt, "Cadastrado em"),
];

/// A registered cattle buyer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Buyer {
    pub id: Uuid,
    pub name: String,

    /// CPF or CNPJ
    pub document: String,

    pub email: Option<String>,
    pub phone: String,
    pub city: String,
    pub state: String,
    pub status: RecordStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl_entity!(Buyer, "buyer", "buyers");

impl Buyer {
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
            status: RecordStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
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

impl Queryable for Buyer {
    type Field = BuyerField;

    fn field_value(&self, field: BuyerField, _context: &ProjectionContext) -> Option<FieldValue> {
        let value = match field {
            BuyerField::Name => FieldValue::from(self.name.as_str()),
            BuyerField::Document => FieldValue::from(self.document.as_str()),
            BuyerField::Email => FieldValue::from(self.email.clone()),
            BuyerField::Phone => FieldValue::from(self.phone.as_str()),
            BuyerField::City => FieldValue::from(self.city.as_str()),
            BuyerField::State => FieldValue::from(self.state.as_str()),
            BuyerField::Status => FieldValue::from(self.status),
            BuyerField::CreatedAt => FieldValue::from(self.created_at),
        };
        Some(value)
    }
}

impl ListEntity for Buyer {
    fn list_descriptor() -> ListDescriptor<BuyerField> {
        ListDescriptor::new(Self::entity_type(), SEARCHABLE_FIELDS)
            .with_filter(BuyerField::Status)
            .with_default_sort(SortSpec::desc(BuyerField::CreatedAt))
            .with_columns(COLUMNS)
    }
}

impl Validate for Buyer {
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
