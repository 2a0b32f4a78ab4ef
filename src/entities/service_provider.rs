//! Service provider registration (veterinarians, agronomists, contractors)

use crate::core::entity::{Entity, ProjectionContext, Queryable};
use crate::core::error::ValidationError;
use crate::core::field::{FieldFormat, FieldValue};
use crate::core::validation::{Validate, Validator, format, required, string_length};
use crate::entities::RecordStatus;
use crate::query::{Column, ListDescriptor, ListEntity, SortSpec};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

query_fields! {
    pub enum ServiceProviderField {
        Name => "name",
        Document => "document",
        ServiceType => "service_type",
        Email => "email",
        Phone => "phone",
        City => "city",
        Status => "status",
        CreatedAt => "created_at",
    }
}

const SEARCHABLE_FIELDS: &[ServiceProviderField] = &[
    ServiceProviderField::Name,
    ServiceProviderField::Document,
    ServiceProviderField::ServiceType,
    ServiceProviderField::Email,
    ServiceProviderField::Phone,
];

const COLUMNS: &[Column<ServiceProviderField>] = &[
    Column::new(ServiceProviderField::Name, "Nome"),
    Column::unsortable(ServiceProviderField::Document, "CPF/CNPJ"),
    Column::new(ServiceProviderField::ServiceType, "Serviço"),
    Column::new(ServiceProviderField::Email, "E-mail"),
    Column::unsortable(ServiceProviderField::Phone, "Telefone"),
    Column::unsortable(ServiceProviderField::Status, "Status"),
    Column::new(ServiceProviderField::CreatedAt, "Cadastrado em"),
];

/// A registered service provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceProvider {
    pub id: Uuid,
    pub name: String,

    /// CPF or CNPJ
    pub document: String,

    /// Kind of service (e.g., "veterinário", "transporte")
    pub service_type: String,

    pub email: Option<String>,
    pub phone: String,
    pub city: Option<String>,
    pub status: RecordStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl_entity!(ServiceProvider, "service_provider", "service_providers");

impl ServiceProvider {
    pub fn new(
        name: impl Into<String>,
        document: impl Into<String>,
        service_type: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            document: document.into(),
            service_type: service_type.into(),
            email: None,
            phone: phone.into(),
            city: None,
            status: RecordStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
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

impl Queryable for ServiceProvider {
    type Field = ServiceProviderField;

    fn field_value(
        &self,
        field: ServiceProviderField,
        _context: &ProjectionContext,
    ) -> Option<FieldValue> {
        let value = match field {
            ServiceProviderField::Name => FieldValue::from(self.name.as_str()),
            ServiceProviderField::Document => FieldValue::from(self.document.as_str()),
            ServiceProviderField::ServiceType => FieldValue::from(self.service_type.as_str()),
            ServiceProviderField::Email => FieldValue::from(self.email.clone()),
            ServiceProviderField::Phone => FieldValue::from(self.phone.as_str()),
            ServiceProviderField::City => FieldValue::from(self.city.clone()),
            ServiceProviderField::Status => FieldValue::from(self.status),
            ServiceProviderField::CreatedAt => FieldValue::from(self.created_at),
        };
        Some(value)
    }
}

impl ListEntity for ServiceProvider {
    fn list_descriptor() -> ListDescriptor<ServiceProviderField> {
        ListDescriptor::new(Self::entity_type(), SEARCHABLE_FIELDS)
            .with_filter(ServiceProviderField::Status)
            .with_default_sort(SortSpec::desc(ServiceProviderField::CreatedAt))
            .with_columns(COLUMNS)
    }
}

impl Validate for ServiceProvider {
    fn validate(&self) -> Result<(), ValidationError> {
        Validator::new()
            .field("name", self.name.as_str(), &[&required(), &string_length(2, 120)])
            .field(
                "document",
                self.document.as_str(),
                &[&required(), &format(FieldFormat::Document)],
            )
            .field(
                "service_type",
                self.service_type.as_str(),
                &[&required(), &string_length(2, 60)],
            )
            .field("email", self.email.clone(), &[&format(FieldFormat::Email)])
            .field("phone", self.phone.as_str(), &[&required(), &format(FieldFormat::Phone)])
            .finish()
    }
}
