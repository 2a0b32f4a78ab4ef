//! Farm employee registration

use crate::core::entity::{Entity, ProjectionContext, Queryable};
use crate::core::error::ValidationError;
use crate::core::field::{FieldFormat, FieldValue};
use crate::core::validation::{
    Validate, Validator, date_not_after, format, non_negative, required, string_length,
};
use crate::entities::RecordStatus;
use crate::query::{Column, ListDescriptor, ListEntity, SortSpec};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

query_fields! {
    pub enum EmployeeField {
        Name => "name",
        Cpf => "cpf",
        Role => "role",
        Email => "email",
        Phone => "phone",
        HireDate => "hire_date",
        Salary => "salary",
        Status => "status",
        CreatedAt => "created_at",
    }
}

const SEARCHABLE_FIELDS: &[EmployeeField] = &[
    EmployeeField::Name,
    EmployeeField::Cpf,
    EmployeeField::Role,
    EmployeeField::Email,
    EmployeeField::Phone,
];

const COLUMNS: &[Column<EmployeeField>] = &[
    Column::new(EmployeeField::Name, "Nome"),
    Column::unsortable(EmployeeField::Cpf, "CPF"),
    Column::new(EmployeeField::Role, "Função"),
    Column::unsortable(EmployeeField::Phone, "Telefone"),
    Column::new(EmployeeField::HireDate, "Admissão"),
    Column::unsortable(EmployeeField::Status, "Status"),
    Column::new(EmployeeField::CreatedAt, "Cadastrado em"),
];

/// A registered employee
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: Uuid,
    pub name: String,
    pub cpf: String,

    /// Job title (e.g., "vaqueiro", "gerente")
    pub role: String,

    pub email: Option<String>,
    pub phone: String,
    pub hire_date: NaiveDate,

    /// Monthly salary, in BRL
    pub salary: Option<f64>,

    pub status: RecordStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl_entity!(Employee, "employee", "employees");

impl Employee {
    pub fn new(
        name: impl Into<String>,
        cpf: impl Into<String>,
        role: impl Into<String>,
        phone: impl Into<String>,
        hire_date: NaiveDate,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            cpf: cpf.into(),
            role: role.into(),
            email: None,
            phone: phone.into(),
            hire_date,
            salary: None,
            status: RecordStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_salary(mut self, salary: f64) -> Self {
        self.salary = Some(salary);
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

impl Queryable for Employee {
    type Field = EmployeeField;

    fn field_value(&self, field: EmployeeField, _context: &ProjectionContext) -> Option<FieldValue> {
        let value = match field {
            EmployeeField::Name => FieldValue::from(self.name.as_str()),
            EmployeeField::Cpf => FieldValue::from(self.cpf.as_str()),
            EmployeeField::Role => FieldValue::from(self.role.as_str()),
            EmployeeField::Email => FieldValue::from(self.email.clone()),
            EmployeeField::Phone => FieldValue::from(self.phone.as_str()),
            EmployeeField::HireDate => FieldValue::from(self.hire_date),
            EmployeeField::Salary => FieldValue::from(self.salary),
            EmployeeField::Status => FieldValue::from(self.status),
            EmployeeField::CreatedAt => FieldValue::from(self.created_at),
        };
        Some(value)
    }
}

impl ListEntity for Employee {
    fn list_descriptor() -> ListDescriptor<EmployeeField> {
        ListDescriptor::new(Self::entity_type(), SEARCHABLE_FIELDS)
            .with_filter(EmployeeField::Status)
            .with_default_sort(SortSpec::desc(EmployeeField::CreatedAt))
            .with_columns(COLUMNS)
    }
}

impl Validate for Employee {
    fn validate(&self) -> Result<(), ValidationError> {
        let today = Utc::now().date_naive();
        Validator::new()
            .field("name", self.name.as_str(), &[&required(), &string_length(2, 120)])
            .field("cpf", self.cpf.as_str(), &[&required(), &format(FieldFormat::Cpf)])
            .field("role", self.role.as_str(), &[&required(), &string_length(2, 60)])
            .field("email", self.email.clone(), &[&format(FieldFormat::Email)])
            .field("phone", self.phone.as_str(), &[&required(), &format(FieldFormat::Phone)])
            .field("hire_date", self.hire_date, &[&date_not_after(today)])
            .field("salary", self.salary, &[&non_negative()])
            .finish()
    }
}
