//! Animal (head of cattle) registration

use crate::core::entity::{Entity, ProjectionContext, Queryable};
use crate::core::error::ValidationError;
use crate::core::field::FieldValue;
use crate::core::validation::{
    Validate, Validator, date_not_after, max_value, positive, required, string_length,
};
use crate::query::{Column, ListDescriptor, ListEntity, SortSpec};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

value_enum! {
    /// Lifecycle status of an animal
    #[derive(Default)]
    pub enum AnimalStatus {
        #[default]
        Active => "active",
        Inactive => "inactive",
        Sold => "sold",
        Deceased => "deceased",
    }
}

value_enum! {
    pub enum Sex {
        Male => "male",
        Female => "female",
    }
}

query_fields! {
    /// Fields of an animal; `AgeInMonths` is computed from the birth date
    pub enum AnimalField {
        Code => "code",
        Name => "name",
        Breed => "breed",
        Sex => "sex",
        BirthDate => "birth_date",
        AgeInMonths => "age_in_months",
        Weight => "weight",
        PropertyId => "property_id",
        Status => "status",
        CreatedAt => "created_at",
    }
}

const SEARCHABLE_FIELDS: &[AnimalField] = &[
    AnimalField::Code,
    AnimalField::Name,
    AnimalField::Breed,
    AnimalField::Sex,
    AnimalField::AgeInMonths,
];

const COLUMNS: &[Column<AnimalField>] = &[
    Column::new(AnimalField::Code, "Código"),
    Column::new(AnimalField::Name, "Nome"),
    Column::new(AnimalField::Breed, "Raça"),
    Column::new(AnimalField::Sex, "Sexo"),
    Column::new(AnimalField::AgeInMonths, "Idade (meses)"),
    Column::new(AnimalField::Weight, "Peso (kg)"),
    Column::unsortable(AnimalField::Status, "Status"),
    Column::new(AnimalField::CreatedAt, "Cadastrado em"),
];

/// A registered animal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Animal {
    pub id: Uuid,

    /// Ear tag or internal code
    pub code: String,

    pub name: Option<String>,
    pub breed: String,
    pub sex: Sex,
    pub birth_date: NaiveDate,

    /// Last weighing, in kilograms
    pub weight: Option<f64>,

    /// Property the animal is kept on
    pub property_id: Option<Uuid>,

    pub status: AnimalStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl_entity!(Animal, "animal", "animals");

impl Animal {
    /// Create a new active animal
    pub fn new(code: impl Into<String>, breed: impl Into<String>, sex: Sex, birth_date: NaiveDate) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            code: code.into(),
            name: None,
            breed: breed.into(),
            sex,
            birth_date,
            weight: None,
            property_id: None,
            status: AnimalStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    pub fn with_property(mut self, property_id: Uuid) -> Self {
        self.property_id = Some(property_id);
        self
    }

    pub fn with_status(mut self, status: AnimalStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self.updated_at = created_at;
        self
    }

    /// Whole months elapsed since birth on `today`, never negative
    pub fn age_in_months(&self, today: NaiveDate) -> u32 {
        let born = self.birth_date;
        let mut months = (today.year() - born.year()) * 12 + today.month() as i32 - born.month() as i32;
        if today.day() < born.day() {
            months -= 1;
        }
        u32::try_from(months).unwrap_or(0)
    }

    /// Update the updated_at timestamp to now
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Queryable for Animal {
    type Field = AnimalField;

    fn field_value(&self, field: AnimalField, context: &ProjectionContext) -> Option<FieldValue> {
        let value = match field {
            AnimalField::Code => FieldValue::from(self.code.as_str()),
            AnimalField::Name => FieldValue::from(self.name.clone()),
            AnimalField::Breed => FieldValue::from(self.breed.as_str()),
            AnimalField::Sex => FieldValue::from(self.sex),
            AnimalField::BirthDate => FieldValue::from(self.birth_date),
            AnimalField::AgeInMonths => FieldValue::from(self.age_in_months(context.today)),
            AnimalField::Weight => FieldValue::from(self.weight),
            AnimalField::PropertyId => FieldValue::from(self.property_id),
            AnimalField::Status => FieldValue::from(self.status),
            AnimalField::CreatedAt => FieldValue::from(self.created_at),
        };
        Some(value)
    }
}

impl ListEntity for Animal {
    fn list_descriptor() -> ListDescriptor<AnimalField> {
        ListDescriptor::new(Self::entity_type(), SEARCHABLE_FIELDS)
            .with_filter(AnimalField::Status)
            .with_default_sort(SortSpec::desc(AnimalField::CreatedAt))
            .with_columns(COLUMNS)
    }
}

impl Validate for Animal {
    fn validate(&self) -> Result<(), ValidationError> {
        let today = Utc::now().date_naive();
        Validator::new()
            .field("code", self.code.as_str(), &[&required(), &string_length(1, 20)])
            .field("name", self.name.clone(), &[&string_length(1, 60)])
            .field("breed", self.breed.as_str(), &[&required(), &string_length(2, 60)])
            .field("birth_date", self.birth_date, &[&date_not_after(today)])
            .field("weight", self.weight, &[&positive(), &max_value(2000.0)])
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::field::QueryField;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_age_in_months() {
        let animal = Animal::new("BR-001", "Nelore", Sex::Female, date(2022, 3, 15));

        assert_eq!(animal.age_in_months(date(2022, 3, 15)), 0);
        assert_eq!(animal.age_in_months(date(2022, 4, 14)), 0);
        assert_eq!(animal.age_in_months(date(2022, 4, 15)), 1);
        assert_eq!(animal.age_in_months(date(2024, 3, 20)), 24);
        // Born after the reference date
        assert_eq!(animal.age_in_months(date(2021, 1, 1)), 0);
    }

    #[test]
    fn test_age_is_projected_from_context() {
        let animal = Animal::new("BR-001", "Nelore", Sex::Female, date(2023, 1, 10));
        let context = ProjectionContext::at(date(2024, 1, 10));

        assert_eq!(
            animal.field_value(AnimalField::AgeInMonths, &context),
            Some(FieldValue::Integer(12))
        );
    }

    #[test]
    fn test_optional_fields_project_to_null() {
        let animal = Animal::new("BR-002", "Angus", Sex::Male, date(2023, 1, 10));
        let context = ProjectionContext::at(date(2024, 1, 10));

        assert_eq!(animal.field_value(AnimalField::Name, &context), Some(FieldValue::Null));
        assert_eq!(animal.field_value(AnimalField::Weight, &context), Some(FieldValue::Null));
        assert_eq!(
            animal.field_value(AnimalField::Sex, &context),
            Some(FieldValue::from("male"))
        );
    }

    #[test]
    fn test_descriptor() {
        let descriptor = Animal::list_descriptor();
        assert_eq!(descriptor.entity_type, "animal");
        assert_eq!(descriptor.filter_field, Some(AnimalField::Status));
        assert_eq!(descriptor.default_sort, Some(SortSpec::desc(AnimalField::CreatedAt)));
        assert_eq!(descriptor.items_per_page, 10);
        assert!(descriptor.searchable_fields.contains(&AnimalField::AgeInMonths));
        assert!(AnimalField::BirthDate.is_date_like());
    }

    #[test]
    fn test_validation() {
        let valid = Animal::new("BR-003", "Gir", Sex::Female, date(2020, 5, 1)).with_weight(420.0);
        assert!(valid.validate().is_ok());

        let mut invalid = Animal::new("", "G", Sex::Female, date(2020, 5, 1)).with_weight(-3.0);
        invalid.birth_date = Utc::now().date_naive() + chrono::Days::new(30);

        let err = invalid.validate().unwrap_err();
        assert!(err.has_field("code"));
        assert!(err.has_field("breed"));
        assert!(err.has_field("birth_date"));
        assert!(err.has_field("weight"));
        assert!(!err.has_field("name"));
    }

    #[test]
    fn test_serialization() {
        let animal = Animal::new("BR-004", "Angus", Sex::Male, date(2021, 7, 2))
            .with_status(AnimalStatus::Sold);
        let json = serde_json::to_value(&animal).unwrap();

        assert_eq!(json["status"], "sold");
        assert_eq!(json["sex"], "male");
        assert_eq!(json["birth_date"], "2021-07-02");
        assert!(!animal.is_active());
    }
}
