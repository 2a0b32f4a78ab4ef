//! Field value types, field identifiers and format validation

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::OnceLock;
use uuid::Uuid;

/// Field names treated as dates when sorting, whatever their stored representation
pub const DATE_LIKE_FIELDS: &[&str] = &[
    "birth_date",
    "created_at",
    "updated_at",
    "acquisition_date",
    "hire_date",
];

/// A polymorphic field value that can hold different types
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Uuid(Uuid),
    DateTime(DateTime<Utc>),
    Date(NaiveDate),
    Null,
}

impl FieldValue {
    /// Get the value as a string if possible
    pub fn as_string(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as an integer if possible
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Numeric view of the value; NaN is not a number for our purposes
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Integer(i) => Some(*i as f64),
            FieldValue::Float(f) if !f.is_nan() => Some(*f),
            _ => None,
        }
    }

    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Canonical text form of the value, as shown in a table cell
    ///
    /// Dates render as `YYYY-MM-DD`, timestamps as RFC 3339. `Null` has no text.
    pub fn as_text(&self) -> Option<String> {
        match self {
            FieldValue::String(s) => Some(s.clone()),
            FieldValue::Integer(i) => Some(i.to_string()),
            FieldValue::Float(f) => Some(f.to_string()),
            FieldValue::Boolean(b) => Some(b.to_string()),
            FieldValue::Uuid(u) => Some(u.to_string()),
            FieldValue::DateTime(dt) => Some(dt.to_rfc3339()),
            FieldValue::Date(d) => Some(d.format("%Y-%m-%d").to_string()),
            FieldValue::Null => None,
        }
    }

    /// Lower-cased text form used for free-text search
    pub fn search_text(&self) -> Option<String> {
        self.as_text().map(|text| text.to_lowercase())
    }

    /// Millisecond timestamp for date-like values
    ///
    /// Strings are accepted in RFC 3339, `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM:SS`
    /// and `DD/MM/YYYY` forms. Integers are taken as epoch milliseconds.
    pub fn timestamp(&self) -> Option<i64> {
        match self {
            FieldValue::DateTime(dt) => Some(dt.timestamp_millis()),
            FieldValue::Date(d) => Some(midnight_millis(*d)),
            FieldValue::Integer(i) => Some(*i),
            FieldValue::String(s) => parse_timestamp(s),
            _ => None,
        }
    }
}

fn midnight_millis(date: NaiveDate) -> i64 {
    date.and_time(chrono::NaiveTime::MIN)
        .and_utc()
        .timestamp_millis()
}

fn parse_timestamp(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.timestamp_millis());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.and_utc().timestamp_millis());
    }
    ["%Y-%m-%d", "%d/%m/%Y"]
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
        .map(midnight_millis)
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::String(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::Integer(i64::from(value))
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}

impl From<Uuid> for FieldValue {
    fn from(value: Uuid) -> Self {
        FieldValue::Uuid(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        FieldValue::DateTime(value)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(value: NaiveDate) -> Self {
        FieldValue::Date(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}

/// Identifier of a queryable field of one entity type
///
/// Implemented by a fieldless enum per entity (see [`query_fields!`](crate::query_fields)),
/// so the set of sortable/searchable keys is checked by the compiler instead of
/// being looked up by string at query time.
pub trait QueryField: Copy + Eq + Hash + Debug + Send + Sync + 'static {
    /// Stable snake_case key of the field
    fn key(&self) -> &'static str;

    /// Every field of the entity, in declaration order
    fn all() -> &'static [Self];

    /// Position of the field in [`QueryField::all`]
    fn index(&self) -> usize;

    /// Resolve a key, accepting both `birth_date` and `birthDate` spellings
    fn parse(key: &str) -> Option<Self> {
        let wanted = key.replace('_', "");
        Self::all()
            .iter()
            .copied()
            .find(|field| field.key().replace('_', "").eq_ignore_ascii_case(&wanted))
    }

    /// Whether the field holds a date and must be compared as a timestamp
    fn is_date_like(&self) -> bool {
        DATE_LIKE_FIELDS.contains(&self.key())
    }
}

/// Field format validators for registration forms
#[derive(Debug, Clone)]
pub enum FieldFormat {
    Email,
    /// Brazilian phone number: 10 or 11 digits, optional `+55` prefix
    Phone,
    /// Brazilian individual taxpayer id, with check digits
    Cpf,
    /// Brazilian company taxpayer id, with check digits
    Cnpj,
    /// Either a CPF or a CNPJ
    Document,
    Custom(Regex),
}

impl FieldFormat {
    /// Validate a field value against this format
    pub fn validate(&self, value: &FieldValue) -> bool {
        let string_value = match value.as_string() {
            Some(s) => s,
            None => return false,
        };

        match self {
            FieldFormat::Email => Self::is_valid_email(string_value),
            FieldFormat::Phone => Self::is_valid_phone(string_value),
            FieldFormat::Cpf => Self::is_valid_cpf(string_value),
            FieldFormat::Cnpj => Self::is_valid_cnpj(string_value),
            FieldFormat::Document => {
                Self::is_valid_cpf(string_value) || Self::is_valid_cnpj(string_value)
            }
            FieldFormat::Custom(regex) => regex.is_match(string_value),
        }
    }

    /// Short Portuguese label used in validation messages
    pub fn label(&self) -> &'static str {
        match self {
            FieldFormat::Email => "e-mail",
            FieldFormat::Phone => "telefone",
            FieldFormat::Cpf => "CPF",
            FieldFormat::Cnpj => "CNPJ",
            FieldFormat::Document => "CPF/CNPJ",
            FieldFormat::Custom(_) => "padrão",
        }
    }

    fn is_valid_email(email: &str) -> bool {
        static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = EMAIL_REGEX.get_or_init(|| {
            Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
                .expect("email pattern is valid")
        });
        regex.is_match(email)
    }

    fn is_valid_phone(phone: &str) -> bool {
        static PHONE_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = PHONE_REGEX.get_or_init(|| {
            // Area code + 8 or 9 digit subscriber number
            Regex::new(r"^(?:55)?[1-9]{2}\d{8,9}$").expect("phone pattern is valid")
        });
        let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
        let allowed = phone
            .chars()
            .all(|c| c.is_ascii_digit() || " +-()".contains(c));
        allowed && regex.is_match(&digits)
    }

    fn is_valid_cpf(cpf: &str) -> bool {
        let Some(digits) = Self::document_digits(cpf, 11) else {
            return false;
        };

        [9, 10].iter().all(|&len| {
            let sum: u32 = digits[..len]
                .iter()
                .enumerate()
                .map(|(i, d)| d * (len as u32 + 1 - i as u32))
                .sum();
            let check = (sum * 10) % 11 % 10;
            check == digits[len]
        })
    }

    fn is_valid_cnpj(cnpj: &str) -> bool {
        const WEIGHTS: [u32; 13] = [6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];
        let Some(digits) = Self::document_digits(cnpj, 14) else {
            return false;
        };

        [12, 13].iter().all(|&len| {
            let weights = &WEIGHTS[13 - len..];
            let sum: u32 = digits[..len].iter().zip(weights).map(|(d, w)| d * w).sum();
            let rest = sum % 11;
            let check = if rest < 2 { 0 } else { 11 - rest };
            check == digits[len]
        })
    }

    /// Digits of a punctuated document, rejecting wrong lengths and repeated digits
    fn document_digits(raw: &str, expected_len: usize) -> Option<Vec<u32>> {
        if !raw
            .chars()
            .all(|c| c.is_ascii_digit() || ".-/ ".contains(c))
        {
            return None;
        }
        let digits: Vec<u32> = raw.chars().filter_map(|c| c.to_digit(10)).collect();
        if digits.len() != expected_len || digits.iter().all(|d| *d == digits[0]) {
            return None;
        }
        Some(digits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum SampleField {
        BirthDate,
        Name,
    }

    impl QueryField for SampleField {
        fn key(&self) -> &'static str {
            match self {
                SampleField::BirthDate => "birth_date",
                SampleField::Name => "name",
            }
        }

        fn all() -> &'static [Self] {
            &[SampleField::BirthDate, SampleField::Name]
        }

        fn index(&self) -> usize {
            *self as usize
        }
    }

    #[test]
    fn test_field_value_string() {
        let value = FieldValue::String("Nelore".to_string());
        assert_eq!(value.as_string(), Some("Nelore"));
        assert_eq!(value.as_integer(), None);
        assert_eq!(value.search_text().as_deref(), Some("nelore"));
    }

    #[test]
    fn test_field_value_null_has_no_text() {
        let value = FieldValue::Null;
        assert!(value.is_null());
        assert_eq!(value.search_text(), None);
        assert_eq!(value.timestamp(), None);
    }

    #[test]
    fn test_numeric_coercion() {
        assert_eq!(FieldValue::Integer(42).search_text().as_deref(), Some("42"));
        assert_eq!(FieldValue::Float(3.0).as_text().as_deref(), Some("3"));
        assert_eq!(FieldValue::Float(f64::NAN).as_number(), None);
        assert_eq!(FieldValue::Integer(7).as_number(), Some(7.0));
    }

    #[test]
    fn test_timestamp_parsing() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let expected = FieldValue::Date(date).timestamp();

        assert!(expected.is_some());
        assert_eq!(FieldValue::from("2024-03-01").timestamp(), expected);
        assert_eq!(FieldValue::from("01/03/2024").timestamp(), expected);
        assert_eq!(
            FieldValue::from("2024-03-01T00:00:00Z").timestamp(),
            expected
        );
        assert_eq!(FieldValue::from("not a date").timestamp(), None);
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(FieldValue::from(None::<String>), FieldValue::Null);
        assert_eq!(
            FieldValue::from(Some("x")),
            FieldValue::String("x".to_string())
        );
    }

    #[test]
    fn test_query_field_parse_accepts_camel_case() {
        assert_eq!(SampleField::parse("birth_date"), Some(SampleField::BirthDate));
        assert_eq!(SampleField::parse("birthDate"), Some(SampleField::BirthDate));
        assert_eq!(SampleField::parse("name"), Some(SampleField::Name));
        assert_eq!(SampleField::parse("weight"), None);
    }

    #[test]
    fn test_date_like_detection() {
        assert!(SampleField::BirthDate.is_date_like());
        assert!(!SampleField::Name.is_date_like());
    }

    #[test]
    fn test_email_validation() {
        let format = FieldFormat::Email;

        assert!(format.validate(&FieldValue::from("contato@fazenda.com.br")));
        assert!(!format.validate(&FieldValue::from("invalid-email")));
        assert!(!format.validate(&FieldValue::from("@fazenda.com")));
    }

    #[test]
    fn test_phone_validation() {
        let format = FieldFormat::Phone;

        assert!(format.validate(&FieldValue::from("(67) 99123-4567")));
        assert!(format.validate(&FieldValue::from("+55 67 3321-4567")));
        assert!(!format.validate(&FieldValue::from("123")));
        assert!(!format.validate(&FieldValue::from("67 9912a-4567")));
    }

    #[test]
    fn test_cpf_validation() {
        let format = FieldFormat::Cpf;

        assert!(format.validate(&FieldValue::from("529.982.247-25")));
        assert!(format.validate(&FieldValue::from("12345678909")));
        assert!(!format.validate(&FieldValue::from("529.982.247-26")));
        assert!(!format.validate(&FieldValue::from("111.111.111-11")));
    }

    #[test]
    fn test_cnpj_validation() {
        let format = FieldFormat::Cnpj;

        assert!(format.validate(&FieldValue::from("11.222.333/0001-81")));
        assert!(format.validate(&FieldValue::from("45.997.418/0001-53")));
        assert!(!format.validate(&FieldValue::from("11.222.333/0001-80")));
    }

    #[test]
    fn test_document_accepts_both() {
        let format = FieldFormat::Document;

        assert!(format.validate(&FieldValue::from("529.982.247-25")));
        assert!(format.validate(&FieldValue::from("11.222.333/0001-81")));
        assert!(!format.validate(&FieldValue::from("1234")));
    }

    #[test]
    fn test_format_validate_rejects_non_string() {
        let format = FieldFormat::Email;
        assert!(!format.validate(&FieldValue::Integer(42)));
        assert!(!format.validate(&FieldValue::Null));
    }

    #[test]
    fn test_custom_regex_validation() {
        let format = FieldFormat::Custom(Regex::new(r"^BR-\d{4}$").unwrap());

        assert!(format.validate(&FieldValue::from("BR-0042")));
        assert!(!format.validate(&FieldValue::from("br-0042")));
    }
}
