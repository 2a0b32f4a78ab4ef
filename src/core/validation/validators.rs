//! Reusable field validators
//!
//! Each validator is a closure `(field, value) -> Result<(), message>` so entity
//! rules can be listed declaratively in a [`Validator`](super::Validator) chain.

use crate::core::field::{FieldFormat, FieldValue};
use chrono::NaiveDate;

/// Validator: field is required (not null, not blank)
pub fn required() -> impl Fn(&str, &FieldValue) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &FieldValue| match value {
        FieldValue::Null => Err(format!("O campo '{}' é obrigatório", field)),
        FieldValue::String(s) if s.trim().is_empty() => {
            Err(format!("O campo '{}' é obrigatório", field))
        }
        _ => Ok(()),
    }
}

/// Validator: number must be positive
pub fn positive() -> impl Fn(&str, &FieldValue) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &FieldValue| match value.as_number() {
        Some(num) if num <= 0.0 => Err(format!(
            "O campo '{}' deve ser positivo (valor: {})",
            field, num
        )),
        _ => Ok(()),
    }
}

/// Validator: number must not be negative
pub fn non_negative() -> impl Fn(&str, &FieldValue) -> Result<(), String> + Send + Sync + Clone
{
    |field: &str, value: &FieldValue| match value.as_number() {
        Some(num) if num < 0.0 => Err(format!(
            "O campo '{}' não pode ser negativo (valor: {})",
            field, num
        )),
        _ => Ok(()),
    }
}

/// Validator: string length (in characters) must be within range
pub fn string_length(
    min: usize,
    max: usize,
) -> impl Fn(&str, &FieldValue) -> Result<(), String> + Send + Sync + Clone {
    move |field: &str, value: &FieldValue| {
        let Some(s) = value.as_string() else {
            return Ok(());
        };
        let len = s.trim().chars().count();
        if len < min {
            Err(format!(
                "'{}' deve ter pelo menos {} caracteres (atual: {})",
                field, min, len
            ))
        } else if len > max {
            Err(format!(
                "'{}' não pode exceder {} caracteres (atual: {})",
                field, max, len
            ))
        } else {
            Ok(())
        }
    }
}

/// Validator: number must not exceed maximum
pub fn max_value(max: f64) -> impl Fn(&str, &FieldValue) -> Result<(), String> + Send + Sync + Clone {
    move |field: &str, value: &FieldValue| match value.as_number() {
        Some(num) if num > max => Err(format!(
            "'{}' não pode exceder {} (valor: {})",
            field, max, num
        )),
        _ => Ok(()),
    }
}

/// Validator: value must be in allowed list
pub fn in_list(
    allowed: &'static [&'static str],
) -> impl Fn(&str, &FieldValue) -> Result<(), String> + Send + Sync + Clone {
    move |field: &str, value: &FieldValue| match value.as_string() {
        Some(s) if !allowed.contains(&s) => Err(format!(
            "'{}' deve ser um dos valores: {:?} (atual: {})",
            field, allowed, s
        )),
        _ => Ok(()),
    }
}

/// Validator: non-empty strings must match a format; blanks are left to `required`
pub fn format(
    format: FieldFormat,
) -> impl Fn(&str, &FieldValue) -> Result<(), String> + Send + Sync + Clone {
    move |field: &str, value: &FieldValue| match value.as_string() {
        Some(s) if !s.trim().is_empty() && !format.validate(value) => Err(format!(
            "'{}' não é um {} válido (atual: {})",
            field,
            format.label(),
            s
        )),
        _ => Ok(()),
    }
}

/// Validator: date must not be later than `limit`
pub fn date_not_after(
    limit: NaiveDate,
) -> impl Fn(&str, &FieldValue) -> Result<(), String> + Send + Sync + Clone {
    move |field: &str, value: &FieldValue| match value {
        FieldValue::Date(date) if *date > limit => Err(format!(
            "'{}' não pode ser posterior a {} (atual: {})",
            field,
            limit.format("%d/%m/%Y"),
            date.format("%d/%m/%Y")
        )),
        _ => Ok(()),
    }
}
