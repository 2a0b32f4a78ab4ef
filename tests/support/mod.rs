//! Shared fixtures for the integration tests
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod support;
//! use support::*;
//! ```

#![allow(dead_code, unused_macros)]

#[macro_use]
pub mod repository_tests;

use boi::prelude::*;
use chrono::{Duration, TimeZone};
use std::sync::Once;

/// Reference date of every projection in the tests
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

pub fn context() -> ProjectionContext {
    ProjectionContext::at(today())
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Registration timestamp `minutes` after a fixed origin
pub fn at(minutes: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap() + Duration::minutes(minutes)
}

/// Install a test subscriber honoring `RUST_LOG` (once per test binary)
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// `count` active animals registered one minute apart, in registration order
pub fn numbered_animals(count: usize) -> Vec<Animal> {
    (0..count)
        .map(|i| {
            Animal::new(format!("BR-{:03}", i + 1), "Nelore", Sex::Female, date(2022, 1, 10))
                .with_created_at(at(i as i64))
        })
        .collect()
}

/// A small mixed herd
///
/// | code   | name    | breed        | sex    | born       | status   |
/// |--------|---------|--------------|--------|------------|----------|
/// | BR-001 | Mimosa  | Angus        | female | 2022-12-15 | active   |
/// | BR-002 | -       | Nelore       | male   | 2021-03-01 | inactive |
/// | BR-003 | Estrela | Red Angus    | female | 2023-06-15 | active   |
/// | BR-004 | Trovão  | Gir Leiteiro | male   | 2020-01-20 | sold     |
/// | BR-005 | Ébano   | Brahman      | male   | 2022-12-01 | inactive |
pub fn herd() -> Vec<Animal> {
    vec![
        Animal::new("BR-001", "Angus", Sex::Female, date(2022, 12, 15))
            .with_name("Mimosa")
            .with_weight(410.0)
            .with_created_at(at(10)),
        Animal::new("BR-002", "Nelore", Sex::Male, date(2021, 3, 1))
            .with_weight(520.5)
            .with_status(AnimalStatus::Inactive)
            .with_created_at(at(20)),
        Animal::new("BR-003", "Red Angus", Sex::Female, date(2023, 6, 15))
            .with_name("Estrela")
            .with_created_at(at(30)),
        Animal::new("BR-004", "Gir Leiteiro", Sex::Male, date(2020, 1, 20))
            .with_name("Trovão")
            .with_weight(610.0)
            .with_status(AnimalStatus::Sold)
            .with_created_at(at(40)),
        Animal::new("BR-005", "Brahman", Sex::Male, date(2022, 12, 1))
            .with_name("Ébano")
            .with_weight(480.0)
            .with_status(AnimalStatus::Inactive)
            .with_created_at(at(50)),
    ]
}

/// Codes of a result, in order
pub fn codes<'a>(animals: impl IntoIterator<Item = &'a Animal>) -> Vec<&'a str> {
    animals.into_iter().map(|a| a.code.as_str()).collect()
}

pub fn buyer(name: &str) -> Buyer {
    Buyer::new(name, "529.982.247-25", "(62) 99876-5432", "Goiânia", "GO")
}
