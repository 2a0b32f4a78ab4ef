//! Registrable records of the farm management system
//!
//! Each entity declares its field enum, how each field is read for the list
//! pipeline, its list page descriptor and its validation rules.

#[macro_use]
mod macros;

pub mod animal;
pub mod buyer;
pub mod employee;
pub mod location;
pub mod property;
pub mod service_provider;
pub mod supplier;

pub use animal::{Animal, AnimalField, AnimalStatus, Sex};
pub use buyer::{Buyer, BuyerField};
pub use employee::{Employee, EmployeeField};
pub use location::{Location, LocationField, LocationKind};
pub use property::{Property, PropertyField};
pub use service_provider::{ServiceProvider, ServiceProviderField};
pub use supplier::{Supplier, SupplierField};

/// Entity type names of every list page
pub const ENTITY_TYPES: &[&str] = &[
    "property",
    "animal",
    "location",
    "supplier",
    "buyer",
    "employee",
    "service_provider",
];

/// Brazilian state abbreviations (UF)
pub const BRAZILIAN_STATES: &[&str] = &[
    "AC", "AL", "AP", "AM", "BA", "CE", "DF", "ES", "GO", "MA", "MT", "MS", "MG", "PA", "PB", "PR",
    "PE", "PI", "RJ", "RN", "RS", "RO", "RR", "SC", "SP", "SE", "TO",
];

value_enum! {
    /// Status of records that are simply active or not
    #[derive(Default)]
    pub enum RecordStatus {
        #[default]
        Active => "active",
        Inactive => "inactive",
    }
}
