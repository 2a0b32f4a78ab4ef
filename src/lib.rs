//! # Boi na Nuvem
//!
//! Entity list query library of a farm and cattle management system.
//!
//! Every registration page (properties, animals, locations, suppliers,
//! buyers, employees, service providers) shows its records through the same
//! pipeline: free-text search, categorical filter, type-aware sort and
//! pagination.
//!
//! ## Features
//!
//! - **One generic pipeline**: configured per entity type by a declarative [`ListDescriptor`](query::ListDescriptor)
//! - **Typed field access**: each entity declares a field enum, no lookups by string
//! - **Precomputed projections**: derived fields (an animal's age) are computed once per collection
//! - **Memoized list controller**: recomputes only when the collection or the query state changes
//! - **Last fetch wins**: stale fetch results are discarded
//! - **Observable stores**: selected property and breadcrumbs on typed watch channels
//! - **Configuration-Based**: per-entity page overrides via YAML
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use boi::prelude::*;
//!
//! let repository = InMemoryRepository::with_items(animals);
//! let mut list = ListQuery::<Animal>::for_entity();
//!
//! let ticket = list.begin_fetch();
//! let collection = repository.list().await?;
//! list.apply_fetch(ticket, collection);
//!
//! list.set_search_term("nelore");
//! list.set_filter_value("active");
//! list.handle_sort_key("birthDate");
//!
//! let page = list.page();
//! println!("{} of {} animals", page.items.len(), page.total_items);
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod query;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Traits ===
    pub use crate::core::{
        entity::{Entity, ProjectionContext, Queryable},
        error::{BoiError, ConfigError, EntityError, StorageError, ValidationError},
        events::{
            Breadcrumb, Breadcrumbs, EntityEvent, EventBus, EventEnvelope, SelectedProperty,
            SelectionStore,
        },
        field::{FieldFormat, FieldValue, QueryField},
        validation::{Validate, Validator},
    };

    // === Macros ===
    pub use crate::{impl_entity, query_fields, value_enum};

    // === Entities ===
    pub use crate::entities::{
        Animal, AnimalField, AnimalStatus, Buyer, BuyerField, Employee, EmployeeField, Location,
        LocationField, LocationKind, Property, PropertyField, RecordStatus, ServiceProvider,
        ServiceProviderField, Sex, Supplier, SupplierField,
    };

    // === Query Pipeline ===
    pub use crate::query::{
        ALL_FILTER, Column, FetchTicket, ListDescriptor, ListEntity, ListQuery, PageResult,
        Paginator, QueryParams, QueryState, ResetPolicy, SortDirection, SortSpec, TableModel,
        paginate, query,
    };

    // === Storage ===
    pub use crate::storage::{InMemoryRepository, Repository};

    // === Config ===
    pub use crate::config::{AppConfig, ListConfig};

    // === External dependencies ===
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, NaiveDate, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use uuid::Uuid;
}
