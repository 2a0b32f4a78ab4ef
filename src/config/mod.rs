//! Configuration loading and management
//!
//! List pages ship with built-in descriptors; a YAML document can override
//! page size, default sort and page reset behavior per entity type:
//!
//! ```yaml
//! event_bus_capacity: 256
//! lists:
//!   animal:
//!     items_per_page: 25
//!     default_sort: birth_date:desc
//!   supplier:
//!     reset_page_on_change: false
//! ```

use crate::core::error::ConfigError;
use crate::core::events::EventBus;
use crate::core::field::QueryField;
use crate::entities::{
    Animal, Buyer, Employee, Location, Property, ServiceProvider, Supplier,
};
use crate::query::{ListDescriptor, ListEntity, ResetPolicy, SortSpec};
use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

const DEFAULT_EVENT_BUS_CAPACITY: usize = 1024;

fn default_event_bus_capacity() -> usize {
    DEFAULT_EVENT_BUS_CAPACITY
}

/// Overrides of one entity's list page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListConfig {
    /// Rows per page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items_per_page: Option<usize>,

    /// Default sort expression (`field:asc` / `field:desc`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_sort: Option<String>,

    /// Whether search and filter changes go back to page 1
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reset_page_on_change: Option<bool>,
}

impl ListConfig {
    /// Apply these overrides to a descriptor
    pub fn apply<F: QueryField>(
        &self,
        mut descriptor: ListDescriptor<F>,
    ) -> Result<ListDescriptor<F>, ConfigError> {
        if let Some(items_per_page) = self.items_per_page {
            if items_per_page == 0 {
                return Err(ConfigError::InvalidItemsPerPage {
                    entity_type: descriptor.entity_type.to_string(),
                });
            }
            descriptor = descriptor.with_items_per_page(items_per_page);
        }

        if let Some(expr) = &self.default_sort {
            let sort = SortSpec::parse(expr).ok_or_else(|| ConfigError::UnknownSortField {
                entity_type: descriptor.entity_type.to_string(),
                field: expr.clone(),
            })?;
            descriptor = descriptor.with_default_sort(sort);
        }

        if let Some(reset) = self.reset_page_on_change {
            let policy = if reset {
                ResetPolicy::FirstPage
            } else {
                ResetPolicy::Keep
            };
            descriptor = descriptor.with_reset_policy(policy);
        }

        Ok(descriptor)
    }
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Buffer of the entity event bus
    #[serde(default = "default_event_bus_capacity")]
    pub event_bus_capacity: usize,

    /// List page overrides, keyed by entity type
    #[serde(default)]
    pub lists: IndexMap<String, ListConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            event_bus_capacity: DEFAULT_EVENT_BUS_CAPACITY,
            lists: IndexMap::new(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file {}", path.display()))?;
        let config = Self::from_yaml_str(&content)
            .with_context(|| format!("Invalid configuration file {}", path.display()))?;

        tracing::info!(
            path = %path.display(),
            lists = config.lists.len(),
            "configuration loaded"
        );
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self =
            serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check every list section against the known entity types and fields
    pub fn validate(&self) -> Result<(), ConfigError> {
        for entity_type in self.lists.keys() {
            let result = match entity_type.as_str() {
                "property" => self.descriptor_for::<Property>().map(drop),
                "animal" => self.descriptor_for::<Animal>().map(drop),
                "location" => self.descriptor_for::<Location>().map(drop),
                "supplier" => self.descriptor_for::<Supplier>().map(drop),
                "buyer" => self.descriptor_for::<Buyer>().map(drop),
                "employee" => self.descriptor_for::<Employee>().map(drop),
                "service_provider" => self.descriptor_for::<ServiceProvider>().map(drop),
                other => Err(ConfigError::UnknownEntity {
                    entity_type: other.to_string(),
                }),
            };

            if let Err(e) = result {
                tracing::warn!(entity_type = %entity_type, error = %e, "rejected list configuration");
                return Err(e);
            }
        }
        Ok(())
    }

    /// The entity's list descriptor with this configuration's overrides
    pub fn descriptor_for<T: ListEntity>(&self) -> Result<ListDescriptor<T::Field>, ConfigError> {
        let descriptor = T::list_descriptor();
        match self.lists.get(descriptor.entity_type) {
            Some(list) => list.apply(descriptor),
            None => Ok(descriptor),
        }
    }

    /// Event bus sized by this configuration
    pub fn event_bus(&self) -> EventBus {
        EventBus::new(self.event_bus_capacity)
    }
}
