//! Data sources feeding the list pages

pub mod in_memory;

pub use in_memory::InMemoryRepository;

use crate::core::entity::Entity;
use crate::core::error::BoiError;
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

/// Repository of one entity type
///
/// Implementations provide CRUD operations; list pages only ever read the
/// [`list`](Repository::list) snapshot and run the query pipeline over it.
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// Create a new entity
    async fn create(&self, entity: T) -> Result<T, BoiError>;

    /// Get an entity by ID
    async fn get(&self, id: &Uuid) -> Result<Option<T>, BoiError>;

    /// Snapshot of every entity, in insertion order
    async fn list(&self) -> Result<Arc<[T]>, BoiError>;

    /// Replace an existing entity
    async fn update(&self, id: &Uuid, entity: T) -> Result<T, BoiError>;

    /// Delete an entity
    async fn delete(&self, id: &Uuid) -> Result<(), BoiError>;
}
