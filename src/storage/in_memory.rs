//! In-memory repository for development, demos and tests

use crate::core::entity::Entity;
use crate::core::error::{BoiError, EntityError, StorageError};
use crate::core::events::{EntityEvent, EventBus};
use crate::core::validation::Validate;
use crate::storage::Repository;
use async_trait::async_trait;
use indexmap::IndexMap;
use serde::Serialize;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

#[derive(Debug)]
struct Inner<T> {
    items: IndexMap<Uuid, T>,
    /// Shared list snapshot, dropped on every write
    snapshot: Option<Arc<[T]>>,
}

/// In-memory repository
///
/// Keeps insertion order. Uses RwLock for thread-safe access. Consecutive
/// [`list`](Repository::list) calls without a write in between return the
/// same `Arc`, so a list page sees an unchanged collection as unchanged.
#[derive(Debug, Clone)]
pub struct InMemoryRepository<T> {
    inner: Arc<RwLock<Inner<T>>>,
    event_bus: Option<EventBus>,
}

impl<T: Entity> InMemoryRepository<T> {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::with_items(Vec::new())
    }

    /// Create a repository seeded with `items` (not validated)
    pub fn with_items(items: impl IntoIterator<Item = T>) -> Self {
        let items: IndexMap<Uuid, T> = items.into_iter().map(|item| (item.id(), item)).collect();
        tracing::debug!(
            entity_type = T::entity_type(),
            count = items.len(),
            "seeded in-memory repository"
        );
        Self {
            inner: Arc::new(RwLock::new(Inner {
                items,
                snapshot: None,
            })),
            event_bus: None,
        }
    }

    /// Publish mutation events on `event_bus`
    pub fn with_event_bus(mut self, event_bus: EventBus) -> Self {
        self.event_bus = Some(event_bus);
        self
    }

    /// Number of stored entities
    pub fn len(&self) -> Result<usize, BoiError> {
        Ok(self.read()?.items.len())
    }

    pub fn is_empty(&self) -> Result<bool, BoiError> {
        Ok(self.len()? == 0)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Inner<T>>, StorageError> {
        self.inner.read().map_err(|e| StorageError::LockPoisoned {
            operation: "read".to_string(),
            message: e.to_string(),
        })
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Inner<T>>, StorageError> {
        self.inner.write().map_err(|e| StorageError::LockPoisoned {
            operation: "write".to_string(),
            message: e.to_string(),
        })
    }

    fn publish(&self, event: impl FnOnce() -> EntityEvent) {
        if let Some(bus) = &self.event_bus {
            bus.publish(event());
        }
    }

    fn not_found(id: Uuid) -> EntityError {
        EntityError::NotFound {
            entity_type: T::entity_type().to_string(),
            id,
        }
    }
}

/// JSON payload of an entity event; `Null` (logged) if `entity` cannot be serialized
fn event_payload<S: Serialize>(entity_type: &str, id: Uuid, entity: &S) -> serde_json::Value {
    serde_json::to_value(entity).unwrap_or_else(|e| {
        tracing::warn!(entity_type, %id, error = %e, "event published without payload");
        serde_json::Value::Null
    })
}

impl<T: Entity> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T> Repository<T> for InMemoryRepository<T>
where
    T: Entity + Validate + Serialize,
{
    async fn create(&self, entity: T) -> Result<T, BoiError> {
        entity.validate()?;

        {
            let mut inner = self.write()?;
            if inner.items.contains_key(&entity.id()) {
                return Err(EntityError::AlreadyExists {
                    entity_type: T::entity_type().to_string(),
                    id: entity.id(),
                }
                .into());
            }
            inner.items.insert(entity.id(), entity.clone());
            inner.snapshot = None;
        }

        tracing::debug!(entity_type = T::entity_type(), id = %entity.id(), "entity created");
        self.publish(|| EntityEvent::Created {
            entity_type: T::entity_type().to_string(),
            entity_id: entity.id(),
            data: event_payload(T::entity_type(), entity.id(), &entity),
        });

        Ok(entity)
    }

    async fn get(&self, id: &Uuid) -> Result<Option<T>, BoiError> {
        Ok(self.read()?.items.get(id).cloned())
    }

    async fn list(&self) -> Result<Arc<[T]>, BoiError> {
        if let Some(snapshot) = &self.read()?.snapshot {
            return Ok(Arc::clone(snapshot));
        }

        let mut guard = self.write()?;
        let inner = &mut *guard;
        let snapshot = inner
            .snapshot
            .get_or_insert_with(|| inner.items.values().cloned().collect());
        Ok(Arc::clone(snapshot))
    }

    async fn update(&self, id: &Uuid, entity: T) -> Result<T, BoiError> {
        if entity.id() != *id {
            return Err(EntityError::IdMismatch {
                entity_type: T::entity_type().to_string(),
                expected: *id,
                actual: entity.id(),
            }
            .into());
        }
        entity.validate()?;

        {
            let mut inner = self.write()?;
            let slot = inner.items.get_mut(id).ok_or_else(|| Self::not_found(*id))?;
            *slot = entity.clone();
            inner.snapshot = None;
        }

        tracing::debug!(entity_type = T::entity_type(), %id, "entity updated");
        self.publish(|| EntityEvent::Updated {
            entity_type: T::entity_type().to_string(),
            entity_id: *id,
            data: event_payload(T::entity_type(), *id, &entity),
        });

        Ok(entity)
    }

    async fn delete(&self, id: &Uuid) -> Result<(), BoiError> {
        {
            let mut inner = self.write()?;
            inner
                .items
                .shift_remove(id)
                .ok_or_else(|| Self::not_found(*id))?;
            inner.snapshot = None;
        }

        tracing::debug!(entity_type = T::entity_type(), %id, "entity deleted");
        self.publish(|| EntityEvent::Deleted {
            entity_type: T::entity_type().to_string(),
            entity_id: *id,
        });

        Ok(())
    }
}
