//! Event bus and shared observable stores
//!
//! Mutations published by the repository go through the [`EventBus`]
//! (`tokio::sync::broadcast`). Application-wide selections that every page
//! observes (the selected property, the navigation trail) live in typed
//! [`SelectionStore`] / [`Breadcrumbs`] stores built on `tokio::sync::watch`,
//! so subscribers always see the latest value.
//!
//! ```text
//! Repository::create ──▶ EventBus::publish() ──▶ broadcast ──▶ list pages (refetch)
//! Property picker ─────▶ SelectionStore::select() ──▶ watch ──▶ dashboards
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::{broadcast, watch};
use uuid::Uuid;

/// Events related to entity mutations (create, update, delete)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum EntityEvent {
    /// An entity was created
    Created {
        entity_type: String,
        entity_id: Uuid,
        data: serde_json::Value,
    },
    /// An entity was updated
    Updated {
        entity_type: String,
        entity_id: Uuid,
        data: serde_json::Value,
    },
    /// An entity was deleted
    Deleted {
        entity_type: String,
        entity_id: Uuid,
    },
}

impl EntityEvent {
    /// Get the entity type this event relates to
    pub fn entity_type(&self) -> &str {
        match self {
            EntityEvent::Created { entity_type, .. }
            | EntityEvent::Updated { entity_type, .. }
            | EntityEvent::Deleted { entity_type, .. } => entity_type,
        }
    }

    /// Get the entity ID this event relates to
    pub fn entity_id(&self) -> Uuid {
        match self {
            EntityEvent::Created { entity_id, .. }
            | EntityEvent::Updated { entity_id, .. }
            | EntityEvent::Deleted { entity_id, .. } => *entity_id,
        }
    }

    /// Get the action name (created, updated, deleted)
    pub fn action(&self) -> &str {
        match self {
            EntityEvent::Created { .. } => "created",
            EntityEvent::Updated { .. } => "updated",
            EntityEvent::Deleted { .. } => "deleted",
        }
    }
}

/// Envelope wrapping an entity event with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    /// Unique event ID
    pub id: Uuid,
    /// When the event occurred
    pub timestamp: DateTime<Utc>,
    /// The actual event
    pub event: EntityEvent,
}

impl EventEnvelope {
    /// Create a new event envelope
    pub fn new(event: EntityEvent) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            event,
        }
    }
}

/// Broadcast-based event bus
///
/// The bus is cheap to clone and can be shared across threads.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<EventEnvelope>,
}

impl EventBus {
    /// Create a new EventBus with the given channel capacity
    ///
    /// The capacity determines how many events can be buffered before
    /// slow receivers start losing events (lagged).
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publish an event to all subscribers
    ///
    /// Never fails. Without subscribers the event is dropped.
    /// Returns the number of receivers that will receive the event.
    pub fn publish(&self, event: EntityEvent) -> usize {
        let envelope = EventEnvelope::new(event);
        tracing::debug!(
            entity_type = envelope.event.entity_type(),
            action = envelope.event.action(),
            entity_id = %envelope.event.entity_id(),
            "publishing entity event"
        );
        self.sender.send(envelope).unwrap_or(0)
    }

    /// Subscribe to events published from now on
    pub fn subscribe(&self) -> broadcast::Receiver<EventEnvelope> {
        self.sender.subscribe()
    }

    /// Get the current number of active subscribers
    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(1024)
    }
}

/// The property currently selected in the header picker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedProperty {
    pub id: Uuid,
    pub name: String,
}

/// Shared store of the selected property
///
/// Clones share the same state; every subscriber observes each change.
#[derive(Debug, Clone)]
pub struct SelectionStore {
    sender: Arc<watch::Sender<Option<SelectedProperty>>>,
}

impl SelectionStore {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(None);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Select a property; returns `false` when it was already selected
    pub fn select(&self, property: SelectedProperty) -> bool {
        let changed = self.sender.send_if_modified(|current| {
            if current.as_ref() == Some(&property) {
                false
            } else {
                *current = Some(property);
                true
            }
        });
        if changed {
            tracing::debug!("selected property changed");
        }
        changed
    }

    /// Clear the selection; returns `false` when nothing was selected
    pub fn clear(&self) -> bool {
        self.sender.send_if_modified(|current| current.take().is_some())
    }

    /// The current selection
    pub fn current(&self) -> Option<SelectedProperty> {
        self.sender.borrow().clone()
    }

    /// Observe selection changes
    pub fn subscribe(&self) -> watch::Receiver<Option<SelectedProperty>> {
        self.sender.subscribe()
    }
}

impl Default for SelectionStore {
    fn default() -> Self {
        Self::new()
    }
}

/// One step of the navigation trail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breadcrumb {
    pub label: String,
    pub path: String,
}

impl Breadcrumb {
    pub fn new(label: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            path: path.into(),
        }
    }
}

/// Shared navigation trail
///
/// Pushing a path already in the trail truncates back to it, so going back to
/// a parent page does not grow the trail.
#[derive(Debug, Clone)]
pub struct Breadcrumbs {
    sender: Arc<watch::Sender<Vec<Breadcrumb>>>,
}

impl Breadcrumbs {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(Vec::new());
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Navigate to a page
    pub fn push(&self, crumb: Breadcrumb) {
        self.sender.send_modify(|trail| {
            match trail.iter().position(|c| c.path == crumb.path) {
                Some(pos) => trail.truncate(pos + 1),
                None => trail.push(crumb),
            }
        });
    }

    /// Go back one page
    pub fn pop(&self) -> Option<Breadcrumb> {
        let mut popped = None;
        self.sender.send_if_modified(|trail| {
            popped = trail.pop();
            popped.is_some()
        });
        popped
    }

    /// Forget the whole trail
    pub fn clear(&self) {
        self.sender.send_if_modified(|trail| {
            let had_items = !trail.is_empty();
            trail.clear();
            had_items
        });
    }

    /// The current trail, root first
    pub fn trail(&self) -> Vec<Breadcrumb> {
        self.sender.borrow().clone()
    }

    /// Observe trail changes
    pub fn subscribe(&self) -> watch::Receiver<Vec<Breadcrumb>> {
        self.sender.subscribe()
    }
}

impl Default for Breadcrumbs {
    fn default() -> Self {
        Self::new()
    }
}
