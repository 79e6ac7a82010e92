//! Concurrent event storage with per-event fine-grained locking.
//!
//! [`EventRegistry`] stores all events in a `HashMap` where each entry
//! is individually protected by a [`tokio::sync::RwLock`]. An entry's
//! write guard is the per-event critical section: read-check-write on
//! `current_volunteers` happens entirely inside it, and confirmations
//! on different events never contend.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use super::event::{EventRecord, EventSummary};
use super::ids::{EventId, UserId};
use crate::error::HubError;

/// Central store for all events.
///
/// Uses a `RwLock<HashMap<...>>` for the outer map and per-entry
/// `Arc<RwLock<EventRecord>>` for fine-grained per-event locking.
///
/// # Concurrency
///
/// - Multiple tasks may read the same event concurrently.
/// - Writes to different events are concurrent.
/// - Writes to the same event are serialized; the capacity counter is
///   only ever mutated under the entry's write guard.
#[derive(Debug, Default)]
pub struct EventRegistry {
    events: RwLock<HashMap<EventId, Arc<RwLock<EventRecord>>>>,
}

impl EventRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: RwLock::new(HashMap::new()),
        }
    }

    /// Inserts a new event into the registry.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Internal`] if an event with the same ID
    /// already exists (should never happen with UUID v4).
    pub async fn insert(&self, record: EventRecord) -> Result<EventId, HubError> {
        let event_id = record.id;
        let mut map = self.events.write().await;
        if map.contains_key(&event_id) {
            return Err(HubError::Internal(format!(
                "event {event_id} already exists"
            )));
        }
        map.insert(event_id, Arc::new(RwLock::new(record)));
        Ok(event_id)
    }

    /// Returns a shared reference to the event entry behind its lock.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::EventNotFound`] if no event with the given ID
    /// exists.
    pub async fn get(&self, event_id: EventId) -> Result<Arc<RwLock<EventRecord>>, HubError> {
        let map = self.events.read().await;
        map.get(&event_id)
            .cloned()
            .ok_or(HubError::EventNotFound(*event_id.as_uuid()))
    }

    /// Resolves an event entry for an owner-scoped operation.
    ///
    /// Both "event does not exist" and "event exists but is owned by
    /// someone else" collapse into [`HubError::Forbidden`], so callers
    /// cannot probe for the existence of other organizers' events.
    /// Ownership is immutable, so checking it under a read guard before
    /// the caller re-acquires a write guard is race-free.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Forbidden`] if the event is missing or not
    /// owned by `owner`.
    pub async fn get_owned(
        &self,
        event_id: EventId,
        owner: &UserId,
    ) -> Result<Arc<RwLock<EventRecord>>, HubError> {
        let Ok(entry_lock) = self.get(event_id).await else {
            return Err(HubError::Forbidden);
        };
        {
            let record = entry_lock.read().await;
            if &record.organizer_id != owner {
                return Err(HubError::Forbidden);
            }
        }
        Ok(entry_lock)
    }

    /// Returns summaries of all events, optionally filtered by organizer.
    pub async fn list(&self, organizer_filter: Option<&UserId>) -> Vec<EventSummary> {
        let map = self.events.read().await;
        let mut summaries = Vec::with_capacity(map.len());
        for entry_lock in map.values() {
            let record = entry_lock.read().await;
            if let Some(organizer) = organizer_filter
                && &record.organizer_id != organizer
            {
                continue;
            }
            summaries.push(EventSummary::from(&*record));
        }
        // Stable output order for list endpoints.
        summaries.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));
        summaries
    }

    /// Clones every event record, for snapshot persistence.
    pub async fn snapshot(&self) -> Vec<EventRecord> {
        let map = self.events.read().await;
        let mut records = Vec::with_capacity(map.len());
        for entry_lock in map.values() {
            records.push(entry_lock.read().await.clone());
        }
        records
    }

    /// Returns the number of events in the registry.
    pub async fn len(&self) -> usize {
        self.events.read().await.len()
    }

    /// Returns `true` if the registry contains no events.
    pub async fn is_empty(&self) -> bool {
        self.events.read().await.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::event::EventStatus;
    use chrono::{NaiveDate, Utc};

    fn make_event(organizer: &str) -> EventRecord {
        let now = Utc::now();
        EventRecord {
            id: EventId::new(),
            title: "Beach Cleanup".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap_or_default(),
            location: "Shoreline Park".to_string(),
            category: "environment".to_string(),
            description: "Bring gloves".to_string(),
            max_volunteers: 10,
            current_volunteers: 0,
            organizer_id: UserId::from(organizer),
            organizer_name: "Org".to_string(),
            image_url: None,
            tasks: vec![],
            status: EventStatus::Upcoming,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn insert_and_get() {
        let registry = EventRegistry::new();
        let record = make_event("org-1");
        let id = record.id;
        let Ok(inserted) = registry.insert(record).await else {
            panic!("insert failed");
        };
        assert_eq!(inserted, id);
        assert!(registry.get(id).await.is_ok());
        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test]
    async fn get_missing_is_not_found() {
        let registry = EventRegistry::new();
        let err = registry.get(EventId::new()).await;
        assert!(matches!(err, Err(HubError::EventNotFound(_))));
    }

    #[tokio::test]
    async fn list_filters_by_organizer() {
        let registry = EventRegistry::new();
        let _ = registry.insert(make_event("org-1")).await;
        let _ = registry.insert(make_event("org-1")).await;
        let _ = registry.insert(make_event("org-2")).await;

        let owner = UserId::from("org-1");
        assert_eq!(registry.list(Some(&owner)).await.len(), 2);
        assert_eq!(registry.list(None).await.len(), 3);
    }

    #[tokio::test]
    async fn writes_to_different_events_do_not_block() {
        let registry = EventRegistry::new();
        let a = make_event("org-1");
        let b = make_event("org-1");
        let (id_a, id_b) = (a.id, b.id);
        let _ = registry.insert(a).await;
        let _ = registry.insert(b).await;

        let Ok(lock_a) = registry.get(id_a).await else {
            panic!("event a missing");
        };
        let guard_a = lock_a.write().await;

        // Holding a's write guard must not block b's.
        let Ok(lock_b) = registry.get(id_b).await else {
            panic!("event b missing");
        };
        let guard_b = lock_b.try_write();
        assert!(guard_b.is_ok());
        drop(guard_a);
    }
}
