//! Concurrent registration storage with a uniqueness index.
//!
//! Mirrors the per-entry locking of
//! [`super::event_registry::EventRegistry`], plus a `(event, user)` index
//! that enforces the at-most-one-registration invariant at creation
//! time. Both maps live behind one outer lock so an insert observes a
//! consistent view of the index.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use super::ids::{EventId, RegistrationId, UserId};
use super::registration::Registration;
use crate::error::HubError;

#[derive(Debug, Default)]
struct Inner {
    by_id: HashMap<RegistrationId, Arc<RwLock<Registration>>>,
    by_event_user: HashMap<(EventId, UserId), RegistrationId>,
}

/// Central store for all registrations.
#[derive(Debug, Default)]
pub struct RegistrationStore {
    inner: RwLock<Inner>,
}

impl RegistrationStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
        }
    }

    /// Inserts a registration, enforcing `(event, user)` uniqueness.
    ///
    /// Returns a clone of the stored registration on success.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::AlreadyRegistered`] if a registration for the
    /// same `(event, user)` pair exists in any status.
    pub async fn insert_unique(&self, registration: Registration) -> Result<Registration, HubError> {
        let key = (registration.event_id, registration.user_id.clone());
        let mut inner = self.inner.write().await;
        if inner.by_event_user.contains_key(&key) {
            return Err(HubError::AlreadyRegistered(
                *registration.event_id.as_uuid(),
            ));
        }
        let stored = registration.clone();
        inner.by_event_user.insert(key, registration.id);
        inner
            .by_id
            .insert(registration.id, Arc::new(RwLock::new(registration)));
        Ok(stored)
    }

    /// Returns a shared reference to the registration behind its lock.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::RegistrationNotFound`] if no registration with
    /// the given ID exists.
    pub async fn get(
        &self,
        registration_id: RegistrationId,
    ) -> Result<Arc<RwLock<Registration>>, HubError> {
        let inner = self.inner.read().await;
        inner
            .by_id
            .get(&registration_id)
            .cloned()
            .ok_or(HubError::RegistrationNotFound(*registration_id.as_uuid()))
    }

    /// Clones all registrations for one event, oldest first.
    pub async fn list_for_event(&self, event_id: EventId) -> Vec<Registration> {
        self.collect(|reg| reg.event_id == event_id).await
    }

    /// Clones all registrations made by one user, oldest first.
    pub async fn list_for_user(&self, user_id: &UserId) -> Vec<Registration> {
        self.collect(|reg| &reg.user_id == user_id).await
    }

    /// Clones every registration, for snapshot persistence.
    pub async fn snapshot(&self) -> Vec<Registration> {
        self.collect(|_| true).await
    }

    /// Returns the number of registrations in the store.
    pub async fn len(&self) -> usize {
        self.inner.read().await.by_id.len()
    }

    /// Returns `true` if the store contains no registrations.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.by_id.is_empty()
    }

    async fn collect<F>(&self, keep: F) -> Vec<Registration>
    where
        F: Fn(&Registration) -> bool,
    {
        let inner = self.inner.read().await;
        let mut out = Vec::new();
        for entry_lock in inner.by_id.values() {
            let reg = entry_lock.read().await;
            if keep(&reg) {
                out.push(reg.clone());
            }
        }
        out.sort_by(|a, b| a.joined_at.cmp(&b.joined_at).then(a.id.as_uuid().cmp(b.id.as_uuid())));
        out
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn make_registration(event_id: EventId, user: &str) -> Registration {
        Registration::new(event_id, UserId::from(user), "Sam".to_string(), None)
    }

    #[tokio::test]
    async fn duplicate_pair_is_rejected() {
        let store = RegistrationStore::new();
        let event_id = EventId::new();

        let first = store
            .insert_unique(make_registration(event_id, "u1"))
            .await;
        assert!(first.is_ok());

        let second = store
            .insert_unique(make_registration(event_id, "u1"))
            .await;
        assert!(matches!(second, Err(HubError::AlreadyRegistered(_))));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn same_user_may_register_for_different_events() {
        let store = RegistrationStore::new();
        let a = store
            .insert_unique(make_registration(EventId::new(), "u1"))
            .await;
        let b = store
            .insert_unique(make_registration(EventId::new(), "u1"))
            .await;
        assert!(a.is_ok());
        assert!(b.is_ok());
    }

    #[tokio::test]
    async fn list_for_event_filters_and_sorts() {
        let store = RegistrationStore::new();
        let event_id = EventId::new();
        let _ = store.insert_unique(make_registration(event_id, "u1")).await;
        let _ = store.insert_unique(make_registration(event_id, "u2")).await;
        let _ = store
            .insert_unique(make_registration(EventId::new(), "u3"))
            .await;

        let listed = store.list_for_event(event_id).await;
        assert_eq!(listed.len(), 2);
        assert!(listed.iter().all(|r| r.event_id == event_id));
    }

    #[tokio::test]
    async fn get_missing_is_not_found() {
        let store = RegistrationStore::new();
        let err = store.get(RegistrationId::new()).await;
        assert!(matches!(err, Err(HubError::RegistrationNotFound(_))));
    }
}
