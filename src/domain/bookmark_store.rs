//! Per-user saved-event sets.
//!
//! The primary API is the idempotent pair [`BookmarkStore::add`] /
//! [`BookmarkStore::remove`]; repeating either call is safe.
//! [`BookmarkStore::toggle`] is kept as a thin convenience wrapper and
//! is NOT retry-safe: two identical toggle calls produce the opposite
//! net effect of one. Callers that may retry must use add/remove.

use std::collections::{BTreeSet, HashMap};

use tokio::sync::RwLock;

use super::ids::{EventId, UserId};

/// Central store for all bookmark sets.
#[derive(Debug, Default)]
pub struct BookmarkStore {
    sets: RwLock<HashMap<UserId, BTreeSet<EventId>>>,
}

impl BookmarkStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sets: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the user's bookmarked event ids, sorted.
    pub async fn get(&self, user_id: &UserId) -> Vec<EventId> {
        let sets = self.sets.read().await;
        sets.get(user_id)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Adds a bookmark. Idempotent: adding an existing bookmark is a
    /// no-op. Returns the new set.
    pub async fn add(&self, user_id: &UserId, event_id: EventId) -> Vec<EventId> {
        let mut sets = self.sets.write().await;
        let set = sets.entry(user_id.clone()).or_default();
        set.insert(event_id);
        set.iter().copied().collect()
    }

    /// Removes a bookmark. Idempotent: removing an absent bookmark is a
    /// no-op. Returns the new set.
    pub async fn remove(&self, user_id: &UserId, event_id: EventId) -> Vec<EventId> {
        let mut sets = self.sets.write().await;
        let set = sets.entry(user_id.clone()).or_default();
        set.remove(&event_id);
        set.iter().copied().collect()
    }

    /// Clones every non-empty bookmark set, for snapshot persistence.
    pub async fn snapshot(&self) -> Vec<(UserId, Vec<EventId>)> {
        let sets = self.sets.read().await;
        sets.iter()
            .filter(|(_, set)| !set.is_empty())
            .map(|(user_id, set)| (user_id.clone(), set.iter().copied().collect()))
            .collect()
    }

    /// Replaces a user's set wholesale, for snapshot restore.
    pub async fn restore(&self, user_id: UserId, event_ids: Vec<EventId>) {
        let mut sets = self.sets.write().await;
        sets.insert(user_id, event_ids.into_iter().collect());
    }

    /// Flips membership and returns the new set.
    ///
    /// Not idempotent. A retried toggle after a timeout can undo the
    /// original call; use [`BookmarkStore::add`] / [`BookmarkStore::remove`]
    /// when retries are possible.
    pub async fn toggle(&self, user_id: &UserId, event_id: EventId) -> Vec<EventId> {
        let mut sets = self.sets.write().await;
        let set = sets.entry(user_id.clone()).or_default();
        if !set.insert(event_id) {
            set.remove(&event_id);
        }
        set.iter().copied().collect()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn add_and_remove_are_idempotent() {
        let store = BookmarkStore::new();
        let user = UserId::from("u1");
        let event = EventId::new();

        let once = store.add(&user, event).await;
        let twice = store.add(&user, event).await;
        assert_eq!(once, twice);
        assert_eq!(twice, vec![event]);

        let removed = store.remove(&user, event).await;
        let removed_again = store.remove(&user, event).await;
        assert_eq!(removed, removed_again);
        assert!(removed_again.is_empty());
    }

    // Regression guard: documents that toggle retries are unsafe
    // without an idempotency key.
    #[tokio::test]
    async fn sequential_toggles_flip_membership() {
        let store = BookmarkStore::new();
        let user = UserId::from("u1");
        let event = EventId::new();

        let first = store.toggle(&user, event).await;
        assert_eq!(first, vec![event]);

        let second = store.toggle(&user, event).await;
        assert!(second.is_empty());
    }

    #[tokio::test]
    async fn sets_are_per_user() {
        let store = BookmarkStore::new();
        let event = EventId::new();
        let _ = store.add(&UserId::from("u1"), event).await;
        assert!(store.get(&UserId::from("u2")).await.is_empty());
    }
}
