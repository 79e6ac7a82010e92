//! Feedback storage keyed by `(event, user)`.
//!
//! Rows are updated in place (never appended), so the natural map key
//! already enforces the at-most-one-review invariant. Rating totals for
//! the dashboard come from one pass over the whole map rather than one
//! lookup per event.

use std::collections::{HashMap, HashSet};

use tokio::sync::RwLock;

use super::feedback::Feedback;
use super::ids::{EventId, UserId};
use crate::error::HubError;

/// Exact rating totals for one event. Sums stay integral; averaging and
/// rounding are display concerns left to the dashboard layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RatingTotals {
    /// Sum of all ratings.
    pub sum: u64,
    /// Number of feedback rows.
    pub count: u32,
}

/// Central store for all feedback rows.
#[derive(Debug, Default)]
pub struct FeedbackStore {
    rows: RwLock<HashMap<(EventId, UserId), Feedback>>,
}

impl FeedbackStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(HashMap::new()),
        }
    }

    /// Inserts a feedback row.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Validation`] if the user already reviewed the
    /// event (updates go through [`FeedbackStore::update`]).
    pub async fn insert(&self, feedback: Feedback) -> Result<Feedback, HubError> {
        let key = (feedback.event_id, feedback.user_id.clone());
        let mut rows = self.rows.write().await;
        if rows.contains_key(&key) {
            return Err(HubError::Validation(format!(
                "feedback already submitted for event {}",
                feedback.event_id
            )));
        }
        rows.insert(key, feedback.clone());
        Ok(feedback)
    }

    /// Updates an existing feedback row in place.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::FeedbackNotFound`] if the user has not
    /// reviewed the event yet.
    pub async fn update(
        &self,
        event_id: EventId,
        user_id: &UserId,
        rating: u8,
        comment: String,
    ) -> Result<Feedback, HubError> {
        let mut rows = self.rows.write().await;
        let row = rows
            .get_mut(&(event_id, user_id.clone()))
            .ok_or(HubError::FeedbackNotFound(*event_id.as_uuid()))?;
        row.rating = rating;
        row.comment = comment;
        row.updated_at = chrono::Utc::now();
        Ok(row.clone())
    }

    /// Groups rating totals for the given events in a single pass over
    /// the whole store. Events with no feedback are absent from the map.
    pub async fn rating_totals(&self, events: &HashSet<EventId>) -> HashMap<EventId, RatingTotals> {
        let rows = self.rows.read().await;
        let mut totals: HashMap<EventId, RatingTotals> = HashMap::with_capacity(events.len());
        for ((event_id, _), feedback) in rows.iter() {
            if !events.contains(event_id) {
                continue;
            }
            let entry = totals.entry(*event_id).or_default();
            entry.sum += u64::from(feedback.rating);
            entry.count += 1;
        }
        totals
    }

    /// Clones every feedback row, for snapshot persistence.
    pub async fn snapshot(&self) -> Vec<Feedback> {
        self.rows.read().await.values().cloned().collect()
    }

    /// Returns the number of feedback rows.
    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    /// Returns `true` if the store contains no feedback.
    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn make_feedback(event_id: EventId, user: &str, rating: u8) -> Feedback {
        let Ok(feedback) = Feedback::new(
            event_id,
            UserId::from(user),
            rating,
            "nice event".to_string(),
        ) else {
            panic!("valid feedback");
        };
        feedback
    }

    #[tokio::test]
    async fn duplicate_insert_is_rejected() {
        let store = FeedbackStore::new();
        let event_id = EventId::new();
        assert!(store.insert(make_feedback(event_id, "u1", 4)).await.is_ok());
        let dup = store.insert(make_feedback(event_id, "u1", 2)).await;
        assert!(matches!(dup, Err(HubError::Validation(_))));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn update_replaces_in_place() {
        let store = FeedbackStore::new();
        let event_id = EventId::new();
        let user = UserId::from("u1");
        let _ = store.insert(make_feedback(event_id, "u1", 4)).await;

        let updated = store
            .update(event_id, &user, 2, "changed my mind".to_string())
            .await;
        let Ok(updated) = updated else {
            panic!("update failed");
        };
        assert_eq!(updated.rating, 2);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn update_without_insert_is_not_found() {
        let store = FeedbackStore::new();
        let err = store
            .update(EventId::new(), &UserId::from("u1"), 3, String::new())
            .await;
        assert!(matches!(err, Err(HubError::FeedbackNotFound(_))));
    }

    #[tokio::test]
    async fn totals_group_in_one_pass() {
        let store = FeedbackStore::new();
        let e1 = EventId::new();
        let e2 = EventId::new();
        let _ = store.insert(make_feedback(e1, "u1", 5)).await;
        let _ = store.insert(make_feedback(e1, "u2", 3)).await;

        let events: HashSet<EventId> = [e1, e2].into_iter().collect();
        let totals = store.rating_totals(&events).await;

        assert_eq!(totals.get(&e1), Some(&RatingTotals { sum: 8, count: 2 }));
        assert_eq!(totals.get(&e2), None);
    }
}
