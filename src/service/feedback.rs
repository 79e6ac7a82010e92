//! Feedback service: submission and in-place updates.

use std::sync::Arc;

use crate::domain::feedback::validate_rating;
use crate::domain::{EventId, EventRegistry, EventStatus, Feedback, FeedbackStore, Identity};
use crate::error::HubError;

/// Orchestration layer for feedback submission.
#[derive(Debug, Clone)]
pub struct FeedbackService {
    events: Arc<EventRegistry>,
    feedback: Arc<FeedbackStore>,
}

impl FeedbackService {
    /// Creates a new `FeedbackService`.
    #[must_use]
    pub fn new(events: Arc<EventRegistry>, feedback: Arc<FeedbackStore>) -> Self {
        Self { events, feedback }
    }

    /// Submits feedback for a completed event.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Forbidden`] for organizers,
    /// [`HubError::EventNotFound`] for an unknown event,
    /// [`HubError::Validation`] for an out-of-range rating, an event
    /// that has not completed yet, or a duplicate submission.
    pub async fn submit(
        &self,
        actor: &Identity,
        event_id: EventId,
        rating: u8,
        comment: String,
    ) -> Result<Feedback, HubError> {
        actor.require_volunteer()?;
        let entry_lock = self.events.get(event_id).await?;
        {
            let record = entry_lock.read().await;
            if record.status != EventStatus::Completed {
                return Err(HubError::Validation(
                    "feedback is only accepted after the event completes".to_string(),
                ));
            }
        }

        let feedback = Feedback::new(event_id, actor.user_id.clone(), rating, comment)?;
        let stored = self.feedback.insert(feedback).await?;

        tracing::info!(%event_id, user_id = %actor.user_id, rating, "feedback submitted");
        Ok(stored)
    }

    /// Updates the acting user's existing feedback in place.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Forbidden`] for organizers,
    /// [`HubError::Validation`] for an out-of-range rating and
    /// [`HubError::FeedbackNotFound`] if nothing was submitted yet.
    pub async fn update(
        &self,
        actor: &Identity,
        event_id: EventId,
        rating: u8,
        comment: String,
    ) -> Result<Feedback, HubError> {
        actor.require_volunteer()?;
        validate_rating(rating)?;
        self.feedback
            .update(event_id, &actor.user_id, rating, comment)
            .await
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{EventRecord, Role, UserId};
    use chrono::{NaiveDate, Utc};

    fn make_event(status: EventStatus) -> EventRecord {
        let now = Utc::now();
        EventRecord {
            id: EventId::new(),
            title: "Shelter Shift".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 2, 14).unwrap_or_default(),
            location: "Downtown".to_string(),
            category: "social".to_string(),
            description: String::new(),
            max_volunteers: 4,
            current_volunteers: 0,
            organizer_id: UserId::from("org-1"),
            organizer_name: "Org".to_string(),
            image_url: None,
            tasks: vec![],
            status,
            created_at: now,
            updated_at: now,
        }
    }

    fn volunteer(id: &str) -> Identity {
        Identity::new(UserId::from(id), Role::Volunteer)
    }

    async fn setup(status: EventStatus) -> (FeedbackService, EventId) {
        let events = Arc::new(EventRegistry::new());
        let service = FeedbackService::new(Arc::clone(&events), Arc::new(FeedbackStore::new()));
        let record = make_event(status);
        let event_id = record.id;
        let _ = events.insert(record).await;
        (service, event_id)
    }

    #[tokio::test]
    async fn feedback_requires_completed_event() {
        let (service, event_id) = setup(EventStatus::Upcoming).await;
        let result = service
            .submit(&volunteer("u1"), event_id, 5, "great".to_string())
            .await;
        assert!(matches!(result, Err(HubError::Validation(_))));
    }

    #[tokio::test]
    async fn submit_then_update_in_place() {
        let (service, event_id) = setup(EventStatus::Completed).await;
        let actor = volunteer("u1");

        let Ok(first) = service
            .submit(&actor, event_id, 4, "good".to_string())
            .await
        else {
            panic!("submit failed");
        };
        assert_eq!(first.rating, 4);

        let Ok(updated) = service
            .update(&actor, event_id, 5, "even better".to_string())
            .await
        else {
            panic!("update failed");
        };
        assert_eq!(updated.rating, 5);
        assert_eq!(updated.comment, "even better");
    }

    #[tokio::test]
    async fn organizers_cannot_leave_feedback() {
        let (service, event_id) = setup(EventStatus::Completed).await;
        let org = Identity::new(UserId::from("org-1"), Role::Organizer);

        let submitted = service.submit(&org, event_id, 5, String::new()).await;
        assert!(matches!(submitted, Err(HubError::Forbidden)));

        let updated = service.update(&org, event_id, 4, String::new()).await;
        assert!(matches!(updated, Err(HubError::Forbidden)));
    }

    #[tokio::test]
    async fn out_of_range_rating_fails_fast() {
        let (service, event_id) = setup(EventStatus::Completed).await;
        let result = service
            .submit(&volunteer("u1"), event_id, 6, String::new())
            .await;
        assert!(matches!(result, Err(HubError::Validation(_))));
    }

    #[tokio::test]
    async fn update_before_submit_is_not_found() {
        let (service, event_id) = setup(EventStatus::Completed).await;
        let result = service
            .update(&volunteer("u1"), event_id, 3, String::new())
            .await;
        assert!(matches!(result, Err(HubError::FeedbackNotFound(_))));
    }
}
