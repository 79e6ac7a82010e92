//! Organizer dashboard: events with aggregated rating statistics.
//!
//! Exists to avoid one feedback lookup per event: rating totals for all
//! of an organizer's events are grouped in a single pass over the
//! feedback store. The read is deliberately not transactional with
//! respect to concurrent feedback writes: any state between request
//! and response is acceptable here, unlike the capacity path.

use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;

use crate::domain::feedback_store::RatingTotals;
use crate::domain::{EventId, EventRegistry, EventSummary, FeedbackStore, Identity};
use crate::error::HubError;

/// An event summary enriched with feedback statistics.
#[derive(Debug, Clone, Serialize)]
pub struct EventWithStats {
    /// The event.
    #[serde(flatten)]
    pub event: EventSummary,
    /// Average rating rounded to one decimal. `0.0` when there is no
    /// feedback, never null.
    pub avg_rating: f64,
    /// Number of feedback rows.
    pub feedback_count: u32,
}

/// Read-only aggregation layer over events and feedback.
#[derive(Debug, Clone)]
pub struct DashboardService {
    events: Arc<EventRegistry>,
    feedback: Arc<FeedbackStore>,
}

impl DashboardService {
    /// Creates a new `DashboardService`.
    #[must_use]
    pub fn new(events: Arc<EventRegistry>, feedback: Arc<FeedbackStore>) -> Self {
        Self { events, feedback }
    }

    /// Returns all of the acting organizer's events with rating stats.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Forbidden`] for volunteers.
    pub async fn organizer_dashboard(
        &self,
        actor: &Identity,
    ) -> Result<Vec<EventWithStats>, HubError> {
        actor.require_organizer()?;

        let summaries = self.events.list(Some(&actor.user_id)).await;
        let event_ids: HashSet<EventId> = summaries.iter().map(|s| s.id).collect();
        let totals = self.feedback.rating_totals(&event_ids).await;

        Ok(summaries
            .into_iter()
            .map(|event| {
                let t = totals.get(&event.id).copied().unwrap_or_default();
                EventWithStats {
                    avg_rating: display_average(t),
                    feedback_count: t.count,
                    event,
                }
            })
            .collect())
    }
}

/// One-decimal display average over exact integer sums. Zero feedback
/// yields `0.0` by policy, never NaN.
#[allow(clippy::cast_precision_loss)]
fn display_average(totals: RatingTotals) -> f64 {
    if totals.count == 0 {
        return 0.0;
    }
    (totals.sum as f64 / f64::from(totals.count) * 10.0).round() / 10.0
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{EventRecord, EventStatus, Feedback, Role, UserId};
    use chrono::{NaiveDate, Utc};

    fn make_event(organizer: &str) -> EventRecord {
        let now = Utc::now();
        EventRecord {
            id: EventId::new(),
            title: "Tree Planting".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 4, 5).unwrap_or_default(),
            location: "Hillside".to_string(),
            category: "environment".to_string(),
            description: String::new(),
            max_volunteers: 10,
            current_volunteers: 0,
            organizer_id: UserId::from(organizer),
            organizer_name: "Org".to_string(),
            image_url: None,
            tasks: vec![],
            status: EventStatus::Completed,
            created_at: now,
            updated_at: now,
        }
    }

    fn feedback(event_id: EventId, user: &str, rating: u8) -> Feedback {
        let Ok(f) = Feedback::new(event_id, UserId::from(user), rating, String::new()) else {
            panic!("valid feedback");
        };
        f
    }

    #[tokio::test]
    async fn dashboard_aggregates_and_defaults_to_zero() {
        let events = Arc::new(EventRegistry::new());
        let store = Arc::new(FeedbackStore::new());
        let service = DashboardService::new(Arc::clone(&events), Arc::clone(&store));

        let e1 = make_event("org-1");
        let e2 = make_event("org-1");
        let (id1, id2) = (e1.id, e2.id);
        let _ = events.insert(e1).await;
        let _ = events.insert(e2).await;

        let _ = store.insert(feedback(id1, "u1", 5)).await;
        let _ = store.insert(feedback(id1, "u2", 3)).await;

        let org = Identity::new(UserId::from("org-1"), Role::Organizer);
        let Ok(dashboard) = service.organizer_dashboard(&org).await else {
            panic!("dashboard failed");
        };
        assert_eq!(dashboard.len(), 2);

        let Some(with_feedback) = dashboard.iter().find(|e| e.event.id == id1) else {
            panic!("rated event missing");
        };
        assert!((with_feedback.avg_rating - 4.0).abs() < f64::EPSILON);
        assert_eq!(with_feedback.feedback_count, 2);

        let Some(without_feedback) = dashboard.iter().find(|e| e.event.id == id2) else {
            panic!("unrated event missing");
        };
        assert!((without_feedback.avg_rating - 0.0).abs() < f64::EPSILON);
        assert_eq!(without_feedback.feedback_count, 0);
    }

    #[tokio::test]
    async fn dashboard_excludes_other_organizers_events() {
        let events = Arc::new(EventRegistry::new());
        let service = DashboardService::new(Arc::clone(&events), Arc::new(FeedbackStore::new()));

        let _ = events.insert(make_event("org-1")).await;
        let _ = events.insert(make_event("org-2")).await;

        let org = Identity::new(UserId::from("org-1"), Role::Organizer);
        let Ok(dashboard) = service.organizer_dashboard(&org).await else {
            panic!("dashboard failed");
        };
        assert_eq!(dashboard.len(), 1);
    }

    #[tokio::test]
    async fn volunteers_get_no_dashboard() {
        let service = DashboardService::new(
            Arc::new(EventRegistry::new()),
            Arc::new(FeedbackStore::new()),
        );
        let actor = Identity::new(UserId::from("u1"), Role::Volunteer);
        assert!(matches!(
            service.organizer_dashboard(&actor).await,
            Err(HubError::Forbidden)
        ));
    }

    #[test]
    fn average_rounds_to_one_decimal() {
        let avg = display_average(RatingTotals { sum: 11, count: 3 });
        assert!((avg - 3.7).abs() < f64::EPSILON);
    }
}
