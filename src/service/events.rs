//! Event service: creation, updates, and the status transition.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};

use crate::domain::{EventId, EventRecord, EventRegistry, EventStatus, EventSummary, Identity};
use crate::error::HubError;

/// Fields accepted when creating an event.
#[derive(Debug, Clone)]
pub struct NewEvent {
    /// Event title.
    pub title: String,
    /// Calendar date.
    pub date: NaiveDate,
    /// Venue.
    pub location: String,
    /// Category label.
    pub category: String,
    /// Long description.
    pub description: String,
    /// Declared quota. Must be at least 1.
    pub max_volunteers: u32,
    /// Organizer display name snapshot.
    pub organizer_name: String,
    /// Opaque banner URL from the external object store.
    pub image_url: Option<String>,
    /// Task list.
    pub tasks: Vec<String>,
}

/// Partial update for an event. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct EventPatch {
    /// New title.
    pub title: Option<String>,
    /// New date.
    pub date: Option<NaiveDate>,
    /// New venue.
    pub location: Option<String>,
    /// New category.
    pub category: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New quota. Rejected if below the current confirmed count.
    pub max_volunteers: Option<u32>,
    /// New banner URL.
    pub image_url: Option<String>,
    /// New task list.
    pub tasks: Option<Vec<String>>,
}

/// Orchestration layer for event lifecycle operations.
#[derive(Debug, Clone)]
pub struct EventService {
    events: Arc<EventRegistry>,
}

impl EventService {
    /// Creates a new `EventService`.
    #[must_use]
    pub fn new(events: Arc<EventRegistry>) -> Self {
        Self { events }
    }

    /// Returns a reference to the inner [`EventRegistry`].
    #[must_use]
    pub fn registry(&self) -> &Arc<EventRegistry> {
        &self.events
    }

    /// Publishes a new event owned by the acting organizer.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Forbidden`] for volunteers and
    /// [`HubError::Validation`] for an empty title or zero quota.
    pub async fn create(&self, actor: &Identity, new: NewEvent) -> Result<EventRecord, HubError> {
        actor.require_organizer()?;
        if new.title.trim().is_empty() {
            return Err(HubError::Validation("title must not be empty".to_string()));
        }
        if new.max_volunteers == 0 {
            return Err(HubError::Validation(
                "max_volunteers must be at least 1".to_string(),
            ));
        }

        let now = Utc::now();
        let record = EventRecord {
            id: EventId::new(),
            title: new.title,
            date: new.date,
            location: new.location,
            category: new.category,
            description: new.description,
            max_volunteers: new.max_volunteers,
            current_volunteers: 0,
            organizer_id: actor.user_id.clone(),
            organizer_name: new.organizer_name,
            image_url: new.image_url,
            tasks: new.tasks,
            status: EventStatus::Upcoming,
            created_at: now,
            updated_at: now,
        };
        let stored = record.clone();
        let event_id = self.events.insert(record).await?;

        tracing::info!(%event_id, organizer = %actor.user_id, "event created");
        Ok(stored)
    }

    /// Applies a partial update to an owned event.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Forbidden`] if the event is missing or not
    /// owned by the actor, and [`HubError::Validation`] if the new quota
    /// would fall below the current confirmed count.
    pub async fn update(
        &self,
        actor: &Identity,
        event_id: EventId,
        patch: EventPatch,
    ) -> Result<EventRecord, HubError> {
        actor.require_organizer()?;
        let entry_lock = self.events.get_owned(event_id, &actor.user_id).await?;
        let mut record = entry_lock.write().await;

        // Validate the whole patch before touching the record: an error
        // return must never leave a partial update behind.
        if let Some(title) = &patch.title
            && title.trim().is_empty()
        {
            return Err(HubError::Validation("title must not be empty".to_string()));
        }
        if let Some(quota) = patch.max_volunteers
            && quota < record.current_volunteers
        {
            return Err(HubError::Validation(format!(
                "max_volunteers {quota} is below the {} already confirmed",
                record.current_volunteers
            )));
        }

        if let Some(quota) = patch.max_volunteers {
            record.max_volunteers = quota;
        }
        if let Some(title) = patch.title {
            record.title = title;
        }
        if let Some(date) = patch.date {
            record.date = date;
        }
        if let Some(location) = patch.location {
            record.location = location;
        }
        if let Some(category) = patch.category {
            record.category = category;
        }
        if let Some(description) = patch.description {
            record.description = description;
        }
        if let Some(image_url) = patch.image_url {
            record.image_url = Some(image_url);
        }
        if let Some(tasks) = patch.tasks {
            record.tasks = tasks;
        }
        record.updated_at = Utc::now();

        Ok(record.clone())
    }

    /// Transitions an owned event's status.
    ///
    /// `Upcoming → Completed` is the only legal transition; completion is
    /// terminal. Re-applying the current status is a no-op success.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Forbidden`] for missing/unowned events and
    /// [`HubError::InvalidTransition`] for `Completed → Upcoming`.
    pub async fn set_status(
        &self,
        actor: &Identity,
        event_id: EventId,
        status: EventStatus,
    ) -> Result<EventRecord, HubError> {
        actor.require_organizer()?;
        let entry_lock = self.events.get_owned(event_id, &actor.user_id).await?;
        let mut record = entry_lock.write().await;

        if record.status == status {
            return Ok(record.clone());
        }
        match (record.status, status) {
            (EventStatus::Upcoming, EventStatus::Completed) => {
                record.status = EventStatus::Completed;
                record.updated_at = Utc::now();
                tracing::info!(%event_id, "event completed");
                Ok(record.clone())
            }
            (from, to) => Err(HubError::InvalidTransition {
                from: from.to_string(),
                to: to.to_string(),
            }),
        }
    }

    /// Returns a full clone of one event.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::EventNotFound`] for an unknown event.
    pub async fn get(&self, event_id: EventId) -> Result<EventRecord, HubError> {
        let entry_lock = self.events.get(event_id).await?;
        let record = entry_lock.read().await;
        Ok(record.clone())
    }

    /// Lists all events.
    pub async fn list(&self) -> Vec<EventSummary> {
        self.events.list(None).await
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{Role, UserId};

    fn organizer(id: &str) -> Identity {
        Identity::new(UserId::from(id), Role::Organizer)
    }

    fn volunteer(id: &str) -> Identity {
        Identity::new(UserId::from(id), Role::Volunteer)
    }

    fn make_new_event(quota: u32) -> NewEvent {
        NewEvent {
            title: "Food Drive".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 9, 20).unwrap_or_default(),
            location: "Community Hall".to_string(),
            category: "social".to_string(),
            description: String::new(),
            max_volunteers: quota,
            organizer_name: "Org".to_string(),
            image_url: None,
            tasks: vec!["setup".to_string()],
        }
    }

    fn make_service() -> EventService {
        EventService::new(Arc::new(EventRegistry::new()))
    }

    #[tokio::test]
    async fn volunteers_cannot_create_events() {
        let service = make_service();
        let result = service.create(&volunteer("u1"), make_new_event(5)).await;
        assert!(matches!(result, Err(HubError::Forbidden)));
    }

    #[tokio::test]
    async fn zero_quota_is_rejected() {
        let service = make_service();
        let result = service.create(&organizer("org-1"), make_new_event(0)).await;
        assert!(matches!(result, Err(HubError::Validation(_))));
    }

    #[tokio::test]
    async fn status_is_terminal_after_completion() {
        let service = make_service();
        let org = organizer("org-1");
        let Ok(event) = service.create(&org, make_new_event(5)).await else {
            panic!("create failed");
        };

        let Ok(completed) = service
            .set_status(&org, event.id, EventStatus::Completed)
            .await
        else {
            panic!("completion failed");
        };
        assert_eq!(completed.status, EventStatus::Completed);

        // Idempotent re-application.
        assert!(
            service
                .set_status(&org, event.id, EventStatus::Completed)
                .await
                .is_ok()
        );

        // Never reversed.
        let back = service
            .set_status(&org, event.id, EventStatus::Upcoming)
            .await;
        assert!(matches!(back, Err(HubError::InvalidTransition { .. })));
    }

    #[tokio::test]
    async fn update_cannot_shrink_quota_below_confirmed() {
        let service = make_service();
        let org = organizer("org-1");
        let Ok(event) = service.create(&org, make_new_event(5)).await else {
            panic!("create failed");
        };

        // Simulate three confirmed volunteers.
        let Ok(entry_lock) = service.registry().get(event.id).await else {
            panic!("event missing");
        };
        entry_lock.write().await.current_volunteers = 3;

        let patch = EventPatch {
            max_volunteers: Some(2),
            ..EventPatch::default()
        };
        let shrunk = service.update(&org, event.id, patch).await;
        assert!(matches!(shrunk, Err(HubError::Validation(_))));

        let patch = EventPatch {
            max_volunteers: Some(3),
            ..EventPatch::default()
        };
        assert!(service.update(&org, event.id, patch).await.is_ok());
    }

    #[tokio::test]
    async fn rejected_update_commits_nothing() {
        let service = make_service();
        let org = organizer("org-1");
        let Ok(event) = service.create(&org, make_new_event(5)).await else {
            panic!("create failed");
        };

        // Valid quota change paired with an invalid title: the whole
        // patch must fail without applying either field.
        let patch = EventPatch {
            max_volunteers: Some(9),
            title: Some("   ".to_string()),
            ..EventPatch::default()
        };
        let result = service.update(&org, event.id, patch).await;
        assert!(matches!(result, Err(HubError::Validation(_))));

        let Ok(unchanged) = service.get(event.id).await else {
            panic!("event missing");
        };
        assert_eq!(unchanged.max_volunteers, 5);
        assert_eq!(unchanged.title, "Food Drive");
    }

    #[tokio::test]
    async fn update_by_non_owner_is_forbidden() {
        let service = make_service();
        let Ok(event) = service
            .create(&organizer("org-1"), make_new_event(5))
            .await
        else {
            panic!("create failed");
        };

        let patch = EventPatch {
            title: Some("Hijacked".to_string()),
            ..EventPatch::default()
        };
        let result = service.update(&organizer("org-2"), event.id, patch).await;
        assert!(matches!(result, Err(HubError::Forbidden)));

        // Missing event: same error shape.
        let result = service
            .update(&organizer("org-2"), EventId::new(), EventPatch::default())
            .await;
        assert!(matches!(result, Err(HubError::Forbidden)));
    }

    #[tokio::test]
    async fn image_url_is_stored_verbatim() {
        let service = make_service();
        let org = organizer("org-1");
        let mut new = make_new_event(5);
        new.image_url = Some("not a url at all \u{1f600}".to_string());
        let Ok(event) = service.create(&org, new).await else {
            panic!("create failed");
        };
        assert_eq!(
            event.image_url.as_deref(),
            Some("not a url at all \u{1f600}")
        );
    }
}
