//! Event record and lifecycle.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::ids::{EventId, UserId};

/// Status lifecycle of an event.
///
/// The only legal transition is `Upcoming → Completed`; completion is
/// terminal and never reversed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    /// The event has not happened yet; registrations are open.
    Upcoming,
    /// The event has taken place. Terminal.
    Completed,
}

impl std::fmt::Display for EventStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Upcoming => write!(f, "upcoming"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

/// A capacity-limited volunteering event.
///
/// `current_volunteers` counts confirmed participants only and is
/// mutated exclusively by the registration service while holding this
/// event's write lock. Invariant: `current_volunteers <= max_volunteers`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    /// Unique event identifier (immutable after creation).
    pub id: EventId,
    /// Event title.
    pub title: String,
    /// Calendar date the event takes place.
    pub date: NaiveDate,
    /// Venue or meeting point.
    pub location: String,
    /// Free-form category label (e.g. `"environment"`).
    pub category: String,
    /// Longer description shown on the detail page.
    pub description: String,
    /// Declared quota of confirmed participants. Always at least 1.
    pub max_volunteers: u32,
    /// Confirmed participants. Never exceeds `max_volunteers`.
    pub current_volunteers: u32,
    /// Identity of the publishing organizer.
    pub organizer_id: UserId,
    /// Organizer display name, snapshotted at creation.
    pub organizer_name: String,
    /// Banner image URL from the external object store. Stored and
    /// returned unchanged; never validated beyond being a string.
    pub image_url: Option<String>,
    /// Free-form task list for volunteers.
    pub tasks: Vec<String>,
    /// Lifecycle status.
    pub status: EventStatus,
    /// Creation timestamp (immutable after creation).
    pub created_at: DateTime<Utc>,
    /// Timestamp of last mutation.
    pub updated_at: DateTime<Utc>,
}

impl EventRecord {
    /// Returns `true` if another participant can still be confirmed.
    #[must_use]
    pub const fn has_capacity(&self) -> bool {
        self.current_volunteers < self.max_volunteers
    }
}

/// Lightweight summary of an event for list endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct EventSummary {
    /// Event identifier.
    pub id: EventId,
    /// Event title.
    pub title: String,
    /// Event date.
    pub date: NaiveDate,
    /// Venue.
    pub location: String,
    /// Category label.
    pub category: String,
    /// Declared quota.
    pub max_volunteers: u32,
    /// Confirmed participants.
    pub current_volunteers: u32,
    /// Lifecycle status.
    pub status: EventStatus,
    /// Publishing organizer.
    pub organizer_id: UserId,
}

impl From<&EventRecord> for EventSummary {
    fn from(record: &EventRecord) -> Self {
        Self {
            id: record.id,
            title: record.title.clone(),
            date: record.date,
            location: record.location.clone(),
            category: record.category.clone(),
            max_volunteers: record.max_volunteers,
            current_volunteers: record.current_volunteers,
            status: record.status,
            organizer_id: record.organizer_id.clone(),
        }
    }
}
