//! Event-related DTOs for create, update, list, and dashboard operations.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::common_dto::PaginationMeta;
use crate::domain::{EventId, EventRecord, EventStatus, EventSummary, UserId};
use crate::service::EventWithStats;

/// Request body for `POST /events`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateEventRequest {
    /// Event title.
    pub title: String,
    /// Calendar date (ISO-8601).
    pub date: NaiveDate,
    /// Venue.
    pub location: String,
    /// Category label.
    pub category: String,
    /// Long description.
    #[serde(default)]
    pub description: String,
    /// Declared quota of confirmed participants. At least 1.
    pub max_volunteers: u32,
    /// Organizer display name.
    pub organizer_name: String,
    /// Banner image URL (opaque, produced by the external object store).
    #[serde(default)]
    pub image_url: Option<String>,
    /// Task list for volunteers.
    #[serde(default)]
    pub tasks: Vec<String>,
}

/// Request body for `PATCH /events/:id`. Omitted fields stay unchanged.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateEventRequest {
    /// New title.
    #[serde(default)]
    pub title: Option<String>,
    /// New date.
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// New venue.
    #[serde(default)]
    pub location: Option<String>,
    /// New category.
    #[serde(default)]
    pub category: Option<String>,
    /// New description.
    #[serde(default)]
    pub description: Option<String>,
    /// New quota; rejected if below the current confirmed count.
    #[serde(default)]
    pub max_volunteers: Option<u32>,
    /// New banner URL.
    #[serde(default)]
    pub image_url: Option<String>,
    /// New task list.
    #[serde(default)]
    pub tasks: Option<Vec<String>>,
}

/// Request body for `PATCH /events/:id/status`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateEventStatusRequest {
    /// Target status.
    pub status: EventStatus,
}

/// Full event detail returned by create/get/update endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct EventResponse {
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
    /// Long description.
    pub description: String,
    /// Declared quota.
    pub max_volunteers: u32,
    /// Confirmed participants.
    pub current_volunteers: u32,
    /// Publishing organizer.
    pub organizer_id: UserId,
    /// Organizer display name.
    pub organizer_name: String,
    /// Banner image URL, returned unchanged.
    pub image_url: Option<String>,
    /// Task list.
    pub tasks: Vec<String>,
    /// Lifecycle status.
    pub status: EventStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<EventRecord> for EventResponse {
    fn from(record: EventRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            date: record.date,
            location: record.location,
            category: record.category,
            description: record.description,
            max_volunteers: record.max_volunteers,
            current_volunteers: record.current_volunteers,
            organizer_id: record.organizer_id,
            organizer_name: record.organizer_name,
            image_url: record.image_url,
            tasks: record.tasks,
            status: record.status,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// Event summary for list responses.
#[derive(Debug, Serialize, ToSchema)]
pub struct EventSummaryDto {
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

impl From<EventSummary> for EventSummaryDto {
    fn from(summary: EventSummary) -> Self {
        Self {
            id: summary.id,
            title: summary.title,
            date: summary.date,
            location: summary.location,
            category: summary.category,
            max_volunteers: summary.max_volunteers,
            current_volunteers: summary.current_volunteers,
            status: summary.status,
            organizer_id: summary.organizer_id,
        }
    }
}

/// Paginated list response for `GET /events`.
#[derive(Debug, Serialize, ToSchema)]
pub struct EventListResponse {
    /// Page of event summaries.
    pub data: Vec<EventSummaryDto>,
    /// Pagination metadata.
    pub pagination: PaginationMeta,
}

/// Event summary with feedback statistics for the organizer dashboard.
#[derive(Debug, Serialize, ToSchema)]
pub struct EventStatsDto {
    /// The event.
    #[serde(flatten)]
    pub event: EventSummaryDto,
    /// Average rating rounded to one decimal; `0.0` with no feedback.
    pub avg_rating: f64,
    /// Number of feedback rows.
    pub feedback_count: u32,
}

impl From<EventWithStats> for EventStatsDto {
    fn from(stats: EventWithStats) -> Self {
        Self {
            event: stats.event.into(),
            avg_rating: stats.avg_rating,
            feedback_count: stats.feedback_count,
        }
    }
}
