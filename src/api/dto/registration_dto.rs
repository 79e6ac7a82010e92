//! Registration DTOs for join and decision operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Decision, EventId, Registration, RegistrationId, RegistrationStatus, UserId};

/// Request body for `POST /events/:id/join`.
///
/// The joining user comes from the identity context, never the body;
/// these fields are display snapshots only.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct JoinEventRequest {
    /// Display name to snapshot on the registration.
    #[serde(default)]
    pub user_name: Option<String>,
    /// Avatar URL to snapshot on the registration.
    #[serde(default)]
    pub user_avatar: Option<String>,
}

/// Request body for `PATCH /registrations/:id`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct DecisionRequest {
    /// The organizer's decision: `confirmed` or `rejected`.
    pub status: Decision,
}

/// Registration detail returned by join/decision/list endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct RegistrationResponse {
    /// Registration identifier.
    pub id: RegistrationId,
    /// Target event.
    pub event_id: EventId,
    /// Registered volunteer.
    pub user_id: UserId,
    /// Current status.
    pub status: RegistrationStatus,
    /// When the join request was made.
    pub joined_at: DateTime<Utc>,
    /// Display name snapshot.
    pub user_name: String,
    /// Avatar snapshot.
    pub user_avatar: Option<String>,
}

impl From<Registration> for RegistrationResponse {
    fn from(registration: Registration) -> Self {
        Self {
            id: registration.id,
            event_id: registration.event_id,
            user_id: registration.user_id,
            status: registration.status,
            joined_at: registration.joined_at,
            user_name: registration.user_name,
            user_avatar: registration.user_avatar,
        }
    }
}
