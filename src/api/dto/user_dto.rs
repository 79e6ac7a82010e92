//! DTOs for user-scoped resources: bookmarks and badges.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::EventId;
use crate::domain::badge::Badge;

/// The user's bookmark set, returned by every bookmark endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct BookmarkSetResponse {
    /// Bookmarked event ids, sorted.
    pub event_ids: Vec<EventId>,
}

/// A derived achievement badge.
#[derive(Debug, Serialize, ToSchema)]
pub struct BadgeDto {
    /// Stable slug identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Achievement description.
    pub description: String,
    /// Icon name.
    pub icon: String,
    /// Accent color (hex).
    pub color: String,
    /// When the badge was earned.
    pub earned_at: DateTime<Utc>,
}

impl From<Badge> for BadgeDto {
    fn from(badge: Badge) -> Self {
        Self {
            id: badge.id.to_string(),
            name: badge.name.to_string(),
            description: badge.description.to_string(),
            icon: badge.icon.to_string(),
            color: badge.color.to_string(),
            earned_at: badge.earned_at,
        }
    }
}
