//! Feedback DTOs for submission and update.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{EventId, Feedback, UserId};

/// Request body for `POST /events/:id/feedback` and
/// `PATCH /events/:id/feedback`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct FeedbackRequest {
    /// Integer rating in `[1, 5]`.
    pub rating: u8,
    /// Free-form comment.
    #[serde(default)]
    pub comment: String,
}

/// Feedback detail returned by submit/update endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct FeedbackResponse {
    /// Reviewed event.
    pub event_id: EventId,
    /// Reviewing volunteer.
    pub user_id: UserId,
    /// Rating.
    pub rating: u8,
    /// Comment.
    pub comment: String,
    /// First submission time.
    pub submitted_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

impl From<Feedback> for FeedbackResponse {
    fn from(feedback: Feedback) -> Self {
        Self {
            event_id: feedback.event_id,
            user_id: feedback.user_id,
            rating: feedback.rating,
            comment: feedback.comment,
            submitted_at: feedback.submitted_at,
            updated_at: feedback.updated_at,
        }
    }
}
