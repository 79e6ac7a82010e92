//! Feedback record left by a volunteer after an event.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{EventId, UserId};
use crate::error::HubError;

/// Inclusive rating bounds.
pub const MIN_RATING: u8 = 1;
/// Inclusive rating bounds.
pub const MAX_RATING: u8 = 5;

/// A review for a completed event. At most one per `(event, user)`;
/// updated in place rather than appended.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feedback {
    /// Reviewed event.
    pub event_id: EventId,
    /// Reviewing volunteer.
    pub user_id: UserId,
    /// Integer rating in `[1, 5]`.
    pub rating: u8,
    /// Free-form comment.
    pub comment: String,
    /// First submission time.
    pub submitted_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

impl Feedback {
    /// Creates a feedback record, validating the rating range.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Validation`] if `rating` is outside `[1, 5]`.
    pub fn new(
        event_id: EventId,
        user_id: UserId,
        rating: u8,
        comment: String,
    ) -> Result<Self, HubError> {
        validate_rating(rating)?;
        let now = Utc::now();
        Ok(Self {
            event_id,
            user_id,
            rating,
            comment,
            submitted_at: now,
            updated_at: now,
        })
    }
}

/// Checks that a rating lies in `[1, 5]`.
///
/// # Errors
///
/// Returns [`HubError::Validation`] otherwise.
pub fn validate_rating(rating: u8) -> Result<(), HubError> {
    if (MIN_RATING..=MAX_RATING).contains(&rating) {
        Ok(())
    } else {
        Err(HubError::Validation(format!(
            "rating must be between {MIN_RATING} and {MAX_RATING}, got {rating}"
        )))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn rating_bounds_are_inclusive() {
        assert!(validate_rating(1).is_ok());
        assert!(validate_rating(5).is_ok());
        assert!(matches!(validate_rating(0), Err(HubError::Validation(_))));
        assert!(matches!(validate_rating(6), Err(HubError::Validation(_))));
    }
}
