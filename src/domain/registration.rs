//! Registration record and status machine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::ids::{EventId, RegistrationId, UserId};

/// Status lifecycle of a registration.
///
/// `Pending` is the only non-terminal state. `Confirmed` and `Rejected`
/// are terminal: re-applying the same terminal status is an idempotent
/// no-op, switching between terminal statuses is an invalid transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationStatus {
    /// Request-to-reserve; holds no capacity.
    Pending,
    /// Approved by the organizer; holds one slot of the event quota. Terminal.
    Confirmed,
    /// Declined by the organizer; holds no capacity. Terminal.
    Rejected,
}

impl RegistrationStatus {
    /// Returns `true` for `Confirmed` and `Rejected`.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Confirmed | Self::Rejected)
    }
}

impl std::fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Confirmed => write!(f, "confirmed"),
            Self::Rejected => write!(f, "rejected"),
        }
    }
}

/// The organizer's decision on a pending registration.
///
/// A separate type from [`RegistrationStatus`] so that `Pending` is
/// unrepresentable as a decision target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    /// Approve the volunteer; consumes one quota slot.
    Confirmed,
    /// Decline the volunteer; no capacity effect.
    Rejected,
}

impl Decision {
    /// The registration status this decision resolves to.
    #[must_use]
    pub const fn as_status(&self) -> RegistrationStatus {
        match self {
            Self::Confirmed => RegistrationStatus::Confirmed,
            Self::Rejected => RegistrationStatus::Rejected,
        }
    }
}

/// A volunteer's request to join an event.
///
/// At most one registration exists per `(event_id, user_id)` pair,
/// enforced at creation time by the registration store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registration {
    /// Unique registration identifier.
    pub id: RegistrationId,
    /// Target event.
    pub event_id: EventId,
    /// Requesting volunteer.
    pub user_id: UserId,
    /// Current status.
    pub status: RegistrationStatus,
    /// When the join request was made.
    pub joined_at: DateTime<Utc>,
    /// Volunteer display name, snapshotted at join time.
    pub user_name: String,
    /// Volunteer avatar URL, snapshotted at join time.
    pub user_avatar: Option<String>,
}

impl Registration {
    /// Creates a new pending registration.
    #[must_use]
    pub fn new(
        event_id: EventId,
        user_id: UserId,
        user_name: String,
        user_avatar: Option<String>,
    ) -> Self {
        Self {
            id: RegistrationId::new(),
            event_id,
            user_id,
            status: RegistrationStatus::Pending,
            joined_at: Utc::now(),
            user_name,
            user_avatar,
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn pending_is_not_terminal() {
        assert!(!RegistrationStatus::Pending.is_terminal());
        assert!(RegistrationStatus::Confirmed.is_terminal());
        assert!(RegistrationStatus::Rejected.is_terminal());
    }

    #[test]
    fn new_registration_starts_pending() {
        let reg = Registration::new(
            EventId::new(),
            UserId::from("u1"),
            "Sam".to_string(),
            None,
        );
        assert_eq!(reg.status, RegistrationStatus::Pending);
    }

    #[test]
    fn decision_maps_to_status() {
        assert_eq!(
            Decision::Confirmed.as_status(),
            RegistrationStatus::Confirmed
        );
        assert_eq!(Decision::Rejected.as_status(), RegistrationStatus::Rejected);
    }
}
