//! Badge service: pull-based achievement derivation.
//!
//! Badges are recomputed from registration history on every read; there
//! is no persisted awarded flag to go stale and therefore nothing to
//! synchronize.

use std::sync::Arc;

use crate::domain::badge::{Badge, badges_for};
use crate::domain::{
    EventRegistry, EventStatus, Identity, RegistrationStatus, RegistrationStore,
};

/// Derives achievement badges from confirmed participation.
#[derive(Debug, Clone)]
pub struct BadgeService {
    events: Arc<EventRegistry>,
    registrations: Arc<RegistrationStore>,
}

impl BadgeService {
    /// Creates a new `BadgeService`.
    #[must_use]
    pub fn new(events: Arc<EventRegistry>, registrations: Arc<RegistrationStore>) -> Self {
        Self {
            events,
            registrations,
        }
    }

    /// Returns the acting user's badges.
    ///
    /// A registration qualifies when it is confirmed and its event has
    /// completed. Thresholds are cumulative; five completions yield all
    /// three badges.
    pub async fn user_badges(&self, actor: &Identity) -> Vec<Badge> {
        let registrations = self.registrations.list_for_user(&actor.user_id).await;

        // list_for_user returns oldest-first, so the threshold-crossing
        // timestamps land in the right order.
        let mut qualifying = Vec::new();
        for registration in registrations {
            if registration.status != RegistrationStatus::Confirmed {
                continue;
            }
            let Ok(entry_lock) = self.events.get(registration.event_id).await else {
                continue;
            };
            if entry_lock.read().await.status == EventStatus::Completed {
                qualifying.push(registration.joined_at);
            }
        }

        badges_for(&qualifying)
    }
}
