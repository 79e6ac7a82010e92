//! Registration service: join requests and the quota-enforcing decision.
//!
//! [`RegistrationService::set_status`] is the only code path that
//! mutates `current_volunteers`. It runs entirely inside the target
//! event's write guard: capacity and registration status are re-read
//! there, and the status write plus counter increment happen with no
//! await point in between, so a cancelled request commits either both
//! effects or neither.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use crate::domain::{
    Decision, EventId, EventRegistry, Identity, Registration, RegistrationId, RegistrationStatus,
    RegistrationStore,
};
use crate::error::HubError;

/// Fallback display name when the join request carries none.
const DEFAULT_USER_NAME: &str = "Volunteer";

/// Orchestration layer for the registration lifecycle.
///
/// Stateless coordinator: owns references to [`EventRegistry`] and
/// [`RegistrationStore`]. The decision method follows the pattern:
/// acquire the per-event lock (bounded wait) → re-check state → mutate
/// both records synchronously → log → return.
#[derive(Debug, Clone)]
pub struct RegistrationService {
    events: Arc<EventRegistry>,
    registrations: Arc<RegistrationStore>,
    lock_wait_timeout: Duration,
}

impl RegistrationService {
    /// Creates a new `RegistrationService`.
    #[must_use]
    pub fn new(
        events: Arc<EventRegistry>,
        registrations: Arc<RegistrationStore>,
        lock_wait_timeout: Duration,
    ) -> Self {
        Self {
            events,
            registrations,
            lock_wait_timeout,
        }
    }

    /// Returns a reference to the inner [`RegistrationStore`].
    #[must_use]
    pub fn registrations(&self) -> &Arc<RegistrationStore> {
        &self.registrations
    }

    /// Creates a pending registration for the acting user.
    ///
    /// Capacity is deliberately not checked here: a pending request is a
    /// request-to-reserve, not a reservation. Quota is enforced only at
    /// confirmation time.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Forbidden`] for organizers,
    /// [`HubError::EventNotFound`] for an unknown event and
    /// [`HubError::AlreadyRegistered`] if the user already has a
    /// registration for it in any status.
    pub async fn request_join(
        &self,
        actor: &Identity,
        event_id: EventId,
        user_name: Option<String>,
        user_avatar: Option<String>,
    ) -> Result<Registration, HubError> {
        actor.require_volunteer()?;

        // Existence check only; the event lock is not needed because
        // nothing on the event is mutated at join time.
        let _ = self.events.get(event_id).await?;

        let registration = Registration::new(
            event_id,
            actor.user_id.clone(),
            user_name.unwrap_or_else(|| DEFAULT_USER_NAME.to_string()),
            user_avatar,
        );
        let stored = self.registrations.insert_unique(registration).await?;

        tracing::info!(%event_id, user_id = %actor.user_id, "join requested");
        Ok(stored)
    }

    /// Applies the organizer's decision to a pending registration.
    ///
    /// This is the sole capacity-mutating operation. The per-event write
    /// guard is acquired with a bounded wait; on expiry the caller gets
    /// [`HubError::Busy`] with nothing committed. Whichever confirmation
    /// wins the race for the last slot succeeds; every other attempt on
    /// that event observes the exhausted quota at the moment it enters
    /// the section, never before and never silently dropped.
    ///
    /// # Errors
    ///
    /// - [`HubError::Forbidden`] if the actor is not the event's
    ///   organizer, or the registration/event cannot be resolved;
    ///   existence is not disclosed to unauthorized callers.
    /// - [`HubError::InvalidTransition`] if the registration is already
    ///   in a terminal state different from the target.
    /// - [`HubError::QuotaExceeded`] if confirming against a full event;
    ///   the registration stays pending.
    /// - [`HubError::Busy`] if the event lock wait timed out.
    pub async fn set_status(
        &self,
        actor: &Identity,
        registration_id: RegistrationId,
        decision: Decision,
    ) -> Result<Registration, HubError> {
        actor.require_organizer()?;

        let reg_lock = self
            .registrations
            .get(registration_id)
            .await
            .map_err(|_| HubError::Forbidden)?;
        let event_id = reg_lock.read().await.event_id;

        let event_lock = self.events.get_owned(event_id, &actor.user_id).await?;

        // Lock order is event → registration everywhere in this crate.
        let mut event = tokio::time::timeout(self.lock_wait_timeout, event_lock.write())
            .await
            .map_err(|_| HubError::Busy)?;
        let mut registration = reg_lock.write().await;

        // No await point below this line: the transition commits
        // all-or-nothing even if the request task is cancelled.
        let target = decision.as_status();
        if registration.status == target {
            // Re-applying a terminal decision is an idempotent success.
            return Ok(registration.clone());
        }
        if registration.status.is_terminal() {
            return Err(HubError::InvalidTransition {
                from: registration.status.to_string(),
                to: target.to_string(),
            });
        }

        match decision {
            Decision::Confirmed => {
                if !event.has_capacity() {
                    return Err(HubError::QuotaExceeded {
                        confirmed: event.current_volunteers,
                        quota: event.max_volunteers,
                    });
                }
                registration.status = RegistrationStatus::Confirmed;
                event.current_volunteers += 1;
                event.updated_at = Utc::now();
            }
            Decision::Rejected => {
                registration.status = RegistrationStatus::Rejected;
            }
        }

        tracing::info!(
            %registration_id,
            %event_id,
            status = %registration.status,
            confirmed = event.current_volunteers,
            quota = event.max_volunteers,
            "registration decided"
        );
        Ok(registration.clone())
    }

    /// Lists all registrations for an event. Organizer-owned operation.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Forbidden`] if the actor does not own the
    /// event (or it does not exist).
    pub async fn list_for_event(
        &self,
        actor: &Identity,
        event_id: EventId,
    ) -> Result<Vec<Registration>, HubError> {
        actor.require_organizer()?;
        let _ = self.events.get_owned(event_id, &actor.user_id).await?;
        Ok(self.registrations.list_for_event(event_id).await)
    }

    /// Lists the acting user's own registrations.
    pub async fn list_own(&self, actor: &Identity) -> Vec<Registration> {
        self.registrations.list_for_user(&actor.user_id).await
    }
}
