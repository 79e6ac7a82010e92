//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::domain::BookmarkStore;
use crate::service::{
    BadgeService, DashboardService, EventService, FeedbackService, RegistrationService,
};

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Event lifecycle: create, update, status transitions.
    pub event_service: Arc<EventService>,
    /// Join requests and organizer decisions.
    pub registration_service: Arc<RegistrationService>,
    /// Organizer dashboard aggregation.
    pub dashboard_service: Arc<DashboardService>,
    /// Badge derivation from completed events.
    pub badge_service: Arc<BadgeService>,
    /// Feedback submission and updates.
    pub feedback_service: Arc<FeedbackService>,
    /// Per-user bookmark sets, accessed directly by handlers.
    pub bookmarks: Arc<BookmarkStore>,
}
