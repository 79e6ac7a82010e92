//! REST endpoint handlers organized by resource.

pub mod events;
pub mod feedback;
pub mod registrations;
pub mod system;
pub mod users;

use axum::Router;

use crate::app_state::AppState;

/// Composes all resource routes under `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(events::routes())
        .merge(registrations::routes())
        .merge(feedback::routes())
        .merge(users::routes())
}
