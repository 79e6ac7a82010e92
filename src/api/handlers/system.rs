//! System endpoints: health check and the badge catalog.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::app_state::AppState;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
struct HealthResponse {
    status: String,
    timestamp: String,
    version: String,
}

/// `GET /health` — Service health status.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Returns service health status, version, and current timestamp.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

/// Static badge catalog entry.
#[derive(Debug, Serialize, ToSchema)]
struct BadgeInfo {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    completions_required: usize,
}

/// `GET /config/badges` — List the badge catalog.
#[utoipa::path(
    get,
    path = "/config/badges",
    tag = "System",
    summary = "List the badge catalog",
    description = "Returns the static badge thresholds the service derives achievements from.",
    responses(
        (status = 200, description = "Badge catalog", body = Vec<BadgeInfo>),
    )
)]
pub async fn badge_catalog_handler() -> impl IntoResponse {
    let catalog = vec![
        BadgeInfo {
            id: "first-step",
            name: "First Step",
            description: "Completed your first volunteering event",
            completions_required: 1,
        },
        BadgeInfo {
            id: "helping-hand",
            name: "Helping Hand",
            description: "Completed three volunteering events",
            completions_required: 3,
        },
        BadgeInfo {
            id: "super-star",
            name: "Super Star",
            description: "Completed five volunteering events",
            completions_required: 5,
        },
    ];
    (StatusCode::OK, Json(catalog))
}

/// System routes mounted at the root level (not under /api/v1).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/config/badges", get(badge_catalog_handler))
}
