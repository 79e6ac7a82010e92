//! User-scoped handlers: own registrations, badges, and bookmarks.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use axum::{Json, Router};

use crate::api::dto::{BadgeDto, BookmarkSetResponse, RegistrationResponse};
use crate::app_state::AppState;
use crate::domain::{EventId, Identity};

/// `GET /users/me/registrations` — The acting user's registrations.
#[utoipa::path(
    get,
    path = "/api/v1/users/me/registrations",
    tag = "Users",
    summary = "List own registrations",
    responses(
        (status = 200, description = "Registrations, oldest first", body = Vec<RegistrationResponse>),
    )
)]
pub async fn my_registrations(
    State(state): State<AppState>,
    identity: Identity,
) -> impl IntoResponse {
    let registrations = state.registration_service.list_own(&identity).await;
    let data: Vec<RegistrationResponse> = registrations
        .into_iter()
        .map(RegistrationResponse::from)
        .collect();
    Json(data)
}

/// `GET /users/me/badges` — The acting user's achievement badges.
#[utoipa::path(
    get,
    path = "/api/v1/users/me/badges",
    tag = "Users",
    summary = "List own badges",
    description = "Recomputed on every read from confirmed registrations on completed events; thresholds are cumulative.",
    responses(
        (status = 200, description = "Earned badges", body = Vec<BadgeDto>),
    )
)]
pub async fn my_badges(State(state): State<AppState>, identity: Identity) -> impl IntoResponse {
    let badges = state.badge_service.user_badges(&identity).await;
    let data: Vec<BadgeDto> = badges.into_iter().map(BadgeDto::from).collect();
    Json(data)
}

/// `GET /users/me/bookmarks` — The acting user's bookmark set.
#[utoipa::path(
    get,
    path = "/api/v1/users/me/bookmarks",
    tag = "Users",
    summary = "List own bookmarks",
    responses(
        (status = 200, description = "Bookmarked event ids", body = BookmarkSetResponse),
    )
)]
pub async fn my_bookmarks(State(state): State<AppState>, identity: Identity) -> impl IntoResponse {
    let event_ids = state.bookmarks.get(&identity.user_id).await;
    Json(BookmarkSetResponse { event_ids })
}

/// `PUT /users/me/bookmarks/:event_id` — Add a bookmark (idempotent).
#[utoipa::path(
    put,
    path = "/api/v1/users/me/bookmarks/{event_id}",
    tag = "Users",
    summary = "Add a bookmark",
    description = "Idempotent: repeating the call leaves the set unchanged, so it is safe to retry.",
    params(
        ("event_id" = uuid::Uuid, Path, description = "Event UUID"),
    ),
    responses(
        (status = 200, description = "New bookmark set", body = BookmarkSetResponse),
    )
)]
pub async fn add_bookmark(
    State(state): State<AppState>,
    identity: Identity,
    Path(event_id): Path<uuid::Uuid>,
) -> impl IntoResponse {
    let event_ids = state
        .bookmarks
        .add(&identity.user_id, EventId::from_uuid(event_id))
        .await;
    Json(BookmarkSetResponse { event_ids })
}

/// `DELETE /users/me/bookmarks/:event_id` — Remove a bookmark (idempotent).
#[utoipa::path(
    delete,
    path = "/api/v1/users/me/bookmarks/{event_id}",
    tag = "Users",
    summary = "Remove a bookmark",
    description = "Idempotent: removing an absent bookmark is a no-op.",
    params(
        ("event_id" = uuid::Uuid, Path, description = "Event UUID"),
    ),
    responses(
        (status = 200, description = "New bookmark set", body = BookmarkSetResponse),
    )
)]
pub async fn remove_bookmark(
    State(state): State<AppState>,
    identity: Identity,
    Path(event_id): Path<uuid::Uuid>,
) -> impl IntoResponse {
    let event_ids = state
        .bookmarks
        .remove(&identity.user_id, EventId::from_uuid(event_id))
        .await;
    Json(BookmarkSetResponse { event_ids })
}

/// `POST /users/me/bookmarks/:event_id/toggle` — Flip bookmark membership.
#[utoipa::path(
    post,
    path = "/api/v1/users/me/bookmarks/{event_id}/toggle",
    tag = "Users",
    summary = "Toggle a bookmark",
    description = "Convenience wrapper over add/remove. NOT retry-safe: a retried toggle after a timeout can undo the original call. Clients that retry must use PUT/DELETE instead.",
    params(
        ("event_id" = uuid::Uuid, Path, description = "Event UUID"),
    ),
    responses(
        (status = 200, description = "New bookmark set", body = BookmarkSetResponse),
    )
)]
pub async fn toggle_bookmark(
    State(state): State<AppState>,
    identity: Identity,
    Path(event_id): Path<uuid::Uuid>,
) -> impl IntoResponse {
    let event_ids = state
        .bookmarks
        .toggle(&identity.user_id, EventId::from_uuid(event_id))
        .await;
    Json(BookmarkSetResponse { event_ids })
}

/// User-scoped routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users/me/registrations", get(my_registrations))
        .route("/users/me/badges", get(my_badges))
        .route("/users/me/bookmarks", get(my_bookmarks))
        .route(
            "/users/me/bookmarks/{event_id}",
            put(add_bookmark).delete(remove_bookmark),
        )
        .route("/users/me/bookmarks/{event_id}/toggle", post(toggle_bookmark))
}
