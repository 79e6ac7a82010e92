//! Registration handlers: join, list, and the organizer decision.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, patch, post};
use axum::{Json, Router};

use crate::api::dto::{DecisionRequest, JoinEventRequest, RegistrationResponse};
use crate::app_state::AppState;
use crate::domain::{EventId, Identity, RegistrationId};
use crate::error::{ErrorResponse, HubError};

/// `POST /events/:id/join` — Request to join an event.
///
/// # Errors
///
/// Returns [`HubError`] for non-volunteer actors, unknown events, or
/// duplicate registrations.
#[utoipa::path(
    post,
    path = "/api/v1/events/{id}/join",
    tag = "Registrations",
    summary = "Request to join an event",
    description = "Creates a pending registration for the acting user. Capacity is not checked at join time; quota is enforced only at confirmation.",
    params(
        ("id" = uuid::Uuid, Path, description = "Event UUID"),
    ),
    request_body = JoinEventRequest,
    responses(
        (status = 201, description = "Pending registration created", body = RegistrationResponse),
        (status = 403, description = "Actor is not a volunteer", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse),
        (status = 409, description = "Already registered", body = ErrorResponse),
    )
)]
pub async fn join_event(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<uuid::Uuid>,
    Json(req): Json<JoinEventRequest>,
) -> Result<impl IntoResponse, HubError> {
    let registration = state
        .registration_service
        .request_join(
            &identity,
            EventId::from_uuid(id),
            req.user_name,
            req.user_avatar,
        )
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(RegistrationResponse::from(registration)),
    ))
}

/// `GET /events/:id/registrations` — List an event's registrations.
///
/// # Errors
///
/// Returns [`HubError::Forbidden`] unless the actor owns the event.
#[utoipa::path(
    get,
    path = "/api/v1/events/{id}/registrations",
    tag = "Registrations",
    summary = "List registrations for an event",
    params(
        ("id" = uuid::Uuid, Path, description = "Event UUID"),
    ),
    responses(
        (status = 200, description = "Registrations, oldest first", body = Vec<RegistrationResponse>),
        (status = 403, description = "Not the owner", body = ErrorResponse),
    )
)]
pub async fn list_event_registrations(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, HubError> {
    let registrations = state
        .registration_service
        .list_for_event(&identity, EventId::from_uuid(id))
        .await?;
    let data: Vec<RegistrationResponse> = registrations
        .into_iter()
        .map(RegistrationResponse::from)
        .collect();
    Ok(Json(data))
}

/// `PATCH /registrations/:id` — Approve or reject a registration.
///
/// # Errors
///
/// Returns [`HubError`] per the decision semantics: quota exhaustion,
/// terminal-state conflicts, lock timeout, or ownership failures.
#[utoipa::path(
    patch,
    path = "/api/v1/registrations/{id}",
    tag = "Registrations",
    summary = "Decide a registration",
    description = "Approves or rejects a pending registration. Confirmation is atomic against the event quota; re-applying a terminal decision is an idempotent success.",
    params(
        ("id" = uuid::Uuid, Path, description = "Registration UUID"),
    ),
    request_body = DecisionRequest,
    responses(
        (status = 200, description = "Decided registration", body = RegistrationResponse),
        (status = 403, description = "Not the owner", body = ErrorResponse),
        (status = 409, description = "Quota exhausted or illegal transition", body = ErrorResponse),
        (status = 503, description = "Event busy, retry later", body = ErrorResponse),
    )
)]
pub async fn decide_registration(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<uuid::Uuid>,
    Json(req): Json<DecisionRequest>,
) -> Result<impl IntoResponse, HubError> {
    let registration = state
        .registration_service
        .set_status(&identity, RegistrationId::from_uuid(id), req.status)
        .await?;
    Ok(Json(RegistrationResponse::from(registration)))
}

/// Registration routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/events/{id}/join", post(join_event))
        .route("/events/{id}/registrations", get(list_event_registrations))
        .route("/registrations/{id}", patch(decide_registration))
}
