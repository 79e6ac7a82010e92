//! Feedback handlers: submit and update.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use crate::api::dto::{FeedbackRequest, FeedbackResponse};
use crate::app_state::AppState;
use crate::domain::{EventId, Identity};
use crate::error::{ErrorResponse, HubError};

/// `POST /events/:id/feedback` — Submit feedback for a completed event.
///
/// # Errors
///
/// Returns [`HubError`] for non-volunteer actors, unknown events,
/// events that have not completed, out-of-range ratings, or duplicate
/// submissions.
#[utoipa::path(
    post,
    path = "/api/v1/events/{id}/feedback",
    tag = "Feedback",
    summary = "Submit feedback",
    params(
        ("id" = uuid::Uuid, Path, description = "Event UUID"),
    ),
    request_body = FeedbackRequest,
    responses(
        (status = 201, description = "Feedback stored", body = FeedbackResponse),
        (status = 400, description = "Invalid rating or event not completed", body = ErrorResponse),
        (status = 403, description = "Actor is not a volunteer", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse),
    )
)]
pub async fn submit_feedback(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<uuid::Uuid>,
    Json(req): Json<FeedbackRequest>,
) -> Result<impl IntoResponse, HubError> {
    let feedback = state
        .feedback_service
        .submit(&identity, EventId::from_uuid(id), req.rating, req.comment)
        .await?;
    Ok((StatusCode::CREATED, Json(FeedbackResponse::from(feedback))))
}

/// `PATCH /events/:id/feedback` — Update own feedback in place.
///
/// # Errors
///
/// Returns [`HubError::FeedbackNotFound`] if nothing was submitted yet.
#[utoipa::path(
    patch,
    path = "/api/v1/events/{id}/feedback",
    tag = "Feedback",
    summary = "Update feedback",
    params(
        ("id" = uuid::Uuid, Path, description = "Event UUID"),
    ),
    request_body = FeedbackRequest,
    responses(
        (status = 200, description = "Updated feedback", body = FeedbackResponse),
        (status = 400, description = "Invalid rating", body = ErrorResponse),
        (status = 403, description = "Actor is not a volunteer", body = ErrorResponse),
        (status = 404, description = "No feedback to update", body = ErrorResponse),
    )
)]
pub async fn update_feedback(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<uuid::Uuid>,
    Json(req): Json<FeedbackRequest>,
) -> Result<impl IntoResponse, HubError> {
    let feedback = state
        .feedback_service
        .update(&identity, EventId::from_uuid(id), req.rating, req.comment)
        .await?;
    Ok(Json(FeedbackResponse::from(feedback)))
}

/// Feedback routes.
pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/events/{id}/feedback",
        post(submit_feedback).patch(update_feedback),
    )
}
