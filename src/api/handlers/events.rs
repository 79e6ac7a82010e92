//! Event handlers: create, list, get, update, status transition, and
//! the organizer dashboard.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, patch, post};
use axum::{Json, Router};

use crate::api::dto::{
    CreateEventRequest, EventListResponse, EventResponse, EventStatsDto, EventSummaryDto,
    PaginationMeta, PaginationParams, UpdateEventRequest, UpdateEventStatusRequest,
};
use crate::app_state::AppState;
use crate::domain::{EventId, Identity};
use crate::error::{ErrorResponse, HubError};
use crate::service::{EventPatch, NewEvent};

/// `POST /events` — Publish a new event.
///
/// # Errors
///
/// Returns [`HubError`] on invalid input or a non-organizer actor.
#[utoipa::path(
    post,
    path = "/api/v1/events",
    tag = "Events",
    summary = "Create an event",
    description = "Publishes a capacity-limited event owned by the acting organizer.",
    request_body = CreateEventRequest,
    responses(
        (status = 201, description = "Event created", body = EventResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 403, description = "Actor is not an organizer", body = ErrorResponse),
    )
)]
pub async fn create_event(
    State(state): State<AppState>,
    identity: Identity,
    Json(req): Json<CreateEventRequest>,
) -> Result<impl IntoResponse, HubError> {
    let record = state
        .event_service
        .create(
            &identity,
            NewEvent {
                title: req.title,
                date: req.date,
                location: req.location,
                category: req.category,
                description: req.description,
                max_volunteers: req.max_volunteers,
                organizer_name: req.organizer_name,
                image_url: req.image_url,
                tasks: req.tasks,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(EventResponse::from(record))))
}

/// `GET /events` — List all events with pagination.
#[utoipa::path(
    get,
    path = "/api/v1/events",
    tag = "Events",
    summary = "List events",
    description = "Returns a paginated list of all events, soonest first.",
    params(PaginationParams),
    responses(
        (status = 200, description = "Paginated event list", body = EventListResponse),
    )
)]
pub async fn list_events(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> impl IntoResponse {
    let params = params.clamped();
    let summaries = state.event_service.list().await;

    let total = summaries.len() as u32;
    let per_page = params.per_page;
    let page = params.page;
    let total_pages = if total == 0 {
        0
    } else {
        total.div_ceil(per_page)
    };

    // Widen before multiplying: the offset of an arbitrary client-supplied
    // page number must not overflow u32.
    let start =
        usize::try_from(u64::from(page - 1) * u64::from(per_page)).unwrap_or(usize::MAX);
    let data: Vec<EventSummaryDto> = summaries
        .into_iter()
        .skip(start)
        .take(per_page as usize)
        .map(EventSummaryDto::from)
        .collect();

    Json(EventListResponse {
        data,
        pagination: PaginationMeta {
            page,
            per_page,
            total,
            total_pages,
        },
    })
}

/// `GET /events/:id` — Get event details.
///
/// # Errors
///
/// Returns [`HubError::EventNotFound`] if the event does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/events/{id}",
    tag = "Events",
    summary = "Get event details",
    params(
        ("id" = uuid::Uuid, Path, description = "Event UUID"),
    ),
    responses(
        (status = 200, description = "Event details", body = EventResponse),
        (status = 404, description = "Event not found", body = ErrorResponse),
    )
)]
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, HubError> {
    let record = state.event_service.get(EventId::from_uuid(id)).await?;
    Ok(Json(EventResponse::from(record)))
}

/// `PATCH /events/:id` — Update an owned event.
///
/// # Errors
///
/// Returns [`HubError`] on ownership or validation failures.
#[utoipa::path(
    patch,
    path = "/api/v1/events/{id}",
    tag = "Events",
    summary = "Update an event",
    description = "Partially updates an event. Only the owning organizer may update; shrinking the quota below the confirmed count is rejected.",
    params(
        ("id" = uuid::Uuid, Path, description = "Event UUID"),
    ),
    request_body = UpdateEventRequest,
    responses(
        (status = 200, description = "Updated event", body = EventResponse),
        (status = 400, description = "Invalid update", body = ErrorResponse),
        (status = 403, description = "Not the owner", body = ErrorResponse),
    )
)]
pub async fn update_event(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<uuid::Uuid>,
    Json(req): Json<UpdateEventRequest>,
) -> Result<impl IntoResponse, HubError> {
    let record = state
        .event_service
        .update(
            &identity,
            EventId::from_uuid(id),
            EventPatch {
                title: req.title,
                date: req.date,
                location: req.location,
                category: req.category,
                description: req.description,
                max_volunteers: req.max_volunteers,
                image_url: req.image_url,
                tasks: req.tasks,
            },
        )
        .await?;
    Ok(Json(EventResponse::from(record)))
}

/// `PATCH /events/:id/status` — Transition an owned event's status.
///
/// # Errors
///
/// Returns [`HubError::InvalidTransition`] for a reversal attempt.
#[utoipa::path(
    patch,
    path = "/api/v1/events/{id}/status",
    tag = "Events",
    summary = "Set event status",
    description = "Marks an event completed. Completion is terminal; re-applying the current status is a no-op.",
    params(
        ("id" = uuid::Uuid, Path, description = "Event UUID"),
    ),
    request_body = UpdateEventStatusRequest,
    responses(
        (status = 200, description = "Updated event", body = EventResponse),
        (status = 403, description = "Not the owner", body = ErrorResponse),
        (status = 409, description = "Illegal transition", body = ErrorResponse),
    )
)]
pub async fn set_event_status(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<uuid::Uuid>,
    Json(req): Json<UpdateEventStatusRequest>,
) -> Result<impl IntoResponse, HubError> {
    let record = state
        .event_service
        .set_status(&identity, EventId::from_uuid(id), req.status)
        .await?;
    Ok(Json(EventResponse::from(record)))
}

/// `GET /organizer/dashboard` — Owned events with rating statistics.
///
/// # Errors
///
/// Returns [`HubError::Forbidden`] for volunteers.
#[utoipa::path(
    get,
    path = "/api/v1/organizer/dashboard",
    tag = "Events",
    summary = "Organizer dashboard",
    description = "Returns every event owned by the acting organizer with average rating and feedback count, aggregated in a single pass.",
    responses(
        (status = 200, description = "Events with statistics", body = Vec<EventStatsDto>),
        (status = 403, description = "Actor is not an organizer", body = ErrorResponse),
    )
)]
pub async fn organizer_dashboard(
    State(state): State<AppState>,
    identity: Identity,
) -> Result<impl IntoResponse, HubError> {
    let stats = state
        .dashboard_service
        .organizer_dashboard(&identity)
        .await?;
    let data: Vec<EventStatsDto> = stats.into_iter().map(EventStatsDto::from).collect();
    Ok(Json(data))
}

/// Event routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/events", post(create_event).get(list_events))
        .route("/events/{id}", get(get_event).patch(update_event))
        .route("/events/{id}/status", patch(set_event_status))
        .route("/organizer/dashboard", get(organizer_dashboard))
}
