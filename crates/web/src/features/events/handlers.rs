use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use storage::{
    Database,
    dto::{CreateEventRequest, DeleteEventSummary, GrantAttendanceRequest, ImportSummary},
    models::{Event, EventAttendance, Member},
};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;

use super::services;

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateEventResponse {
    pub event: Event,
    /// Roster import report; all zeros when no roster was attached.
    pub import: ImportSummary,
}

#[utoipa::path(
    get,
    path = "/api/events",
    responses(
        (status = 200, description = "Events listed, most recent first", body = Vec<Event>)
    ),
    tag = "events"
)]
pub async fn list_events(State(db): State<Database>) -> Result<Response, WebError> {
    let events = services::list_events(db.pool()).await?;
    Ok(Json(events).into_response())
}

#[utoipa::path(
    post,
    path = "/api/events",
    request_body = CreateEventRequest,
    responses(
        (status = 201, description = "Event created; attached roster credited", body = CreateEventResponse),
        (status = 400, description = "Invalid event data")
    ),
    tag = "events"
)]
pub async fn create_event(
    State(db): State<Database>,
    Json(request): Json<CreateEventRequest>,
) -> Result<Response, WebError> {
    request.validate()?;
    let (event, import) = services::create_event(db.pool(), &request).await?;
    Ok((StatusCode::CREATED, Json(CreateEventResponse { event, import })).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/events/{id}",
    responses(
        (status = 200, description = "Event deleted, points reversed", body = DeleteEventSummary),
        (status = 404, description = "No such event")
    ),
    tag = "events"
)]
pub async fn delete_event(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let summary = services::delete_event(db.pool(), id).await?;
    Ok(Json(summary).into_response())
}

#[utoipa::path(
    get,
    path = "/api/events/{id}/attendance",
    responses(
        (status = 200, description = "Attendance records for the event", body = Vec<EventAttendance>)
    ),
    tag = "events"
)]
pub async fn event_attendance(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let records = services::event_attendance(db.pool(), id).await?;
    Ok(Json(records).into_response())
}

#[utoipa::path(
    post,
    path = "/api/events/{id}/attendance",
    request_body = GrantAttendanceRequest,
    responses(
        (status = 200, description = "Attendance granted or points updated", body = Member),
        (status = 404, description = "No such event or member")
    ),
    tag = "events"
)]
pub async fn grant_attendance(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
    Json(request): Json<GrantAttendanceRequest>,
) -> Result<Response, WebError> {
    request.validate()?;
    let member = services::grant_attendance(db.pool(), id, &request).await?;
    Ok(Json(member).into_response())
}
