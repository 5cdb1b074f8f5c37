use sqlx::SqlitePool;
use storage::{
    dto::{CreateEventRequest, DeleteEventSummary, GrantAttendanceRequest, ImportSummary},
    error::Result,
    models::{Event, EventAttendance},
    repository::{AttendanceRepository, EventRepository},
    services::{attendance, lifecycle},
};
use uuid::Uuid;

pub async fn list_events(pool: &SqlitePool) -> Result<Vec<Event>> {
    EventRepository::new(pool).list().await
}

pub async fn create_event(
    pool: &SqlitePool,
    request: &CreateEventRequest,
) -> Result<(Event, ImportSummary)> {
    lifecycle::create_event_with_roster(pool, request).await
}

pub async fn delete_event(pool: &SqlitePool, id: Uuid) -> Result<DeleteEventSummary> {
    lifecycle::delete_event(pool, id).await
}

pub async fn event_attendance(pool: &SqlitePool, id: Uuid) -> Result<Vec<EventAttendance>> {
    AttendanceRepository::new(pool).list_by_event(id).await
}

pub async fn grant_attendance(
    pool: &SqlitePool,
    event_id: Uuid,
    request: &GrantAttendanceRequest,
) -> Result<storage::models::Member> {
    attendance::grant_attendance(pool, event_id, request.member_id, request.points).await
}
