use axum::{
    Router,
    routing::{delete, get},
};
use storage::Database;

use super::handlers::{create_event, delete_event, event_attendance, grant_attendance, list_events};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/", get(list_events).post(create_event))
        .route("/:id", delete(delete_event))
        .route("/:id/attendance", get(event_attendance).post(grant_attendance))
}
