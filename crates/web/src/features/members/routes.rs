use axum::{
    Router,
    routing::{get, post},
};
use storage::Database;

use super::handlers::{
    create_member, delete_member, get_member, list_members, member_attendance, recompute_member,
};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/", get(list_members).post(create_member))
        .route("/:id", get(get_member).delete(delete_member))
        .route("/:id/recompute", post(recompute_member))
        .route("/:id/attendance", get(member_attendance))
}
