use axum::{Router, routing::post};
use storage::Database;

use super::handlers::{login, update_password};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/login", post(login))
        .route("/password", post(update_password))
}
