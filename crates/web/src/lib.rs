use axum::Router;
use storage::Database;
use tower_http::cors::CorsLayer;

pub mod config;
pub mod error;
pub mod features;

/// Assembles the API router. Swagger UI is mounted by the binary so tests
/// can drive the bare API.
pub fn router(db: Database) -> Router {
    Router::new()
        .nest("/api/members", features::members::routes())
        .nest("/api/events", features::events::routes())
        .nest("/api/auth", features::auth::routes())
        .layer(CorsLayer::permissive())
        .with_state(db)
}
