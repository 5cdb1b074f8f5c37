use anyhow::Context;
use storage::Database;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use web::config::Config;
use web::features;

#[derive(OpenApi)]
#[openapi(
    paths(
        features::members::list_members,
        features::members::get_member,
        features::members::create_member,
        features::members::delete_member,
        features::members::recompute_member,
        features::members::member_attendance,
        features::events::list_events,
        features::events::create_event,
        features::events::delete_event,
        features::events::event_attendance,
        features::events::grant_attendance,
        features::auth::login,
        features::auth::update_password,
    ),
    components(
        schemas(
            storage::models::Member,
            storage::models::Event,
            storage::models::EventAttendance,
            storage::dto::CreateMemberRequest,
            storage::dto::CreateEventRequest,
            storage::dto::GrantAttendanceRequest,
            storage::dto::RosterRow,
            storage::dto::ImportSummary,
            storage::dto::DeleteEventSummary,
            storage::dto::DeleteMemberSummary,
            features::events::CreateEventResponse,
            features::auth::LoginRequest,
            features::auth::LoginResponse,
            features::auth::UpdatePasswordRequest,
        )
    ),
    tags(
        (name = "members", description = "Member roster and point totals"),
        (name = "events", description = "Events and attendance crediting"),
        (name = "auth", description = "Member login and password changes"),
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .init();

    tracing::info!("Starting membership points API");

    let config = Config::from_env().context("Failed to load API configuration")?;

    let db = Database::new(&config.database_url)
        .await
        .context("Failed to initialize database")?;
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database ready");

    let app = web::router(db)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let bind_address = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {bind_address}"))?;
    tracing::info!("Listening on http://{bind_address}");
    tracing::info!("Swagger UI at http://{bind_address}/swagger-ui");

    axum::serve(listener, app).await?;

    Ok(())
}
