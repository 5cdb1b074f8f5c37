use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use storage::{Database, models::Member};
use utoipa::ToSchema;
use validator::Validate;

use crate::error::WebError;

use super::services;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub computing_id: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub member: Member,
    /// True while the member still authenticates with the default
    /// password; the client should prompt for a new one.
    pub needs_password_setup: bool,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdatePasswordRequest {
    #[validate(length(min = 1))]
    pub computing_id: String,
    #[validate(length(min = 8))]
    pub new_password: String,
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated", body = LoginResponse),
        (status = 401, description = "Unknown computing ID or wrong password")
    ),
    tag = "auth"
)]
pub async fn login(
    State(db): State<Database>,
    Json(request): Json<LoginRequest>,
) -> Result<Response, WebError> {
    request.validate()?;
    let response = services::login(db.pool(), &request).await?;
    Ok(Json(response).into_response())
}

#[utoipa::path(
    post,
    path = "/api/auth/password",
    request_body = UpdatePasswordRequest,
    responses(
        (status = 204, description = "Password updated"),
        (status = 404, description = "No such member")
    ),
    tag = "auth"
)]
pub async fn update_password(
    State(db): State<Database>,
    Json(request): Json<UpdatePasswordRequest>,
) -> Result<Response, WebError> {
    request.validate()?;
    services::update_password(db.pool(), &request).await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}
