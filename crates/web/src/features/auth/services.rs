use sqlx::SqlitePool;
use storage::{StorageError, services::auth};

use crate::error::WebError;

use super::handlers::{LoginRequest, LoginResponse, UpdatePasswordRequest};

pub async fn login(pool: &SqlitePool, request: &LoginRequest) -> Result<LoginResponse, WebError> {
    let member = auth::authenticate(pool, &request.computing_id, &request.password)
        .await
        .map_err(|e| match e {
            // Do not reveal whether the id exists.
            StorageError::NotFound => WebError::Unauthorized,
            other => WebError::Storage(other),
        })?;

    let needs_password_setup = auth::needs_password_setup(&member);
    Ok(LoginResponse {
        member,
        needs_password_setup,
    })
}

pub async fn update_password(
    pool: &SqlitePool,
    request: &UpdatePasswordRequest,
) -> Result<(), WebError> {
    auth::update_password(pool, &request.computing_id, &request.new_password).await?;
    Ok(())
}
