use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use storage::{
    Database,
    dto::{CreateMemberRequest, DeleteMemberSummary},
    models::{EventAttendance, Member},
};
use utoipa::IntoParams;
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;

use super::services;

#[derive(Debug, Deserialize, IntoParams)]
pub struct MemberFilter {
    /// Substring match over name, computing id, and email.
    pub search: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/members",
    params(MemberFilter),
    responses(
        (status = 200, description = "Members listed", body = Vec<Member>)
    ),
    tag = "members"
)]
pub async fn list_members(
    State(db): State<Database>,
    Query(filter): Query<MemberFilter>,
) -> Result<Response, WebError> {
    let members = services::list_members(db.pool(), filter.search.as_deref()).await?;
    Ok(Json(members).into_response())
}

#[utoipa::path(
    get,
    path = "/api/members/{id}",
    params(("id" = String, Path, description = "Member id or computing id")),
    responses(
        (status = 200, description = "Member found", body = Member),
        (status = 404, description = "No such member")
    ),
    tag = "members"
)]
pub async fn get_member(
    State(db): State<Database>,
    Path(key): Path<String>,
) -> Result<Response, WebError> {
    let member = services::get_member(db.pool(), &key).await?;
    Ok(Json(member).into_response())
}

#[utoipa::path(
    post,
    path = "/api/members",
    request_body = CreateMemberRequest,
    responses(
        (status = 201, description = "Member created", body = Member),
        (status = 409, description = "Computing ID already taken")
    ),
    tag = "members"
)]
pub async fn create_member(
    State(db): State<Database>,
    Json(request): Json<CreateMemberRequest>,
) -> Result<Response, WebError> {
    request.validate()?;
    let member = services::create_member(db.pool(), &request).await?;
    Ok((StatusCode::CREATED, Json(member)).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/members/{id}",
    responses(
        (status = 200, description = "Member and attendance removed", body = DeleteMemberSummary),
        (status = 404, description = "No such member")
    ),
    tag = "members"
)]
pub async fn delete_member(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let summary = services::delete_member(db.pool(), id).await?;
    Ok(Json(summary).into_response())
}

#[utoipa::path(
    post,
    path = "/api/members/{id}/recompute",
    responses(
        (status = 200, description = "Counters rebuilt from the ledger", body = Member),
        (status = 404, description = "No such member")
    ),
    tag = "members"
)]
pub async fn recompute_member(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let member = services::recompute_member(db.pool(), id).await?;
    Ok(Json(member).into_response())
}

#[utoipa::path(
    get,
    path = "/api/members/{id}/attendance",
    responses(
        (status = 200, description = "Member's attendance records", body = Vec<EventAttendance>)
    ),
    tag = "members"
)]
pub async fn member_attendance(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let records = services::member_attendance(db.pool(), id).await?;
    Ok(Json(records).into_response())
}
