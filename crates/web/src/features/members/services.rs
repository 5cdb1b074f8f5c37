use sqlx::SqlitePool;
use storage::{
    dto::{CreateMemberRequest, DeleteMemberSummary},
    error::Result,
    models::{EventAttendance, Member},
    repository::{AttendanceRepository, MemberRepository},
    services::{aggregator, lifecycle},
};
use uuid::Uuid;

pub async fn list_members(pool: &SqlitePool, search: Option<&str>) -> Result<Vec<Member>> {
    let repo = MemberRepository::new(pool);
    match search {
        Some(query) if !query.trim().is_empty() => repo.search(query.trim()).await,
        _ => repo.list().await,
    }
}

/// Accepts either a member uuid or a computing id.
pub async fn get_member(pool: &SqlitePool, key: &str) -> Result<Member> {
    let repo = MemberRepository::new(pool);
    match key.parse::<Uuid>() {
        Ok(id) => repo.find_by_id(id).await,
        Err(_) => repo.find_by_computing_id(key).await,
    }
}

pub async fn create_member(pool: &SqlitePool, request: &CreateMemberRequest) -> Result<Member> {
    MemberRepository::new(pool).create(request).await
}

pub async fn delete_member(pool: &SqlitePool, id: Uuid) -> Result<DeleteMemberSummary> {
    lifecycle::delete_member(pool, id).await
}

pub async fn recompute_member(pool: &SqlitePool, id: Uuid) -> Result<Member> {
    aggregator::recompute_from_ledger(pool, id).await
}

pub async fn member_attendance(pool: &SqlitePool, id: Uuid) -> Result<Vec<EventAttendance>> {
    AttendanceRepository::new(pool).list_by_member(id).await
}
