use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Ledger entry: one row per (event, member) pair, carrying the points
/// actually granted. The pair is unique, which is what makes every
/// ledger-writing path idempotent.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct EventAttendance {
    pub id: Uuid,
    pub event_id: Uuid,
    pub member_id: Uuid,
    pub points: i64,
    pub created_at: chrono::NaiveDateTime,
}

/// Projection returned by the bulk-delete paths: enough to reverse each
/// record's contribution to member counters.
#[derive(Debug, Clone, FromRow)]
pub struct RemovedAttendance {
    pub member_id: Uuid,
    pub points: i64,
}
