use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Member {
    pub id: Uuid,
    /// Case-folded external identifier, unique per member.
    pub computing_id: String,
    pub name: String,
    pub email: String,
    pub is_exec: bool,
    pub total_points: i64,
    pub spring_2025_total: i64,
    pub fall_2025_total: i64,
    /// Opaque credential; never serialized into responses.
    #[serde(skip_serializing)]
    #[schema(ignore)]
    pub password: Option<String>,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}
