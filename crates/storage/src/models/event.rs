use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Event {
    pub id: Uuid,
    pub name: String,
    pub date: chrono::NaiveDate,
    /// Default credit granted per attendee.
    pub points: i64,
    pub created_at: chrono::NaiveDateTime,
}
