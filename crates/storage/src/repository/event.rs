use sqlx::SqlitePool;
use uuid::Uuid;

use crate::dto::CreateEventRequest;
use crate::error::{Result, StorageError};
use crate::models::Event;

const EVENT_COLUMNS: &str = "id, name, date, points, created_at";

pub struct EventRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> EventRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List all events, most recent first.
    pub async fn list(&self) -> Result<Vec<Event>> {
        let events = sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events ORDER BY date DESC, created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(events)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Event> {
        sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    pub async fn create(&self, req: &CreateEventRequest) -> Result<Event> {
        let event = sqlx::query_as::<_, Event>(&format!(
            "INSERT INTO events (id, name, date, points) VALUES (?1, ?2, ?3, ?4) \
             RETURNING {EVENT_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(req.name.trim())
        .bind(req.date)
        .bind(req.points)
        .fetch_one(self.pool)
        .await?;

        Ok(event)
    }
}
