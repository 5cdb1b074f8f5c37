use sqlx::{SqliteConnection, SqlitePool};
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::EventAttendance;
use crate::models::attendance::RemovedAttendance;

const ATTENDANCE_COLUMNS: &str = "id, event_id, member_id, points, created_at";

/// Read-side queries over the attendance ledger.
pub struct AttendanceRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> AttendanceRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list_by_member(&self, member_id: Uuid) -> Result<Vec<EventAttendance>> {
        let records = sqlx::query_as::<_, EventAttendance>(&format!(
            "SELECT {ATTENDANCE_COLUMNS} FROM event_attendance \
             WHERE member_id = ?1 ORDER BY created_at"
        ))
        .bind(member_id)
        .fetch_all(self.pool)
        .await?;

        Ok(records)
    }

    pub async fn list_by_event(&self, event_id: Uuid) -> Result<Vec<EventAttendance>> {
        let records = sqlx::query_as::<_, EventAttendance>(&format!(
            "SELECT {ATTENDANCE_COLUMNS} FROM event_attendance \
             WHERE event_id = ?1 ORDER BY created_at"
        ))
        .bind(event_id)
        .fetch_all(self.pool)
        .await?;

        Ok(records)
    }
}

/// Inserts the record iff the (event, member) pair is unoccupied, as a
/// single conditional statement. Returns whether it inserted.
///
/// This is the bulk-import path: a re-imported row lands here, inserts
/// nothing, and must not be credited again.
pub async fn create_if_absent(
    conn: &mut SqliteConnection,
    event_id: Uuid,
    member_id: Uuid,
    points: i64,
) -> Result<bool> {
    let result = sqlx::query(
        "INSERT INTO event_attendance (id, event_id, member_id, points) \
         VALUES (?1, ?2, ?3, ?4) \
         ON CONFLICT (event_id, member_id) DO NOTHING",
    )
    .bind(Uuid::new_v4())
    .bind(event_id)
    .bind(member_id)
    .bind(points)
    .execute(conn)
    .await?;

    Ok(result.rows_affected() == 1)
}

/// Must-not-exist insert. A second record for an occupied pair fails with
/// `Conflict`.
pub async fn insert_new(
    conn: &mut SqliteConnection,
    event_id: Uuid,
    member_id: Uuid,
    points: i64,
) -> Result<EventAttendance> {
    let record = sqlx::query_as::<_, EventAttendance>(&format!(
        "INSERT INTO event_attendance (id, event_id, member_id, points) \
         VALUES (?1, ?2, ?3, ?4) \
         RETURNING {ATTENDANCE_COLUMNS}"
    ))
    .bind(Uuid::new_v4())
    .bind(event_id)
    .bind(member_id)
    .bind(points)
    .fetch_one(conn)
    .await
    .map_err(|e| {
        StorageError::from(e).into_conflict("Attendance already recorded for this member and event")
    })?;

    Ok(record)
}

pub async fn find(
    conn: &mut SqliteConnection,
    event_id: Uuid,
    member_id: Uuid,
) -> Result<Option<EventAttendance>> {
    let record = sqlx::query_as::<_, EventAttendance>(&format!(
        "SELECT {ATTENDANCE_COLUMNS} FROM event_attendance \
         WHERE event_id = ?1 AND member_id = ?2"
    ))
    .bind(event_id)
    .bind(member_id)
    .fetch_optional(conn)
    .await?;

    Ok(record)
}

/// Overwrites the points on an existing record and returns the prior value
/// so the caller can derive the aggregate delta. Call inside the same
/// transaction that applies that delta.
pub async fn set_points(
    conn: &mut SqliteConnection,
    event_id: Uuid,
    member_id: Uuid,
    points: i64,
) -> Result<i64> {
    let prior = find(&mut *conn, event_id, member_id)
        .await?
        .ok_or(StorageError::NotFound)?
        .points;

    sqlx::query(
        "UPDATE event_attendance SET points = ?1 WHERE event_id = ?2 AND member_id = ?3",
    )
    .bind(points)
    .bind(event_id)
    .bind(member_id)
    .execute(conn)
    .await?;

    Ok(prior)
}

/// Removes every record for the event, returning (member, points) pairs so
/// the caller can reverse each contribution.
pub async fn delete_by_event(
    conn: &mut SqliteConnection,
    event_id: Uuid,
) -> Result<Vec<RemovedAttendance>> {
    let removed = sqlx::query_as::<_, RemovedAttendance>(
        "DELETE FROM event_attendance WHERE event_id = ?1 RETURNING member_id, points",
    )
    .bind(event_id)
    .fetch_all(conn)
    .await?;

    Ok(removed)
}

pub async fn delete_by_member(
    conn: &mut SqliteConnection,
    member_id: Uuid,
) -> Result<Vec<RemovedAttendance>> {
    let removed = sqlx::query_as::<_, RemovedAttendance>(
        "DELETE FROM event_attendance WHERE member_id = ?1 RETURNING member_id, points",
    )
    .bind(member_id)
    .fetch_all(conn)
    .await?;

    Ok(removed)
}
