//! Event and member lifecycle. Deletions are single transactions: reverse
//! every point the rows granted, remove the ledger rows, remove the parent
//! row. No reader ever observes an event whose points are half-reversed.

use sqlx::SqlitePool;
use uuid::Uuid;

use crate::dto::{CreateEventRequest, DeleteEventSummary, DeleteMemberSummary, ImportSummary};
use crate::error::{Result, StorageError};
use crate::models::Event;
use crate::repository::{EventRepository, MemberRepository, attendance};
use crate::services::{aggregator, import};

pub async fn create_event(pool: &SqlitePool, req: &CreateEventRequest) -> Result<Event> {
    if req.points < 1 {
        return Err(StorageError::Validation(
            "event points must be at least 1".to_string(),
        ));
    }

    let event = EventRepository::new(pool).create(req).await?;
    tracing::info!(event = %event.name, date = %event.date, points = event.points, "event created");
    Ok(event)
}

/// Creates the event, then credits the attached roster (if any) against it.
pub async fn create_event_with_roster(
    pool: &SqlitePool,
    req: &CreateEventRequest,
) -> Result<(Event, ImportSummary)> {
    let event = create_event(pool, req).await?;
    let summary = if req.roster.is_empty() {
        ImportSummary::default()
    } else {
        import::import_roster(pool, &event, &req.roster).await?
    };
    Ok((event, summary))
}

/// Deletes the event after reversing every point it granted. The reversal,
/// the ledger deletes, and the event delete commit together; any failure
/// aborts the whole deletion.
pub async fn delete_event(pool: &SqlitePool, event_id: Uuid) -> Result<DeleteEventSummary> {
    let event = EventRepository::new(pool).find_by_id(event_id).await?;

    let mut tx = pool.begin().await?;

    let removed = attendance::delete_by_event(&mut tx, event_id).await?;
    let mut reversed_points = 0i64;
    for record in &removed {
        aggregator::apply_delta(&mut tx, record.member_id, event.date, -record.points).await?;
        reversed_points += record.points;
    }

    sqlx::query("DELETE FROM events WHERE id = ?1")
        .bind(event_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    let summary = DeleteEventSummary {
        reversed_points,
        records_removed: removed.len() as u64,
    };
    tracing::info!(
        event = %event.name,
        reversed_points = summary.reversed_points,
        records_removed = summary.records_removed,
        "event deleted"
    );

    Ok(summary)
}

/// Deletes the member and their attendance records. Counters need no
/// adjustment; they leave with the row.
pub async fn delete_member(pool: &SqlitePool, member_id: Uuid) -> Result<DeleteMemberSummary> {
    let member = MemberRepository::new(pool).find_by_id(member_id).await?;

    let mut tx = pool.begin().await?;

    let removed = attendance::delete_by_member(&mut tx, member_id).await?;

    sqlx::query("DELETE FROM members WHERE id = ?1")
        .bind(member_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    tracing::info!(
        member = %member.computing_id,
        records_removed = removed.len(),
        "member deleted"
    );

    Ok(DeleteMemberSummary {
        records_removed: removed.len() as u64,
    })
}
