//! Manual attendance path: mark a member present, or change the points an
//! existing attendance is worth. Either way the counter adjustment is the
//! exact delta, applied in the same transaction as the ledger write.

use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::Result;
use crate::models::Member;
use crate::repository::{EventRepository, MemberRepository, attendance};
use crate::services::aggregator;

/// Grants `points` (defaulting to the event's value) to `member_id` for
/// `event_id`. Creates the attendance record if absent, otherwise
/// overwrites its points; counters move by `new - prior`, never to the new
/// value outright. Returns the member with updated counters.
pub async fn grant_attendance(
    pool: &SqlitePool,
    event_id: Uuid,
    member_id: Uuid,
    points: Option<i64>,
) -> Result<Member> {
    let event = EventRepository::new(pool).find_by_id(event_id).await?;
    let member = MemberRepository::new(pool).find_by_id(member_id).await?;
    let points = points.unwrap_or(event.points);

    let mut tx = pool.begin().await?;

    let inserted = attendance::create_if_absent(&mut tx, event_id, member_id, points).await?;
    let delta = if inserted {
        points
    } else {
        let prior = attendance::set_points(&mut tx, event_id, member_id, points).await?;
        points - prior
    };

    if delta != 0 {
        aggregator::apply_delta(&mut tx, member_id, event.date, delta).await?;
    }

    tx.commit().await?;

    tracing::debug!(
        member = %member.computing_id,
        event = %event.name,
        points,
        delta,
        "attendance granted"
    );

    MemberRepository::new(pool).find_by_id(member_id).await
}
