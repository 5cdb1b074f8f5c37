//! Keeps member counters equal to the sums over the attendance ledger.
//!
//! The three counters on a member row are a materialized view of that
//! member's attendance records. `apply_delta` is the incremental path every
//! ledger write routes through, in the same transaction as the write;
//! `recompute_from_ledger` is the authoritative rebuild used for repair.

use chrono::NaiveDate;
use sqlx::{SqliteConnection, SqlitePool};
use uuid::Uuid;

use crate::dto::CounterDrift;
use crate::error::{Result, StorageError};
use crate::models::Member;
use crate::repository::MemberRepository;
use crate::term::Term;

/// Adds `delta` to the member's overall total and, when the event date
/// falls in a recognized term, to that term's counter. One atomic UPDATE;
/// no counter value ever round-trips through application code.
///
/// Counters clamp at zero rather than failing: deletions and manual edits
/// can legitimately race a counter that has already drifted, and turning
/// that into a hard error would wedge the deletion path. Drift is surfaced
/// by [`audit`] and repaired by [`recompute_from_ledger`].
pub async fn apply_delta(
    conn: &mut SqliteConnection,
    member_id: Uuid,
    event_date: NaiveDate,
    delta: i64,
) -> Result<()> {
    let sql = match Term::classify(event_date).counter_column() {
        Some(column) => format!(
            "UPDATE members SET \
                 total_points = MAX(0, total_points + ?1), \
                 {column} = MAX(0, {column} + ?1), \
                 updated_at = datetime('now') \
             WHERE id = ?2"
        ),
        None => "UPDATE members SET \
                     total_points = MAX(0, total_points + ?1), \
                     updated_at = datetime('now') \
                 WHERE id = ?2"
            .to_string(),
    };

    let result = sqlx::query(&sql)
        .bind(delta)
        .bind(member_id)
        .execute(conn)
        .await?;

    if result.rows_affected() == 0 {
        return Err(StorageError::NotFound);
    }

    Ok(())
}

/// Ledger-derived counter triple: (total, spring 2025, fall 2025).
async fn derive_counters(
    conn: &mut SqliteConnection,
    member_id: Uuid,
) -> Result<(i64, i64, i64)> {
    let rows: Vec<(i64, NaiveDate)> = sqlx::query_as(
        "SELECT a.points, e.date FROM event_attendance a \
         JOIN events e ON e.id = a.event_id \
         WHERE a.member_id = ?1",
    )
    .bind(member_id)
    .fetch_all(conn)
    .await?;

    let mut totals = (0i64, 0i64, 0i64);
    for (points, date) in rows {
        totals.0 += points;
        match Term::classify(date) {
            Term::Spring2025 => totals.1 += points,
            Term::Fall2025 => totals.2 += points,
            Term::Other => {}
        }
    }

    Ok(totals)
}

/// Rebuilds the member's counters from the ledger. Idempotent; this is the
/// ground truth the incremental path is measured against.
pub async fn recompute_from_ledger(pool: &SqlitePool, member_id: Uuid) -> Result<Member> {
    let mut tx = pool.begin().await?;

    let (total, spring, fall) = derive_counters(&mut tx, member_id).await?;

    let result = sqlx::query(
        "UPDATE members SET \
             total_points = ?1, spring_2025_total = ?2, fall_2025_total = ?3, \
             updated_at = datetime('now') \
         WHERE id = ?4",
    )
    .bind(total)
    .bind(spring)
    .bind(fall)
    .bind(member_id)
    .execute(&mut *tx)
    .await?;

    if result.rows_affected() == 0 {
        return Err(StorageError::NotFound);
    }

    tx.commit().await?;

    MemberRepository::new(pool).find_by_id(member_id).await
}

/// Maintenance sweep: rebuild every member's counters. Returns how many
/// members were touched.
pub async fn recompute_all(pool: &SqlitePool) -> Result<u64> {
    let ids: Vec<(Uuid,)> = sqlx::query_as("SELECT id FROM members")
        .fetch_all(pool)
        .await?;

    let mut count = 0u64;
    for (id,) in ids {
        recompute_from_ledger(pool, id).await?;
        count += 1;
    }

    tracing::info!(members = count, "recomputed counters from ledger");
    Ok(count)
}

/// Reports members whose stored counters differ from the ledger-derived
/// values, without mutating anything.
pub async fn audit(pool: &SqlitePool) -> Result<Vec<CounterDrift>> {
    let members = MemberRepository::new(pool).list().await?;
    let mut conn = pool.acquire().await?;

    let mut drifted = Vec::new();
    for member in members {
        let (total, spring, fall) = derive_counters(&mut conn, member.id).await?;
        let stored = [
            member.total_points,
            member.spring_2025_total,
            member.fall_2025_total,
        ];
        let derived = [total, spring, fall];
        if stored != derived {
            drifted.push(CounterDrift {
                member_id: member.id,
                computing_id: member.computing_id,
                stored,
                derived,
            });
        }
    }

    Ok(drifted)
}
