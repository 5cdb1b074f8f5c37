//! Bulk roster import: resolve each parsed row to a member (creating one
//! on first encounter) and credit at most one attendance per member for
//! the target event.
//!
//! Idempotence contract: importing the same roster again inserts nothing
//! and credits nothing. A failing row is logged and counted, never fatal
//! to the rest of the batch.

use sqlx::SqlitePool;

use crate::dto::{ImportSummary, RosterRow};
use crate::error::Result;
use crate::models::Event;
use crate::repository::{MemberRepository, attendance};
use crate::services::aggregator;

pub async fn import_roster(
    pool: &SqlitePool,
    event: &Event,
    rows: &[RosterRow],
) -> Result<ImportSummary> {
    let members = MemberRepository::new(pool);
    let mut summary = ImportSummary::default();

    for (index, row) in rows.iter().enumerate() {
        let name = row.name.trim();
        let computing_id = row.computing_id.trim().to_lowercase();

        if name.is_empty() || computing_id.is_empty() {
            tracing::warn!(row = index, "skipping roster row with missing name or computing id");
            summary.rows_skipped += 1;
            continue;
        }

        match credit_row(pool, &members, event, name, &computing_id).await {
            Ok((member_created, record_created)) => {
                if member_created {
                    summary.members_created += 1;
                }
                if record_created {
                    summary.records_created += 1;
                } else {
                    // Already credited for this event; re-imports land here.
                    summary.rows_skipped += 1;
                }
            }
            Err(e) => {
                tracing::warn!(row = index, %computing_id, error = %e, "roster row failed");
                summary.rows_skipped += 1;
            }
        }
    }

    tracing::info!(
        event = %event.name,
        members_created = summary.members_created,
        records_created = summary.records_created,
        rows_skipped = summary.rows_skipped,
        "roster import finished"
    );

    Ok(summary)
}

/// Returns (member created, attendance record created).
async fn credit_row(
    pool: &SqlitePool,
    members: &MemberRepository<'_>,
    event: &Event,
    name: &str,
    computing_id: &str,
) -> Result<(bool, bool)> {
    let (member, member_created) = members.get_or_create(name, computing_id).await?;

    let mut tx = pool.begin().await?;
    let inserted = attendance::create_if_absent(&mut tx, event.id, member.id, event.points).await?;
    if inserted {
        aggregator::apply_delta(&mut tx, member.id, event.date, event.points).await?;
    }
    tx.commit().await?;

    Ok((member_created, inserted))
}
