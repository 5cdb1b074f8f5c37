use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// Per-import report returned to the caller.
#[derive(Debug, Default, Clone, Serialize, ToSchema)]
pub struct ImportSummary {
    /// Members created on first encounter.
    pub members_created: u64,
    /// Attendance records inserted (and credited).
    pub records_created: u64,
    /// Rows skipped: malformed, already credited, or failed.
    pub rows_skipped: u64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteEventSummary {
    /// Sum of points reversed out of member counters.
    pub reversed_points: i64,
    pub records_removed: u64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteMemberSummary {
    pub records_removed: u64,
}

/// One member whose stored counters diverge from the ledger-derived
/// values. Triples are (total, spring 2025, fall 2025).
#[derive(Debug, Serialize)]
pub struct CounterDrift {
    pub member_id: Uuid,
    pub computing_id: String,
    pub stored: [i64; 3],
    pub derived: [i64; 3],
}
