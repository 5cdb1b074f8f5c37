use chrono::NaiveDate;

/// Term bucket an event's points are routed into.
///
/// This is the single source of truth for term boundaries. Nothing else in
/// the workspace is allowed to compare event dates against term ranges;
/// inconsistent inline checks are how per-term counters drift from the
/// ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Term {
    Spring2025,
    Fall2025,
    /// Outside every recognized term. Points still count toward the
    /// member's overall total, but no term counter.
    Other,
}

const SPRING_2025_START: NaiveDate = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
const SPRING_2025_END: NaiveDate = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
const FALL_2025_START: NaiveDate = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();
const FALL_2025_END: NaiveDate = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();

impl Term {
    pub fn classify(date: NaiveDate) -> Self {
        if (SPRING_2025_START..SPRING_2025_END).contains(&date) {
            Term::Spring2025
        } else if (FALL_2025_START..FALL_2025_END).contains(&date) {
            Term::Fall2025
        } else {
            Term::Other
        }
    }

    /// Column holding this term's counter, if any.
    pub fn counter_column(self) -> Option<&'static str> {
        match self {
            Term::Spring2025 => Some("spring_2025_total"),
            Term::Fall2025 => Some("fall_2025_total"),
            Term::Other => None,
        }
    }
}
