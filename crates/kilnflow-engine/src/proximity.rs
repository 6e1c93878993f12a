//! Time-separation checks between rule boundaries.
//!
//! A kiln loaded at its cutoff stays occupied for a full firing cycle, so two
//! load events on the same kiln need more than 24 hours between them. The
//! same reasoning crosses the midnight boundary: a rule loading late on day
//! *N* conflicts with a rule loading early on day *N + 1*, even though the
//! two patterns never share a weekday.

use chrono::{Duration, NaiveDateTime, NaiveTime};

use crate::weekday::WeekdaySet;

/// Whether two datetimes fall within `window` of each other (inclusive).
pub fn within_window(a: NaiveDateTime, b: NaiveDateTime, window: Duration) -> bool {
    (a - b).abs() <= window
}

/// Whether two load datetimes are within 24 hours of each other.
///
/// Inclusive at exactly 24 hours: one cycle ending as the next begins is
/// still a conflict. Symmetric in its arguments.
pub fn too_close(a: NaiveDateTime, b: NaiveDateTime) -> bool {
    within_window(a, b, Duration::hours(24))
}

/// Whether two weekly patterns load too close together across a day boundary.
///
/// For each day the existing rule loads on, the candidate conflicts if it
/// loads *later* on the previous weekday or *earlier* on the next weekday;
/// either way the two load events land within one firing cycle of each other.
/// Equal load times on adjacent days are exactly 24 hours apart and pass;
/// same-day overlap is the weekday-overlap check's concern, not this one's.
pub fn adjacent_load_conflict(
    candidate_days: WeekdaySet,
    candidate_load: NaiveTime,
    existing_days: WeekdaySet,
    existing_load: NaiveTime,
) -> bool {
    existing_days.iter().any(|day| {
        (candidate_days.contains(day.pred()) && candidate_load > existing_load)
            || (candidate_days.contains(day.succ()) && candidate_load < existing_load)
    })
}

// ── Tests ───────────────────────────────────────────────────────────────────
