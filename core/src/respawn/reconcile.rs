//! Kill-time cycle reconciliation
//!
//! Typed kill times are loose: a bare clock time can land in the future
//! (the kill was "yesterday 23:50" entered after midnight) or weeks in the
//! past (a month/day typo). Rather than rejecting such input, the candidate
//! is snapped onto a plausible respawn cycle relative to now. This is a
//! best-effort heuristic; the user can always re-record.

use chrono::{DateTime, Duration, Utc};

/// How many whole cycles a record may lag behind now before it is pulled
/// forward to a recent cycle.
pub const MAX_ELAPSED_CYCLES: i64 = 10;

/// Snap a candidate kill time onto a plausible cycle.
///
/// A future candidate is stepped back by whole intervals until it is at or
/// before `now` (the step count is the ceiling of the lead divided by the
/// interval). A candidate older than [`MAX_ELAPSED_CYCLES`] intervals is
/// stepped forward by whole intervals until its age is back inside that
/// ceiling. Anything else passes through unchanged.
pub fn reconcile_kill_time(
    candidate: DateTime<Utc>,
    now: DateTime<Utc>,
    respawn_minutes: u32,
) -> DateTime<Utc> {
    let interval_ms = Duration::minutes(i64::from(respawn_minutes)).num_milliseconds();
    let mut adjusted = candidate;

    let lead_ms = adjusted.signed_duration_since(now).num_milliseconds();
    if lead_ms > 0 {
        let cycles = (lead_ms + interval_ms - 1) / interval_ms;
        adjusted = adjusted - Duration::milliseconds(interval_ms * cycles);
    }

    let age_ms = now.signed_duration_since(adjusted).num_milliseconds();
    let ceiling_ms = interval_ms * MAX_ELAPSED_CYCLES;
    if age_ms > ceiling_ms {
        let cycles = (age_ms - ceiling_ms) / interval_ms + 1;
        adjusted = adjusted + Duration::milliseconds(interval_ms * cycles);
    }

    adjusted
}
