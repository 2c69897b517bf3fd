//! Imminent-respawn listing
//!
//! Filters status snapshots down to bosses whose next respawn lies within
//! the short horizon, sorted soonest-first with an urgency tier per entry.
//! Theoretical projections qualify like real respawn instants; the entry
//! keeps the flag so renderers can mark them.

use bosswatch_types::Boss;
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::BossStatusSnapshot;

/// Horizon of the upcoming list (five minutes).
pub const UPCOMING_WINDOW_SECS: i64 = 300;

/// How loudly an imminent respawn should be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Urgency {
    /// One minute or less.
    Critical,
    /// Three minutes or less.
    High,
    /// Inside the horizon.
    Elevated,
}

impl Urgency {
    fn for_seconds(secs: i64) -> Self {
        if secs <= 60 {
            Self::Critical
        } else if secs <= 180 {
            Self::High
        } else {
            Self::Elevated
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Elevated => "elevated",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpcomingEntry {
    pub name: String,
    pub respawn_at: DateTime<Utc>,
    pub seconds_until: i64,
    pub urgency: Urgency,
    pub theoretical: bool,
}

/// Select the bosses due within [`UPCOMING_WINDOW_SECS`], soonest first.
pub fn upcoming_bosses(
    rows: &[(Boss, BossStatusSnapshot)],
    now: DateTime<Utc>,
) -> Vec<UpcomingEntry> {
    let mut entries: Vec<UpcomingEntry> = rows
        .iter()
        .filter_map(|(boss, snapshot)| {
            let respawn_at = snapshot.next_respawn_at?;
            let until_ms = respawn_at.signed_duration_since(now).num_milliseconds();
            if until_ms <= 0 || until_ms > UPCOMING_WINDOW_SECS * 1000 {
                return None;
            }
            let seconds_until = until_ms / 1000;
            Some(UpcomingEntry {
                name: boss.name.clone(),
                respawn_at,
                seconds_until,
                urgency: Urgency::for_seconds(seconds_until),
                theoretical: snapshot.theoretical,
            })
        })
        .collect();

    entries.sort_by_key(|e| e.respawn_at);
    entries
}

/// Fraction of the horizon already consumed, clamped to `0.0..=1.0`.
pub fn progress_fraction(seconds_until: i64) -> f32 {
    let f = (UPCOMING_WINDOW_SECS - seconds_until) as f32 / UPCOMING_WINDOW_SECS as f32;
    f.clamp(0.0, 1.0)
}
