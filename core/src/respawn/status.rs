//! Boss status calculation
//!
//! Derives a display-ready snapshot from a boss record and the current time.
//! A boss with no recorded kill is simply alive. Otherwise the respawn
//! instant is `last_killed + interval`; before it the boss is respawning
//! with a countdown, after it the boss is alive again and the snapshot
//! carries an advisory projection of the next cycle boundary.

use bosswatch_types::Boss;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Countdown threshold below which a respawn counts as imminent.
pub const WARNING_WINDOW_SECS: i64 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BossStatus {
    Alive,
    Respawning,
}

/// Derived per-boss state. Never persisted; recomputed on every tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossStatusSnapshot {
    pub status: BossStatus,
    /// Whole seconds until the respawn instant. Only while respawning.
    pub seconds_until_respawn: Option<i64>,
    /// The respawn instant, or the projected next cycle boundary once the
    /// recorded respawn has already elapsed.
    pub next_respawn_at: Option<DateTime<Utc>>,
    /// True when `next_respawn_at` is the elapsed-cycle projection rather
    /// than a respawn instant derived directly from the recorded kill.
    pub theoretical: bool,
    /// True within the final warning window (0 < seconds <= 300).
    pub warning: bool,
}

/// Compute the status snapshot for one boss.
pub fn calculate_status(boss: &Boss, now: DateTime<Utc>) -> BossStatusSnapshot {
    let Some(last_killed) = boss.last_killed else {
        return BossStatusSnapshot {
            status: BossStatus::Alive,
            seconds_until_respawn: None,
            next_respawn_at: None,
            theoretical: false,
            warning: false,
        };
    };

    let interval_ms = Duration::minutes(i64::from(boss.respawn_minutes)).num_milliseconds();
    let respawn_at = last_killed + Duration::milliseconds(interval_ms);
    let until_ms = respawn_at.signed_duration_since(now).num_milliseconds();

    if until_ms > 0 {
        let seconds = until_ms / 1000;
        BossStatusSnapshot {
            status: BossStatus::Respawning,
            seconds_until_respawn: Some(seconds),
            next_respawn_at: Some(respawn_at),
            theoretical: false,
            warning: seconds > 0 && seconds <= WARNING_WINDOW_SECS,
        }
    } else {
        // The respawn already happened. Project the boundary the tracker
        // advertises for the next kill window: whole cycles elapsed since
        // the respawn instant, plus one extra cycle.
        let elapsed_ms = now.signed_duration_since(respawn_at).num_milliseconds();
        let cycles_passed = elapsed_ms / interval_ms + 1;
        let next = last_killed + Duration::milliseconds(interval_ms * (cycles_passed + 1));
        BossStatusSnapshot {
            status: BossStatus::Alive,
            seconds_until_respawn: None,
            next_respawn_at: Some(next),
            theoretical: true,
            warning: false,
        }
    }
}
