//! Respawn-cycle engine
//!
//! This module provides:
//! - **Status**: last kill + fixed interval -> alive/respawning snapshot
//! - **Reconciliation**: snapping typed kill times onto a plausible cycle
//! - **Upcoming**: the short-horizon list of imminent respawns
//!
//! Everything here is pure; "now" is always an argument, never read from
//! the system clock.

mod reconcile;
mod status;
mod upcoming;

pub use reconcile::{MAX_ELAPSED_CYCLES, reconcile_kill_time};
pub use status::{BossStatus, BossStatusSnapshot, WARNING_WINDOW_SECS, calculate_status};
pub use upcoming::{UPCOMING_WINDOW_SECS, UpcomingEntry, Urgency, progress_fraction, upcoming_bosses};

#[cfg(test)]
mod status_tests;
