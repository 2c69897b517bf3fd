//! Tests for boss status snapshots
//!
//! Pins the countdown math, the warning window edges, and the elapsed-cycle
//! projection arithmetic.

use bosswatch_types::Boss;
use chrono::{DateTime, Duration, TimeZone, Utc};

use super::{BossStatus, calculate_status};

fn make_boss(name: &str, respawn_minutes: u32, last_killed: Option<DateTime<Utc>>) -> Boss {
    Boss {
        name: name.to_string(),
        respawn_minutes,
        last_killed,
    }
}

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
}

#[test]
fn test_never_killed_is_alive_with_no_projection() {
    let boss = make_boss("Frostmaw", 360, None);
    let snap = calculate_status(&boss, base_time());

    assert_eq!(snap.status, BossStatus::Alive);
    assert_eq!(snap.seconds_until_respawn, None);
    assert_eq!(snap.next_respawn_at, None);
    assert!(!snap.theoretical);
    assert!(!snap.warning);
}

#[test]
fn test_respawning_countdown() {
    // killed 10 minutes ago on a 60 minute interval: 50 minutes out
    let killed = base_time() - Duration::minutes(10);
    let boss = make_boss("Frostmaw", 60, Some(killed));
    let snap = calculate_status(&boss, base_time());

    assert_eq!(snap.status, BossStatus::Respawning);
    assert_eq!(snap.seconds_until_respawn, Some(50 * 60));
    assert_eq!(snap.next_respawn_at, Some(killed + Duration::minutes(60)));
    assert!(!snap.theoretical);
    assert!(!snap.warning);
}

#[test]
fn test_countdown_floors_partial_seconds() {
    // 90.7 seconds out floors to 90 whole seconds
    let killed = base_time() - Duration::milliseconds(60 * 60 * 1000 - 90_700);
    let boss = make_boss("Frostmaw", 60, Some(killed));
    let snap = calculate_status(&boss, base_time());

    assert_eq!(snap.seconds_until_respawn, Some(90));
}

#[test]
fn test_warning_at_exact_window_edge() {
    // exactly 300 seconds out is still a warning
    let killed = base_time() - Duration::minutes(55);
    let boss = make_boss("Frostmaw", 60, Some(killed));
    let snap = calculate_status(&boss, base_time());

    assert_eq!(snap.seconds_until_respawn, Some(300));
    assert!(snap.warning);
}

#[test]
fn test_no_warning_outside_window() {
    let killed = base_time() - Duration::minutes(54);
    let boss = make_boss("Frostmaw", 60, Some(killed));
    let snap = calculate_status(&boss, base_time());

    assert_eq!(snap.seconds_until_respawn, Some(360));
    assert!(!snap.warning);
}

#[test]
fn test_subsecond_countdown_shows_zero_without_warning() {
    // under a second out: countdown floors to zero and no warning fires
    let killed = base_time() - Duration::milliseconds(60 * 60 * 1000 - 400);
    let boss = make_boss("Frostmaw", 60, Some(killed));
    let snap = calculate_status(&boss, base_time());

    assert_eq!(snap.status, BossStatus::Respawning);
    assert_eq!(snap.seconds_until_respawn, Some(0));
    assert!(!snap.warning);
}

#[test]
fn test_alive_at_exact_respawn_instant() {
    let killed = base_time() - Duration::minutes(60);
    let boss = make_boss("Frostmaw", 60, Some(killed));
    let snap = calculate_status(&boss, base_time());

    assert_eq!(snap.status, BossStatus::Alive);
    assert_eq!(snap.seconds_until_respawn, None);
    assert!(snap.theoretical);
    assert_eq!(snap.next_respawn_at, Some(base_time() + Duration::minutes(60)));
}

#[test]
fn test_elapsed_cycle_projection() {
    // killed 190 minutes ago on a 60 minute interval: two full cycles
    // elapsed since the respawn instant, projection lands at kill + 240
    let killed = base_time() - Duration::minutes(190);
    let boss = make_boss("Frostmaw", 60, Some(killed));
    let snap = calculate_status(&boss, base_time());

    assert_eq!(snap.status, BossStatus::Alive);
    assert_eq!(snap.seconds_until_respawn, None);
    assert_eq!(snap.next_respawn_at, Some(killed + Duration::minutes(240)));
    assert!(snap.theoretical);
    assert!(!snap.warning);
}

#[test]
fn test_projection_lands_after_now() {
    // respawned 30 minutes ago; advertised window is kill + 120
    let killed = base_time() - Duration::minutes(90);
    let boss = make_boss("Frostmaw", 60, Some(killed));
    let snap = calculate_status(&boss, base_time());

    assert_eq!(snap.next_respawn_at, Some(killed + Duration::minutes(120)));
    assert!(snap.next_respawn_at.unwrap() > base_time());
}
