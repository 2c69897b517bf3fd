//! Tests for the sync store

use std::sync::{Arc, Mutex};

use bosswatch_types::{Boss, RemoteRecord};
use chrono::{DateTime, Duration, TimeZone, Utc};

use super::{LocalCache, RemoteError, RemoteStore, SyncSource, SyncStore};
use crate::catalog::RosterBoss;
use crate::mapping::BossMapping;

/// Scripted remote backend with shared state, so tests keep a handle to
/// the rows and call log after boxing a clone into the store.
#[derive(Clone, Default)]
struct MockRemote {
    fail_fetch: bool,
    fail_insert: bool,
    rows: Arc<Mutex<Vec<RemoteRecord>>>,
    calls: Arc<Mutex<Vec<&'static str>>>,
}

#[async_trait::async_trait]
impl RemoteStore for MockRemote {
    async fn fetch_group(&self, group_slug: &str) -> Result<Vec<RemoteRecord>, RemoteError> {
        self.calls.lock().unwrap().push("fetch");
        if self.fail_fetch {
            return Err(RemoteError::Status {
                operation: "select",
                status: 503,
            });
        }
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.group_name == group_slug)
            .cloned()
            .collect())
    }

    async fn delete_group(&self, group_slug: &str) -> Result<(), RemoteError> {
        self.calls.lock().unwrap().push("delete");
        self.rows
            .lock()
            .unwrap()
            .retain(|r| r.group_name != group_slug);
        Ok(())
    }

    async fn insert_records(&self, records: &[RemoteRecord]) -> Result<(), RemoteError> {
        self.calls.lock().unwrap().push("insert");
        if self.fail_insert {
            return Err(RemoteError::Status {
                operation: "insert",
                status: 503,
            });
        }
        self.rows.lock().unwrap().extend_from_slice(records);
        Ok(())
    }

    async fn fetch_all(&self) -> Result<Vec<RemoteRecord>, RemoteError> {
        Ok(self.rows.lock().unwrap().clone())
    }
}

fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
}

fn roster() -> Vec<RosterBoss> {
    vec![
        RosterBoss {
            name: "Ashen Warlord".to_string(),
            respawn_minutes: 60,
        },
        RosterBoss {
            name: "Frostmaw".to_string(),
            respawn_minutes: 90,
        },
    ]
}

fn temp_cache(tag: &str) -> LocalCache {
    let root = std::env::temp_dir().join(format!("bosswatch-store-{tag}-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&root);
    LocalCache::with_root(root)
}

fn store_with(tag: &str, remote: Option<Box<dyn RemoteStore>>) -> SyncStore {
    SyncStore::new("test-group", roster(), temp_cache(tag), remote)
}

fn remote_row(boss_name: &str, respawn_minutes: u32, last_killed: Option<DateTime<Utc>>) -> RemoteRecord {
    RemoteRecord {
        group_name: "test-group".to_string(),
        boss_name: boss_name.to_string(),
        respawn_minutes,
        last_killed,
        updated_at: None,
    }
}

#[tokio::test]
async fn test_local_only_load_seeds_roster() {
    let store = store_with("seed", None);
    let (mapping, source) = store.load(test_now()).await;

    assert_eq!(source, SyncSource::LocalOnly);
    let names: Vec<&str> = mapping.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, ["Ashen Warlord", "Frostmaw"]);
    assert!(mapping.iter().all(|b| b.last_killed.is_none()));
}

#[tokio::test]
async fn test_load_merges_remote_and_forces_canonical_intervals() {
    let remote = MockRemote::default();
    // stale interval in the stored row; reconciliation must overwrite it
    let killed = test_now() - Duration::minutes(5);
    remote
        .rows
        .lock()
        .unwrap()
        .push(remote_row("Frostmaw", 45, Some(killed)));

    let store = store_with("merge", Some(Box::new(remote.clone())));
    let (mapping, source) = store.load(test_now()).await;

    assert_eq!(source, SyncSource::Remote);
    let frostmaw = mapping.get("Frostmaw").unwrap();
    assert_eq!(frostmaw.respawn_minutes, 90);
    assert_eq!(frostmaw.last_killed, Some(killed));
    assert!(mapping.get("Ashen Warlord").unwrap().last_killed.is_none());

    // roster order regardless of remote row order
    let names: Vec<&str> = mapping.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, ["Ashen Warlord", "Frostmaw"]);

    // reconciled state written back with a sync timestamp
    let rows = remote.rows.lock().unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.updated_at == Some(test_now())));
}

#[tokio::test]
async fn test_load_keeps_rows_outside_roster() {
    let remote = MockRemote::default();
    {
        let mut rows = remote.rows.lock().unwrap();
        rows.push(remote_row("Elder Wyrm", 30, Some(test_now())));
        rows.push(remote_row("Broken Row", 0, None));
    }

    let store = store_with("extras", Some(Box::new(remote.clone())));
    let (mapping, _) = store.load(test_now()).await;

    // roster first, stored extras after; the zero-interval row is unusable
    let names: Vec<&str> = mapping.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, ["Ashen Warlord", "Frostmaw", "Elder Wyrm"]);
    let extra = mapping.get("Elder Wyrm").unwrap();
    assert_eq!(extra.respawn_minutes, 30);
    assert_eq!(extra.last_killed, Some(test_now()));

    // the write-back carries the extra row and drops the broken one
    let rows = remote.rows.lock().unwrap();
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().any(|r| r.boss_name == "Elder Wyrm"));
    assert!(rows.iter().all(|r| r.boss_name != "Broken Row"));
}

#[tokio::test]
async fn test_remote_failure_falls_back_to_local() {
    let cache = temp_cache("fallback");
    let killed = test_now() - Duration::minutes(10);
    let stored = BossMapping::from_bosses(vec![Boss {
        name: "Frostmaw".to_string(),
        respawn_minutes: 15,
        last_killed: Some(killed),
    }]);
    cache.save("test-group", &stored).unwrap();

    let remote = MockRemote {
        fail_fetch: true,
        ..Default::default()
    };
    let store = SyncStore::new("test-group", roster(), cache, Some(Box::new(remote)));
    let (mapping, source) = store.load(test_now()).await;

    assert_eq!(source, SyncSource::LocalFallback);
    let frostmaw = mapping.get("Frostmaw").unwrap();
    assert_eq!(frostmaw.last_killed, Some(killed));
    assert_eq!(frostmaw.respawn_minutes, 90);
}

#[tokio::test]
async fn test_empty_remote_wins_over_local() {
    // a reachable remote with no rows resets the group; the cache is not
    // consulted on remote success
    let cache = temp_cache("empty-remote");
    let stored = BossMapping::from_bosses(vec![
        Boss::new("Frostmaw", 90).with_kill(Some(test_now())),
    ]);
    cache.save("test-group", &stored).unwrap();

    let remote = MockRemote::default();
    let store = SyncStore::new("test-group", roster(), cache, Some(Box::new(remote)));
    let (mapping, source) = store.load(test_now()).await;

    assert_eq!(source, SyncSource::Remote);
    assert!(mapping.iter().all(|b| b.last_killed.is_none()));
}

#[tokio::test]
async fn test_save_outcome_local_only() {
    let store = store_with("save-local", None);
    let (mapping, _) = store.load(test_now()).await;

    let outcome = store.save(&mapping, test_now()).await;
    assert!(outcome.local_persisted);
    assert_eq!(outcome.remote_persisted, None);
    assert!(outcome.fully_synced());
    assert!(!outcome.degraded());
}

#[tokio::test]
async fn test_degraded_save_keeps_local_value() {
    let remote = MockRemote {
        fail_fetch: true,
        fail_insert: true,
        ..Default::default()
    };
    let store = store_with("degraded", Some(Box::new(remote)));
    let (mapping, _) = store.load(test_now()).await;

    let killed = Some(test_now() - Duration::minutes(3));
    let (updated, outcome) = store
        .update_one(&mapping, "Frostmaw", killed, test_now())
        .await
        .unwrap();

    assert_eq!(updated.get("Frostmaw").unwrap().last_killed, killed);
    assert!(outcome.local_persisted);
    assert_eq!(outcome.remote_persisted, Some(false));
    assert!(!outcome.fully_synced());
    assert!(outcome.degraded());

    // the locally persisted value survives a reload while remote is down
    let (reloaded, source) = store.load(test_now()).await;
    assert_eq!(source, SyncSource::LocalFallback);
    assert_eq!(reloaded.get("Frostmaw").unwrap().last_killed, killed);
}

#[tokio::test]
async fn test_update_one_unknown_boss() {
    let store = store_with("unknown", None);
    let (mapping, _) = store.load(test_now()).await;

    let result = store
        .update_one(&mapping, "Nobody", Some(test_now()), test_now())
        .await;
    assert!(result.is_none());
}

#[tokio::test]
async fn test_update_one_is_idempotent() {
    let store = store_with("idempotent", None);
    let (mapping, _) = store.load(test_now()).await;
    let killed = Some(test_now() - Duration::minutes(1));

    let (first, _) = store
        .update_one(&mapping, "Frostmaw", killed, test_now())
        .await
        .unwrap();
    let (second, _) = store
        .update_one(&first, "Frostmaw", killed, test_now())
        .await
        .unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_remote_sync_deletes_before_insert() {
    let remote = MockRemote::default();
    let store = store_with("order", Some(Box::new(remote.clone())));
    let mapping = BossMapping::from_bosses(vec![Boss::new("Frostmaw", 90)]);

    store.save(&mapping, test_now()).await;

    let calls = remote.calls.lock().unwrap().clone();
    assert_eq!(calls, ["delete", "insert"]);
}
