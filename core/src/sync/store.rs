//! Authoritative per-group sync store

use bosswatch_types::{Boss, RemoteRecord};
use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use super::local::LocalCache;
use super::remote::RemoteStore;
use crate::catalog::RosterBoss;
use crate::mapping::BossMapping;

/// Where the mapping returned by [`SyncStore::load`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncSource {
    /// Remote rows merged and reconciled.
    Remote,
    /// Remote failed; the local cache was used instead.
    LocalFallback,
    /// Remote sync is disabled for this session.
    LocalOnly,
}

/// Per-backend persistence result of a save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveOutcome {
    pub local_persisted: bool,
    /// `None` when remote sync is disabled.
    pub remote_persisted: Option<bool>,
}

impl SaveOutcome {
    /// True when nothing that was attempted failed.
    pub fn fully_synced(&self) -> bool {
        self.local_persisted && self.remote_persisted.unwrap_or(true)
    }

    /// True when the remote write was attempted and failed.
    pub fn degraded(&self) -> bool {
        self.remote_persisted == Some(false)
    }
}

/// Owner of the authoritative boss mapping for one group.
///
/// The local cache is a durable mirror and the remote store a shared one.
/// Every operation degrades rather than fails: remote errors fall back to
/// local state, local write errors leave the in-memory mapping as the
/// source of truth for the session. Mutations always build a new mapping;
/// callers never observe a partially updated one.
pub struct SyncStore {
    group_slug: String,
    roster: Vec<RosterBoss>,
    local: LocalCache,
    remote: Option<Box<dyn RemoteStore>>,
}

impl SyncStore {
    pub fn new(
        group_slug: impl Into<String>,
        roster: Vec<RosterBoss>,
        local: LocalCache,
        remote: Option<Box<dyn RemoteStore>>,
    ) -> Self {
        Self {
            group_slug: group_slug.into(),
            roster,
            local,
            remote,
        }
    }

    /// Load the authoritative mapping for the group.
    ///
    /// Remote rows win when the remote is reachable, even when the group
    /// has no rows yet; only a remote *failure* falls back to the local
    /// cache. The loaded state is reconciled against the canonical roster
    /// and written back to both backends best-effort before returning.
    pub async fn load(&self, now: DateTime<Utc>) -> (BossMapping, SyncSource) {
        let (loaded, source) = match &self.remote {
            Some(remote) => match remote.fetch_group(&self.group_slug).await {
                Ok(rows) => {
                    debug!("Fetched {} remote rows for {}", rows.len(), self.group_slug);
                    (merge_remote_rows(rows), SyncSource::Remote)
                }
                Err(e) => {
                    warn!(
                        "Remote load failed for {}, using local cache: {e}",
                        self.group_slug
                    );
                    (self.load_local(), SyncSource::LocalFallback)
                }
            },
            None => (self.load_local(), SyncSource::LocalOnly),
        };

        let reconciled = reconcile_with_roster(&loaded, &self.roster);
        self.persist(&reconciled, now).await;
        (reconciled, source)
    }

    /// Write the mapping to the local cache, then resync the remote store
    /// when enabled. Neither failure propagates.
    pub async fn save(&self, mapping: &BossMapping, now: DateTime<Utc>) -> SaveOutcome {
        self.persist(mapping, now).await
    }

    /// Replace one boss's kill time, persist, and return the new mapping.
    ///
    /// Returns `None` when the boss is not in the mapping. The updated
    /// mapping is returned even when persistence degrades.
    pub async fn update_one(
        &self,
        mapping: &BossMapping,
        boss_name: &str,
        last_killed: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Option<(BossMapping, SaveOutcome)> {
        let updated = mapping.with_kill_time(boss_name, last_killed)?;
        let outcome = self.persist(&updated, now).await;
        Some((updated, outcome))
    }

    fn load_local(&self) -> BossMapping {
        match self.local.load(&self.group_slug) {
            Ok(mapping) => mapping,
            Err(e) => {
                warn!("Local cache read failed for {}: {e}", self.group_slug);
                BossMapping::new()
            }
        }
    }

    async fn persist(&self, mapping: &BossMapping, now: DateTime<Utc>) -> SaveOutcome {
        let local_persisted = match self.local.save(&self.group_slug, mapping) {
            Ok(()) => true,
            Err(e) => {
                warn!("Local cache write failed for {}: {e}", self.group_slug);
                false
            }
        };

        let remote_persisted = match &self.remote {
            Some(remote) => Some(self.sync_remote(remote.as_ref(), mapping, now).await),
            None => None,
        };

        SaveOutcome {
            local_persisted,
            remote_persisted,
        }
    }

    /// Delete-then-insert resync of the group's remote rows. Last writer
    /// wins when two sessions race; the rows are briefly absent in between.
    async fn sync_remote(
        &self,
        remote: &dyn RemoteStore,
        mapping: &BossMapping,
        now: DateTime<Utc>,
    ) -> bool {
        if let Err(e) = remote.delete_group(&self.group_slug).await {
            warn!("Remote delete failed for {}: {e}", self.group_slug);
            return false;
        }
        let records = mapping_records(&self.group_slug, mapping, now);
        if let Err(e) = remote.insert_records(&records).await {
            warn!("Remote insert failed for {}: {e}", self.group_slug);
            return false;
        }
        debug!("Synced {} rows for {}", records.len(), self.group_slug);
        true
    }
}

/// Fold remote rows into a mapping. A duplicate boss name keeps the last
/// row's values.
fn merge_remote_rows(rows: Vec<RemoteRecord>) -> BossMapping {
    let mut mapping = BossMapping::new();
    for row in rows {
        mapping.insert(Boss {
            name: row.boss_name,
            respawn_minutes: row.respawn_minutes,
            last_killed: row.last_killed,
        });
    }
    mapping
}

/// Project the canonical roster over loaded state.
///
/// Roster bosses come first in declaration order, with stored kill times
/// kept and respawn intervals forced to the roster values. Stored bosses
/// outside the roster survive after them; a stored row with a zero
/// interval breaks the cycle math and is dropped instead.
fn reconcile_with_roster(loaded: &BossMapping, roster: &[RosterBoss]) -> BossMapping {
    let mut mapping: BossMapping = roster
        .iter()
        .map(|entry| Boss {
            name: entry.name.clone(),
            respawn_minutes: entry.respawn_minutes,
            last_killed: loaded.get(&entry.name).and_then(|b| b.last_killed),
        })
        .collect();

    for boss in loaded.iter() {
        if mapping.contains(&boss.name) {
            continue;
        }
        if boss.respawn_minutes == 0 {
            warn!("Dropping stored boss {} with a zero respawn interval", boss.name);
            continue;
        }
        mapping.insert(boss.clone());
    }
    mapping
}

/// One remote row per boss, stamped with the sync time.
fn mapping_records(
    group_slug: &str,
    mapping: &BossMapping,
    now: DateTime<Utc>,
) -> Vec<RemoteRecord> {
    mapping
        .iter()
        .map(|boss| RemoteRecord {
            group_name: group_slug.to_string(),
            boss_name: boss.name.clone(),
            respawn_minutes: boss.respawn_minutes,
            last_killed: boss.last_killed,
            updated_at: Some(now),
        })
        .collect()
}
