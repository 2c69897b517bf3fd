//! Group tracking session
//!
//! One session owns the in-memory mapping for a single group and routes
//! user intents (record, clear, refresh) through the sync store. Commands
//! are serialized by the caller; each mutation swaps in the complete new
//! mapping the store produced, so readers never observe a partial update.

use bosswatch_types::{Boss, GroupConfig};
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::mapping::BossMapping;
use crate::respawn::{BossStatusSnapshot, UpcomingEntry, calculate_status, reconcile_kill_time, upcoming_bosses};
use crate::sync::{SaveOutcome, SyncSource, SyncStore};
use crate::time_input::{TimeParseError, parse_time_input};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("unknown boss: {name}")]
    UnknownBoss { name: String },

    #[error("ambiguous boss name: {name}")]
    AmbiguousBoss { name: String, matches: Vec<String> },

    #[error(transparent)]
    Parse(#[from] TimeParseError),
}

/// Result of recording a kill.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedKill {
    pub boss_name: String,
    pub recorded_at: DateTime<Utc>,
    /// True when cycle reconciliation moved the typed time.
    pub adjusted: bool,
    pub outcome: SaveOutcome,
}

/// An open tracking session for one group.
pub struct GroupSession {
    group: GroupConfig,
    store: SyncStore,
    mapping: BossMapping,
    source: SyncSource,
}

impl GroupSession {
    /// Open a session by loading the group's reconciled mapping.
    pub async fn open(group: GroupConfig, store: SyncStore, now: DateTime<Utc>) -> Self {
        let (mapping, source) = store.load(now).await;
        Self {
            group,
            store,
            mapping,
            source,
        }
    }

    pub fn group(&self) -> &GroupConfig {
        &self.group
    }

    /// Where the current mapping came from at open/refresh time.
    pub fn source(&self) -> SyncSource {
        self.source
    }

    pub fn mapping(&self) -> &BossMapping {
        &self.mapping
    }

    /// Reload from the backends, replacing the in-memory mapping.
    pub async fn refresh(&mut self, now: DateTime<Utc>) -> SyncSource {
        let (mapping, source) = self.store.load(now).await;
        self.mapping = mapping;
        self.source = source;
        source
    }

    /// Record a kill at the current instant.
    pub async fn record_now(
        &mut self,
        name: &str,
        now: DateTime<Utc>,
    ) -> Result<RecordedKill, SessionError> {
        let canonical = self.resolve_boss(name)?;
        let outcome = self.apply(&canonical, Some(now), now).await?;
        Ok(RecordedKill {
            boss_name: canonical,
            recorded_at: now,
            adjusted: false,
            outcome,
        })
    }

    /// Record a kill at a typed time, snapping it onto a plausible cycle.
    pub async fn record_at(
        &mut self,
        name: &str,
        text: &str,
        now: DateTime<Utc>,
    ) -> Result<RecordedKill, SessionError> {
        let canonical = self.resolve_boss(name)?;
        let parsed = parse_time_input(text, now)?;
        let respawn_minutes = self
            .mapping
            .get(&canonical)
            .map(|b| b.respawn_minutes)
            .ok_or_else(|| SessionError::UnknownBoss {
                name: canonical.clone(),
            })?;
        let reconciled = reconcile_kill_time(parsed, now, respawn_minutes);
        let outcome = self.apply(&canonical, Some(reconciled), now).await?;
        Ok(RecordedKill {
            boss_name: canonical,
            recorded_at: reconciled,
            adjusted: reconciled != parsed,
            outcome,
        })
    }

    /// Clear one boss's kill record.
    pub async fn clear_one(
        &mut self,
        name: &str,
        now: DateTime<Utc>,
    ) -> Result<(String, SaveOutcome), SessionError> {
        let canonical = self.resolve_boss(name)?;
        let outcome = self.apply(&canonical, None, now).await?;
        Ok((canonical, outcome))
    }

    /// Clear every kill record in the group.
    pub async fn clear_all(&mut self, now: DateTime<Utc>) -> SaveOutcome {
        let cleared = self.mapping.with_all_cleared();
        let outcome = self.store.save(&cleared, now).await;
        self.mapping = cleared;
        outcome
    }

    /// Status snapshot per boss, in mapping order.
    pub fn status_rows(&self, now: DateTime<Utc>) -> Vec<(Boss, BossStatusSnapshot)> {
        self.mapping
            .iter()
            .map(|boss| (boss.clone(), calculate_status(boss, now)))
            .collect()
    }

    /// Bosses due within the warning horizon, soonest first.
    pub fn upcoming(&self, now: DateTime<Utc>) -> Vec<UpcomingEntry> {
        upcoming_bosses(&self.status_rows(now), now)
    }

    /// Resolve user input to a canonical boss name.
    ///
    /// Exact case-insensitive match wins; otherwise a unique
    /// case-insensitive prefix is accepted.
    pub fn resolve_boss(&self, query: &str) -> Result<String, SessionError> {
        let q = query.trim();
        if q.is_empty() {
            return Err(SessionError::UnknownBoss {
                name: q.to_string(),
            });
        }
        if let Some(boss) = self.mapping.iter().find(|b| b.name.eq_ignore_ascii_case(q)) {
            return Ok(boss.name.clone());
        }
        let needle = q.to_ascii_lowercase();
        let mut matches: Vec<String> = self
            .mapping
            .iter()
            .filter(|b| b.name.to_ascii_lowercase().starts_with(&needle))
            .map(|b| b.name.clone())
            .collect();
        match matches.len() {
            0 => Err(SessionError::UnknownBoss {
                name: q.to_string(),
            }),
            1 => Ok(matches.remove(0)),
            _ => Err(SessionError::AmbiguousBoss {
                name: q.to_string(),
                matches,
            }),
        }
    }

    async fn apply(
        &mut self,
        canonical: &str,
        last_killed: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Result<SaveOutcome, SessionError> {
        let (updated, outcome) = self
            .store
            .update_one(&self.mapping, canonical, last_killed, now)
            .await
            .ok_or_else(|| SessionError::UnknownBoss {
                name: canonical.to_string(),
            })?;
        self.mapping = updated;
        Ok(outcome)
    }
}
