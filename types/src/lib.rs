//! Shared data types for Bosswatch
//!
//! This crate contains the serializable records that travel between the
//! tracker core (bosswatch-core) and its front ends: boss records, group
//! metadata, remote store rows, and the persisted application config.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Boss Records
// ─────────────────────────────────────────────────────────────────────────────

/// A tracked boss within a group.
///
/// `last_killed` stays `None` until the first recorded kill; clearing a
/// record resets it back to `None` rather than deleting the boss. The local
/// cache stores these with camelCase field names
/// (`{name, respawnMinutes, lastKilled}`), kill times as ISO-8601.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Boss {
    pub name: String,
    /// Fixed respawn interval in minutes. Always greater than zero.
    pub respawn_minutes: u32,
    #[serde(default)]
    pub last_killed: Option<DateTime<Utc>>,
}

impl Boss {
    /// Create an unkilled boss record.
    pub fn new(name: impl Into<String>, respawn_minutes: u32) -> Self {
        Self {
            name: name.into(),
            respawn_minutes,
            last_killed: None,
        }
    }

    /// Same record with a different kill time.
    pub fn with_kill(&self, last_killed: Option<DateTime<Utc>>) -> Self {
        Self {
            last_killed,
            ..self.clone()
        }
    }
}

/// One boss row in the shared remote store.
///
/// Rows are always scoped by `group_name`; a full sync deletes the group's
/// rows and inserts one row per boss. Extra columns added by the backend
/// (row ids, created timestamps) are ignored on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteRecord {
    pub group_name: String,
    pub boss_name: String,
    pub respawn_minutes: u32,
    #[serde(default)]
    pub last_killed: Option<DateTime<Utc>>,
    /// Stamped when rows are written during a sync.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Groups
// ─────────────────────────────────────────────────────────────────────────────

/// A configured tracking group (one guild instance).
///
/// The display name is what users see; `slug` is the storage partition key
/// used as the local cache key suffix and the remote `group_name` filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupConfig {
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub icon: String,
    /// Accent color token for renderers.
    #[serde(default)]
    pub color: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// App Config
// ─────────────────────────────────────────────────────────────────────────────

/// Remote store endpoint settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RemoteSettings {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub api_key: String,
}

impl RemoteSettings {
    /// Cloud sync requires both values; anything less means local-only mode.
    pub fn is_configured(&self) -> bool {
        !self.url.trim().is_empty() && !self.api_key.trim().is_empty()
    }
}

/// Application configuration.
///
/// Note: Persistence methods (load/save) are provided by bosswatch-core via
/// the `AppConfigExt` trait, as they require platform-specific dependencies.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub remote: RemoteSettings,
    /// Slug of the group to reopen automatically on startup.
    #[serde(default)]
    pub active_group: Option<String>,
}
