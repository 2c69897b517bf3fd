//! Application configuration
//!
//! This module re-exports the shared config types from bosswatch-types and
//! provides persistence plus remote credential resolution for AppConfig.
//!
//! Remote credentials are never compiled in. They come from the config
//! file, with the `BOSSWATCH_REMOTE_URL` / `BOSSWATCH_REMOTE_KEY`
//! environment variables taking precedence when set. Whether cloud sync is
//! enabled is decided once at startup from the resolved settings; missing
//! credentials select local-only mode, they are not an error.

pub use bosswatch_types::{AppConfig, RemoteSettings};
use tracing::warn;

/// Environment override for the remote endpoint URL.
pub const REMOTE_URL_ENV: &str = "BOSSWATCH_REMOTE_URL";
/// Environment override for the remote API key.
pub const REMOTE_KEY_ENV: &str = "BOSSWATCH_REMOTE_KEY";

/// Extension trait for AppConfig persistence and credential resolution
pub trait AppConfigExt {
    fn load() -> Self;
    fn save(self);
    fn resolved_remote(&self) -> RemoteSettings;
    fn remote_enabled(&self) -> bool;
}

impl AppConfigExt for AppConfig {
    fn load() -> Self {
        confy::load("bosswatch", "config").unwrap_or_else(|e| {
            warn!("Failed to load configuration, using defaults: {e}");
            Self::default()
        })
    }

    fn save(self) {
        confy::store("bosswatch", "config", self).expect("Failed to save configuration");
    }

    /// Settings from the config file with environment overrides applied.
    fn resolved_remote(&self) -> RemoteSettings {
        let mut remote = self.remote.clone();
        if let Ok(url) = std::env::var(REMOTE_URL_ENV) {
            if !url.trim().is_empty() {
                remote.url = url;
            }
        }
        if let Ok(key) = std::env::var(REMOTE_KEY_ENV) {
            if !key.trim().is_empty() {
                remote.api_key = key;
            }
        }
        remote
    }

    fn remote_enabled(&self) -> bool {
        self.resolved_remote().is_configured()
    }
}
