//! Local durable cache
//!
//! One JSON file per group under the platform data directory:
//! `<data-dir>/bosswatch/groups/boss-data-<slug>.json`. The file content is
//! the serialized boss mapping, the same name-keyed object shape the remote
//! rows are folded into.

use std::fs;
use std::path::PathBuf;

use super::error::CacheError;
use crate::mapping::BossMapping;

/// File-per-group JSON cache.
#[derive(Debug, Clone)]
pub struct LocalCache {
    root: PathBuf,
}

impl Default for LocalCache {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalCache {
    /// Cache rooted at the platform data directory.
    pub fn new() -> Self {
        let root = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("bosswatch")
            .join("groups");
        Self { root }
    }

    /// Cache rooted at an explicit directory.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn file_path(&self, group_slug: &str) -> PathBuf {
        self.root.join(format!("boss-data-{group_slug}.json"))
    }

    /// Read the last saved mapping for a group.
    ///
    /// A missing file is an empty mapping, not an error.
    pub fn load(&self, group_slug: &str) -> Result<BossMapping, CacheError> {
        let path = self.file_path(group_slug);
        if !path.exists() {
            return Ok(BossMapping::new());
        }
        let text = fs::read_to_string(&path).map_err(|source| CacheError::ReadFile {
            path: path.clone(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| CacheError::Malformed { path, source })
    }

    /// Replace the saved mapping for a group.
    pub fn save(&self, group_slug: &str, mapping: &BossMapping) -> Result<(), CacheError> {
        fs::create_dir_all(&self.root).map_err(|source| CacheError::CreateDir {
            path: self.root.clone(),
            source,
        })?;
        let text = serde_json::to_string_pretty(mapping).map_err(CacheError::Encode)?;
        let path = self.file_path(group_slug);
        fs::write(&path, text).map_err(|source| CacheError::WriteFile { path, source })
    }
}
