//! Group catalog loading
//!
//! The catalog defines the tracked groups and the standard boss roster
//! shared by all of them. A bundled copy ships inside the binary; a user
//! may drop a replacement at `<config-dir>/bosswatch/catalog.toml`, which
//! is taken wholesale when it parses and validates, otherwise the bundled
//! roster is used and the problem is logged.

use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use bosswatch_types::GroupConfig;
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

const BUNDLED_CATALOG: &str = include_str!("../data/catalog.toml");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog")]
    Parse {
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid catalog: {reason}")]
    Invalid { reason: String },
}

/// One roster entry: a boss and its fixed respawn interval.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RosterBoss {
    pub name: String,
    pub respawn_minutes: u32,
}

/// The full catalog: groups plus the standard roster they share.
#[derive(Debug, Clone, Deserialize)]
pub struct GroupCatalog {
    groups: Vec<GroupConfig>,
    bosses: Vec<RosterBoss>,
}

impl GroupCatalog {
    /// Parse and validate a catalog document.
    pub fn from_toml_str(text: &str) -> Result<Self, CatalogError> {
        let catalog: Self =
            toml::from_str(text).map_err(|source| CatalogError::Parse { source })?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// The roster compiled into the binary.
    pub fn bundled() -> Self {
        Self::from_toml_str(BUNDLED_CATALOG).expect("bundled catalog is valid")
    }

    /// Load the user override when present, otherwise the bundled catalog.
    pub fn load_or_bundled() -> Self {
        let Some(path) = Self::override_path() else {
            return Self::bundled();
        };
        if !path.exists() {
            return Self::bundled();
        }
        match Self::load_file(&path) {
            Ok(catalog) => {
                info!("Loaded user catalog from {}", path.display());
                catalog
            }
            Err(e) => {
                warn!("Ignoring user catalog {}: {e}", path.display());
                Self::bundled()
            }
        }
    }

    /// Where a user-supplied catalog is looked for.
    pub fn override_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("bosswatch").join("catalog.toml"))
    }

    fn load_file(path: &PathBuf) -> Result<Self, CatalogError> {
        let text = fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.clone(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn groups(&self) -> &[GroupConfig] {
        &self.groups
    }

    /// Standard roster in declaration order.
    pub fn roster(&self) -> &[RosterBoss] {
        &self.bosses
    }

    /// Look a group up by slug or display name, case-insensitively.
    pub fn find_group(&self, query: &str) -> Option<&GroupConfig> {
        let q = query.trim();
        self.groups
            .iter()
            .find(|g| g.slug.eq_ignore_ascii_case(q) || g.name.eq_ignore_ascii_case(q))
    }

    fn validate(&self) -> Result<(), CatalogError> {
        if self.groups.is_empty() {
            return Err(CatalogError::Invalid {
                reason: "no groups defined".to_string(),
            });
        }
        if self.bosses.is_empty() {
            return Err(CatalogError::Invalid {
                reason: "no bosses defined".to_string(),
            });
        }

        let mut slugs = HashSet::new();
        for group in &self.groups {
            if group.slug.trim().is_empty() || group.name.trim().is_empty() {
                return Err(CatalogError::Invalid {
                    reason: "group with empty name or slug".to_string(),
                });
            }
            if !slugs.insert(group.slug.to_ascii_lowercase()) {
                return Err(CatalogError::Invalid {
                    reason: format!("duplicate group slug: {}", group.slug),
                });
            }
        }

        let mut names = HashSet::new();
        for boss in &self.bosses {
            if boss.name.trim().is_empty() {
                return Err(CatalogError::Invalid {
                    reason: "boss with empty name".to_string(),
                });
            }
            if boss.respawn_minutes == 0 {
                return Err(CatalogError::Invalid {
                    reason: format!("boss {} has a zero respawn interval", boss.name),
                });
            }
            if !names.insert(boss.name.clone()) {
                return Err(CatalogError::Invalid {
                    reason: format!("duplicate boss name: {}", boss.name),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_catalog_parses() {
        let catalog = GroupCatalog::bundled();
        assert!(!catalog.groups().is_empty());
        assert!(!catalog.roster().is_empty());
        assert!(catalog.roster().iter().all(|b| b.respawn_minutes > 0));
    }

    #[test]
    fn test_parse_minimal_catalog() {
        let toml = r#"
[[groups]]
name = "Test Group"
slug = "test-group"

[[bosses]]
name = "Test Boss"
respawn_minutes = 60
"#;

        let catalog = GroupCatalog::from_toml_str(toml).expect("Failed to parse TOML");
        assert_eq!(catalog.groups().len(), 1);
        assert_eq!(catalog.groups()[0].slug, "test-group");
        assert_eq!(catalog.groups()[0].icon, "");
        assert_eq!(catalog.roster()[0].respawn_minutes, 60);
    }

    #[test]
    fn test_find_group_matches_slug_and_name() {
        let catalog = GroupCatalog::bundled();
        let by_slug = catalog.find_group("emberhold-1").unwrap();
        let by_name = catalog.find_group("emberhold 1").unwrap();
        assert_eq!(by_slug.slug, by_name.slug);
        assert!(catalog.find_group("no-such-group").is_none());
    }

    #[test]
    fn test_rejects_zero_respawn() {
        let toml = r#"
[[groups]]
name = "Test Group"
slug = "test-group"

[[bosses]]
name = "Broken"
respawn_minutes = 0
"#;

        let err = GroupCatalog::from_toml_str(toml).unwrap_err();
        assert!(matches!(err, CatalogError::Invalid { .. }));
    }

    #[test]
    fn test_rejects_duplicate_slug() {
        let toml = r#"
[[groups]]
name = "A"
slug = "same"

[[groups]]
name = "B"
slug = "SAME"

[[bosses]]
name = "Test Boss"
respawn_minutes = 60
"#;

        let err = GroupCatalog::from_toml_str(toml).unwrap_err();
        assert!(matches!(err, CatalogError::Invalid { .. }));
    }

    #[test]
    fn test_rejects_duplicate_boss() {
        let toml = r#"
[[groups]]
name = "Test Group"
slug = "test-group"

[[bosses]]
name = "Twice"
respawn_minutes = 60

[[bosses]]
name = "Twice"
respawn_minutes = 90
"#;

        let err = GroupCatalog::from_toml_str(toml).unwrap_err();
        assert!(matches!(err, CatalogError::Invalid { .. }));
    }
}
