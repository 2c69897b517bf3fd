//! Ordered per-group boss mapping
//!
//! The authoritative state for one group is a name-keyed collection of
//! [`Boss`] records with a stable iteration order. [`crate::sync::SyncStore`]
//! arranges that order to be catalog declaration order with any extra stored
//! bosses appended, so rendering and tests are deterministic.
//!
//! The wire form is a JSON object keyed by boss name:
//!
//! ```json
//! { "Frostmaw": { "name": "Frostmaw", "respawnMinutes": 60, "lastKilled": null } }
//! ```

use std::fmt;

use bosswatch_types::Boss;
use chrono::{DateTime, Utc};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Ordered boss-name to [`Boss`] mapping for one group.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BossMapping {
    bosses: Vec<Boss>,
}

impl BossMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a mapping from records, deduplicating by name (last one wins,
    /// first occurrence keeps its position).
    pub fn from_bosses(bosses: Vec<Boss>) -> Self {
        let mut mapping = Self::new();
        for boss in bosses {
            mapping.insert(boss);
        }
        mapping
    }

    pub fn len(&self) -> usize {
        self.bosses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bosses.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Boss> {
        self.bosses.iter().find(|b| b.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Insert or replace by name. Replacement keeps the boss's position.
    pub fn insert(&mut self, boss: Boss) {
        match self.bosses.iter_mut().find(|b| b.name == boss.name) {
            Some(slot) => *slot = boss,
            None => self.bosses.push(boss),
        }
    }

    /// New mapping with exactly one boss's kill time replaced.
    ///
    /// Returns `None` when no boss with that name exists; the original
    /// mapping is never mutated.
    pub fn with_kill_time(&self, name: &str, last_killed: Option<DateTime<Utc>>) -> Option<Self> {
        if !self.contains(name) {
            return None;
        }
        let bosses = self
            .bosses
            .iter()
            .map(|boss| {
                if boss.name == name {
                    Boss {
                        last_killed,
                        ..boss.clone()
                    }
                } else {
                    boss.clone()
                }
            })
            .collect();
        Some(Self { bosses })
    }

    /// New mapping with every kill time cleared.
    pub fn with_all_cleared(&self) -> Self {
        let bosses = self
            .bosses
            .iter()
            .map(|boss| Boss {
                last_killed: None,
                ..boss.clone()
            })
            .collect();
        Self { bosses }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Boss> {
        self.bosses.iter()
    }
}

impl FromIterator<Boss> for BossMapping {
    fn from_iter<I: IntoIterator<Item = Boss>>(iter: I) -> Self {
        Self::from_bosses(iter.into_iter().collect())
    }
}

impl Serialize for BossMapping {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.bosses.len()))?;
        for boss in &self.bosses {
            map.serialize_entry(&boss.name, boss)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for BossMapping {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct MappingVisitor;

        impl<'de> Visitor<'de> for MappingVisitor {
            type Value = BossMapping;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of boss name to boss record")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut mapping = BossMapping::new();
                while let Some((name, mut boss)) = access.next_entry::<String, Boss>()? {
                    // The key is authoritative when the record disagrees.
                    boss.name = name;
                    mapping.insert(boss);
                }
                Ok(mapping)
            }
        }

        deserializer.deserialize_map(MappingVisitor)
    }
}
