//! # Catalog Module
//!
//! The monster catalog and the filter that turns it into search candidates.
//!
//! Catalog rows are normalized once on load: the challenge rating text is
//! parsed, its XP is looked up in the [`CrXpTable`], and environment labels
//! become [`Environment`] values. Ratings the XP table does not list leave the
//! record without XP; such records stay in the catalog but never reach the
//! search.

pub mod candidates;
pub mod filter;

pub use candidates::*;
pub use filter::*;

use crate::{
    ChallengeRating, CrXpTable, EncounterError, EncounterResult, Environment, RatingText,
};
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A catalog row as written in a data file.
#[derive(Debug, Clone, Deserialize)]
pub struct MonsterEntry {
    pub name: String,
    pub cr: RatingText,
    #[serde(default)]
    pub environments: Vec<String>,
}

/// A normalized monster record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonsterRecord {
    /// Monster name, used as the combination key
    pub name: String,
    /// Normalized challenge rating
    pub challenge_rating: ChallengeRating,
    /// XP value, absent when the rating has no XP table entry
    pub xp: Option<u32>,
    /// Environments the monster is found in
    pub environments: BTreeSet<Environment>,
}

impl MonsterRecord {
    /// Creates a record, resolving its XP from the table.
    ///
    /// # Examples
    ///
    /// ```
    /// use encountergen::{ChallengeRating, CrXpTable, Environment, MonsterRecord};
    ///
    /// let quarter: ChallengeRating = "1/4".parse().unwrap();
    /// let table = CrXpTable::new([(quarter, 50)]).unwrap();
    /// let goblin = MonsterRecord::new("Goblin", quarter, [Environment::Forest], &table);
    /// assert_eq!(goblin.xp, Some(50));
    /// assert!(goblin.is_found_in(&[Environment::Forest, Environment::Urban]));
    /// ```
    pub fn new(
        name: impl Into<String>,
        challenge_rating: ChallengeRating,
        environments: impl IntoIterator<Item = Environment>,
        cr_table: &CrXpTable,
    ) -> Self {
        Self {
            name: name.into(),
            challenge_rating,
            xp: cr_table.xp_for(challenge_rating),
            environments: environments.into_iter().collect(),
        }
    }

    /// Normalizes a raw data file row.
    pub fn from_entry(entry: MonsterEntry, cr_table: &CrXpTable) -> EncounterResult<Self> {
        let challenge_rating = entry.cr.normalize().map_err(|_| {
            EncounterError::DataIntegrity(format!(
                "Monster '{}' has an unparseable challenge rating '{}'",
                entry.name, entry.cr
            ))
        })?;

        let environments = entry
            .environments
            .iter()
            .map(|label| {
                label.parse::<Environment>().map_err(|_| {
                    EncounterError::DataIntegrity(format!(
                        "Monster '{}' lists unknown environment '{}'",
                        entry.name, label
                    ))
                })
            })
            .collect::<EncounterResult<Vec<_>>>()?;

        Ok(Self::new(entry.name, challenge_rating, environments, cr_table))
    }

    /// Returns true if the monster lives in at least one of the environments.
    pub fn is_found_in(&self, environments: &[Environment]) -> bool {
        environments.iter().any(|env| self.environments.contains(env))
    }
}

/// The full set of monsters available to the generator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MonsterCatalog {
    monsters: Vec<MonsterRecord>,
}

impl MonsterCatalog {
    pub fn new(monsters: Vec<MonsterRecord>) -> Self {
        Self { monsters }
    }

    /// Normalizes raw rows into a catalog.
    pub fn from_entries(entries: Vec<MonsterEntry>, cr_table: &CrXpTable) -> EncounterResult<Self> {
        let monsters = entries
            .into_iter()
            .map(|entry| MonsterRecord::from_entry(entry, cr_table))
            .collect::<EncounterResult<Vec<_>>>()?;

        for monster in monsters.iter().filter(|m| m.xp.is_none()) {
            warn!(
                "Monster '{}' has challenge rating {} with no XP value; it will not be used",
                monster.name, monster.challenge_rating
            );
        }

        Ok(Self { monsters })
    }

    /// Parses a JSON array of catalog rows.
    pub fn from_json(json: &str, cr_table: &CrXpTable) -> EncounterResult<Self> {
        let entries: Vec<MonsterEntry> = serde_json::from_str(json)?;
        Self::from_entries(entries, cr_table)
    }

    /// Fails on the first record without a resolvable XP value.
    pub fn require_complete(&self) -> EncounterResult<()> {
        match self.monsters.iter().find(|m| m.xp.is_none()) {
            Some(monster) => Err(EncounterError::DataIntegrity(format!(
                "Monster '{}' has no XP value for challenge rating {}",
                monster.name, monster.challenge_rating
            ))),
            None => Ok(()),
        }
    }

    /// Returns true if any record carries this name.
    pub fn contains_name(&self, name: &str) -> bool {
        self.monsters.iter().any(|m| m.name == name)
    }

    pub fn monsters(&self) -> &[MonsterRecord] {
        &self.monsters
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MonsterRecord> {
        self.monsters.iter()
    }

    pub fn len(&self) -> usize {
        self.monsters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.monsters.is_empty()
    }
}
