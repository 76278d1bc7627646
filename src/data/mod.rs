//! # Data Module
//!
//! Loads the rule tables and monster catalog, either from JSON compiled into
//! the binary or from a directory holding the same three files.

use crate::{CrXpTable, EncounterResult, MonsterCatalog, ThresholdTable};
use log::debug;
use std::fs;
use std::path::Path;

/// File name of the level threshold table.
pub const THRESHOLD_TABLE_FILE: &str = "threshold_table.json";

/// File name of the challenge rating to XP table.
pub const CR_TO_XP_FILE: &str = "cr_to_xp.json";

/// File name of the monster catalog.
pub const MONSTER_MANUAL_FILE: &str = "monster_manual.json";

const EMBEDDED_THRESHOLDS: &str = include_str!("../../data/threshold_table.json");
const EMBEDDED_CR_TO_XP: &str = include_str!("../../data/cr_to_xp.json");
const EMBEDDED_MONSTERS: &str = include_str!("../../data/monster_manual.json");

/// Rule tables and catalog for a generator.
#[derive(Debug, Clone)]
pub struct RuleBook {
    thresholds: ThresholdTable,
    cr_table: CrXpTable,
    catalog: MonsterCatalog,
}

impl RuleBook {
    pub fn new(thresholds: ThresholdTable, cr_table: CrXpTable, catalog: MonsterCatalog) -> Self {
        Self {
            thresholds,
            cr_table,
            catalog,
        }
    }

    /// Builds a rule book from the data compiled into the crate.
    ///
    /// # Examples
    ///
    /// ```
    /// use encountergen::{Difficulty, RuleBook};
    ///
    /// let rules = RuleBook::embedded().unwrap();
    /// assert_eq!(rules.thresholds().threshold(1, Difficulty::Medium).unwrap(), 50);
    /// assert!(!rules.catalog().is_empty());
    /// ```
    pub fn embedded() -> EncounterResult<Self> {
        Self::from_json(EMBEDDED_THRESHOLDS, EMBEDDED_CR_TO_XP, EMBEDDED_MONSTERS)
    }

    /// Loads the three data files from a directory.
    pub fn from_dir(dir: impl AsRef<Path>) -> EncounterResult<Self> {
        let dir = dir.as_ref();
        debug!("Loading rule data from {}", dir.display());
        let thresholds = fs::read_to_string(dir.join(THRESHOLD_TABLE_FILE))?;
        let cr_to_xp = fs::read_to_string(dir.join(CR_TO_XP_FILE))?;
        let monsters = fs::read_to_string(dir.join(MONSTER_MANUAL_FILE))?;
        Self::from_json(&thresholds, &cr_to_xp, &monsters)
    }

    /// Parses the three JSON documents.
    pub fn from_json(thresholds: &str, cr_to_xp: &str, monsters: &str) -> EncounterResult<Self> {
        let thresholds = ThresholdTable::from_json(thresholds)?;
        let cr_table = CrXpTable::from_json(cr_to_xp)?;
        let catalog = MonsterCatalog::from_json(monsters, &cr_table)?;
        debug!(
            "Loaded {} threshold levels, {} challenge ratings, {} monsters",
            thresholds.len(),
            cr_table.len(),
            catalog.len()
        );
        Ok(Self::new(thresholds, cr_table, catalog))
    }

    pub fn thresholds(&self) -> &ThresholdTable {
        &self.thresholds
    }

    pub fn cr_table(&self) -> &CrXpTable {
        &self.cr_table
    }

    pub fn catalog(&self) -> &MonsterCatalog {
        &self.catalog
    }
}
