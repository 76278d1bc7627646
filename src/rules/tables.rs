//! # Rule Tables
//!
//! XP thresholds per character level and XP values per challenge rating.
//! Both tables are validated when they are built and are read-only after.

use crate::{ChallengeRating, Difficulty, EncounterError, EncounterResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// XP thresholds for a single character level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyThresholds {
    #[serde(rename = "Easy")]
    pub easy: u32,
    #[serde(rename = "Medium")]
    pub medium: u32,
    #[serde(rename = "Hard")]
    pub hard: u32,
    #[serde(rename = "Deadly")]
    pub deadly: u32,
}

impl DifficultyThresholds {
    pub fn new(easy: u32, medium: u32, hard: u32, deadly: u32) -> Self {
        Self {
            easy,
            medium,
            hard,
            deadly,
        }
    }

    /// Gets the threshold for one difficulty.
    pub fn get(&self, difficulty: Difficulty) -> u32 {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
            Difficulty::Deadly => self.deadly,
        }
    }

    fn is_ordered(&self) -> bool {
        self.easy <= self.medium && self.medium <= self.hard && self.hard <= self.deadly
    }
}

/// Character level to per-difficulty XP thresholds.
///
/// # Examples
///
/// ```
/// use encountergen::{Difficulty, DifficultyThresholds, ThresholdTable};
///
/// let table = ThresholdTable::new([
///     (1, DifficultyThresholds::new(25, 50, 75, 100)),
///     (2, DifficultyThresholds::new(50, 100, 150, 200)),
/// ])
/// .unwrap();
/// assert_eq!(table.threshold(2, Difficulty::Medium).unwrap(), 100);
/// assert!(table.threshold(3, Difficulty::Medium).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThresholdTable {
    levels: BTreeMap<u32, DifficultyThresholds>,
}

impl ThresholdTable {
    /// Builds a table from (level, thresholds) rows, checking monotonicity.
    pub fn new(rows: impl IntoIterator<Item = (u32, DifficultyThresholds)>) -> EncounterResult<Self> {
        let table = Self {
            levels: rows.into_iter().collect(),
        };
        table.validate()?;
        Ok(table)
    }

    /// Parses a JSON object keyed by level.
    pub fn from_json(json: &str) -> EncounterResult<Self> {
        let table: ThresholdTable = serde_json::from_str(json)?;
        table.validate()?;
        Ok(table)
    }

    /// Checks that thresholds never decrease with difficulty or level.
    pub fn validate(&self) -> EncounterResult<()> {
        for (level, row) in &self.levels {
            if *level == 0 {
                return Err(EncounterError::DataIntegrity(
                    "Threshold table contains level 0".to_string(),
                ));
            }
            if !row.is_ordered() {
                return Err(EncounterError::DataIntegrity(format!(
                    "Thresholds for level {} decrease with difficulty",
                    level
                )));
            }
        }

        let rows: Vec<(&u32, &DifficultyThresholds)> = self.levels.iter().collect();
        for pair in rows.windows(2) {
            let ((_, lower), (level, upper)) = (pair[0], pair[1]);
            if let Some(difficulty) = Difficulty::all()
                .iter()
                .find(|d| upper.get(**d) < lower.get(**d))
            {
                return Err(EncounterError::DataIntegrity(format!(
                    "{} threshold for level {} is lower than for the previous level",
                    difficulty, level
                )));
            }
        }

        Ok(())
    }

    /// Gets the threshold row for a level.
    pub fn row(&self, level: u32) -> EncounterResult<&DifficultyThresholds> {
        self.levels.get(&level).ok_or_else(|| {
            EncounterError::Lookup(format!("No XP thresholds for character level {}", level))
        })
    }

    /// Gets the XP threshold for a level and difficulty.
    pub fn threshold(&self, level: u32, difficulty: Difficulty) -> EncounterResult<u32> {
        Ok(self.row(level)?.get(difficulty))
    }

    /// Iterates over the levels the table covers, lowest first.
    pub fn levels(&self) -> impl Iterator<Item = u32> + '_ {
        self.levels.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

#[derive(Debug, Deserialize)]
struct CrXpRow {
    cr: ChallengeRating,
    xp: u32,
}

/// Challenge rating to XP value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrXpTable {
    entries: BTreeMap<ChallengeRating, u32>,
}

impl CrXpTable {
    /// Builds a table, rejecting conflicting XP values for one rating.
    pub fn new(rows: impl IntoIterator<Item = (ChallengeRating, u32)>) -> EncounterResult<Self> {
        let mut entries = BTreeMap::new();
        for (rating, xp) in rows {
            if let Some(existing) = entries.insert(rating, xp) {
                if existing != xp {
                    return Err(EncounterError::DataIntegrity(format!(
                        "Challenge rating {} is listed with both {} and {} XP",
                        rating, existing, xp
                    )));
                }
            }
        }
        Ok(Self { entries })
    }

    /// Parses a JSON array of `{ "cr": ..., "xp": ... }` rows.
    pub fn from_json(json: &str) -> EncounterResult<Self> {
        let rows: Vec<CrXpRow> = serde_json::from_str(json)?;
        Self::new(rows.into_iter().map(|row| (row.cr, row.xp)))
    }

    /// Gets the XP for a rating, if the table lists it.
    pub fn xp_for(&self, rating: ChallengeRating) -> Option<u32> {
        self.entries.get(&rating).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ChallengeRating, u32)> + '_ {
        self.entries.iter().map(|(rating, xp)| (*rating, *xp))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
