//! # XP Budget
//!
//! Prices a party against the threshold table.

use crate::{Difficulty, EncounterResult, Party, ThresholdTable};
use serde::Serialize;
use std::collections::BTreeMap;

/// The XP an encounter must add up to, plus the totals for every difficulty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct XpBudget {
    difficulty: Difficulty,
    totals: BTreeMap<Difficulty, u64>,
    average_level: u32,
}

impl XpBudget {
    /// Sums each member's threshold for every difficulty.
    ///
    /// Fails with a lookup error if any member's level is missing from the
    /// table.
    ///
    /// # Examples
    ///
    /// ```
    /// use encountergen::{Difficulty, DifficultyThresholds, Party, ThresholdTable, XpBudget};
    ///
    /// let table = ThresholdTable::new([
    ///     (1, DifficultyThresholds::new(25, 50, 75, 100)),
    ///     (2, DifficultyThresholds::new(50, 100, 150, 200)),
    /// ])
    /// .unwrap();
    /// let party = Party::new(vec![1, 1, 2, 2]).unwrap();
    /// let budget = XpBudget::calculate(&party, Difficulty::Medium, &table).unwrap();
    /// assert_eq!(budget.target(), 300);
    /// ```
    pub fn calculate(
        party: &Party,
        difficulty: Difficulty,
        table: &ThresholdTable,
    ) -> EncounterResult<Self> {
        let mut totals: BTreeMap<Difficulty, u64> =
            Difficulty::all().iter().map(|d| (*d, 0)).collect();

        for &level in party.levels() {
            let row = table.row(level)?;
            for (difficulty, total) in totals.iter_mut() {
                *total += u64::from(row.get(*difficulty));
            }
        }

        Ok(Self {
            difficulty,
            totals,
            average_level: party.average_level(),
        })
    }

    /// XP the encounter must match exactly.
    pub fn target(&self) -> u64 {
        self.total_for(self.difficulty)
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Party total for any difficulty.
    pub fn total_for(&self, difficulty: Difficulty) -> u64 {
        self.totals.get(&difficulty).copied().unwrap_or_default()
    }

    /// Totals for all difficulties, easiest first.
    pub fn totals(&self) -> impl Iterator<Item = (Difficulty, u64)> + '_ {
        self.totals.iter().map(|(d, xp)| (*d, *xp))
    }

    pub fn average_level(&self) -> u32 {
        self.average_level
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DifficultyThresholds, EncounterError};

    fn table() -> ThresholdTable {
        ThresholdTable::new([
            (1, DifficultyThresholds::new(25, 50, 75, 100)),
            (2, DifficultyThresholds::new(50, 100, 150, 200)),
            (3, DifficultyThresholds::new(75, 150, 225, 400)),
        ])
        .unwrap()
    }

    #[test]
    fn test_budget_for_mixed_party() {
        let party = Party::new(vec![1, 1, 2, 2]).unwrap();
        let budget = XpBudget::calculate(&party, Difficulty::Medium, &table()).unwrap();

        assert_eq!(budget.target(), 300);
        assert_eq!(budget.difficulty(), Difficulty::Medium);
        assert_eq!(budget.average_level(), 1);

        let totals: Vec<(Difficulty, u64)> = budget.totals().collect();
        assert_eq!(
            totals,
            vec![
                (Difficulty::Easy, 150),
                (Difficulty::Medium, 300),
                (Difficulty::Hard, 450),
                (Difficulty::Deadly, 600),
            ]
        );
    }

    #[test]
    fn test_budget_follows_difficulty() {
        let party = Party::new(vec![3]).unwrap();
        let deadly = XpBudget::calculate(&party, Difficulty::Deadly, &table()).unwrap();
        assert_eq!(deadly.target(), 400);
        assert_eq!(deadly.total_for(Difficulty::Easy), 75);
    }

    #[test]
    fn test_unknown_level_fails() {
        let party = Party::new(vec![1, 25]).unwrap();
        let err = XpBudget::calculate(&party, Difficulty::Easy, &table()).unwrap_err();
        assert!(matches!(err, EncounterError::Lookup(_)));
        assert!(err.to_string().contains("25"));
    }
}
