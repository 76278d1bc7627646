//! # Encounter Module
//!
//! Party modelling, XP budgeting, and the combination search, tied together
//! by [`EncounterGenerator`].
//!
//! One generator run:
//! 1. builds the [`Party`] from the configured levels,
//! 2. prices it with [`XpBudget::calculate`],
//! 3. narrows the catalog with [`CatalogFilter`],
//! 4. enumerates exact-budget encounters with [`CombinationSearch`],
//! 5. drops encounters outside the configured size range.

pub mod budget;
pub mod party;
pub mod search;

pub use budget::*;
pub use party::*;
pub use search::*;

use crate::{
    CandidateSet, CatalogFilter, EncounterConfig, EncounterResult, MonsterRecord, RuleBook,
};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Everything one generator run produced.
#[derive(Debug, Clone)]
pub struct GeneratedEncounters {
    /// The party the run was built for
    pub party: Party,
    /// XP budget for the configured difficulty
    pub budget: XpBudget,
    /// Catalog records that passed the filter
    pub selected: Vec<MonsterRecord>,
    /// Search candidates derived from `selected`
    pub candidates: CandidateSet,
    /// Encounters matching the budget and size range
    pub encounters: EncounterSet,
    /// True if search limits cut the run short
    pub truncated: bool,
}

impl GeneratedEncounters {
    /// Picks up to `count` distinct encounters at random.
    ///
    /// The same seed always picks the same encounters; without a seed the
    /// generator is seeded from system entropy.
    pub fn pick(&self, count: usize, seed: Option<u64>) -> Vec<&Encounter> {
        let pool: Vec<&Encounter> = self.encounters.iter().collect();
        let mut rng = create_rng(seed);
        pool.choose_multiple(&mut rng, count).copied().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.encounters.is_empty()
    }
}

/// Creates a random number generator, seeded when a seed is given.
pub fn create_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Runs configurations against a fixed set of rules and monsters.
#[derive(Debug, Clone, Copy)]
pub struct EncounterGenerator<'a> {
    rules: &'a RuleBook,
}

impl<'a> EncounterGenerator<'a> {
    pub fn new(rules: &'a RuleBook) -> Self {
        Self { rules }
    }

    /// Generates every encounter matching the configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use encountergen::{EncounterConfig, EncounterGenerator, RuleBook};
    ///
    /// let rules = RuleBook::embedded().unwrap();
    /// let mut config = EncounterConfig::new(vec![1, 1, 2, 2]);
    /// config.strict = true;
    /// config.monsters = vec!["Goblin".to_string(), "Wolf".to_string()];
    ///
    /// let generated = EncounterGenerator::new(&rules).generate(&config).unwrap();
    /// assert_eq!(generated.budget.target(), 300);
    /// assert!(!generated.encounters.is_empty());
    /// ```
    pub fn generate(&self, config: &EncounterConfig) -> EncounterResult<GeneratedEncounters> {
        config.validate()?;

        let party = Party::new(config.characters.clone())?;
        let budget = XpBudget::calculate(&party, config.difficulty, self.rules.thresholds())?;
        info!(
            "Party of {} (average level {}) has a {} budget of {} XP",
            party.size(),
            party.average_level(),
            budget.difficulty(),
            budget.target()
        );

        let options = config.filter_options();
        let filter = CatalogFilter::new(&options);
        let selected: Vec<MonsterRecord> = filter
            .select(self.rules.catalog(), &party)
            .into_iter()
            .cloned()
            .collect();
        let candidates = CandidateSet::from_records(&selected);
        debug!(
            "{} of {} catalog monsters are candidates",
            candidates.len(),
            self.rules.catalog().len()
        );

        let outcome = CombinationSearch::new(&candidates)
            .with_limits(config.search_limits())
            .with_size_cap(config.max_size)
            .run(budget.target());

        let min_size = config.min_size.unwrap_or(0);
        let encounters: EncounterSet = outcome
            .encounters
            .into_iter()
            .filter(|encounter| encounter.len() >= min_size)
            .collect();
        info!("Found {} encounters", encounters.len());

        Ok(GeneratedEncounters {
            party,
            budget,
            selected,
            candidates,
            encounters,
            truncated: outcome.truncated,
        })
    }
}
