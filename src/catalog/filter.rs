//! # Catalog Filter
//!
//! Narrows the monster catalog to the records a party may face, and from
//! there to the search candidates.

use crate::{
    CandidateSet, ChallengeRating, Environment, MonsterCatalog, MonsterRecord, Party,
    LOW_LEVEL_CUTOFF,
};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// How the challenge rating cap for low-level parties compares against the
/// average party level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrCutoffPolicy {
    /// Ratings equal to the average level are allowed
    #[default]
    Inclusive,
    /// Ratings must stay below the average level
    Exclusive,
}

impl CrCutoffPolicy {
    /// Returns true if a monster of this rating is allowed at this level.
    pub fn admits(self, rating: ChallengeRating, average_level: u32) -> bool {
        match (self, rating.cmp_level(average_level)) {
            (_, Ordering::Less) => true,
            (CrCutoffPolicy::Inclusive, Ordering::Equal) => true,
            _ => false,
        }
    }
}

/// Options controlling which catalog records become candidates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    /// Restrict to the allow-lists below
    pub strict: bool,
    /// Environment allow-list, applied in strict mode
    pub environments: Vec<Environment>,
    /// Monster name allow-list, applied in strict mode
    pub monsters: Vec<String>,
    /// Comparison used by the low-level rating cap
    pub cutoff_policy: CrCutoffPolicy,
}

/// Applies [`FilterOptions`] to a catalog for a given party.
///
/// # Examples
///
/// ```
/// use encountergen::{CatalogFilter, ChallengeRating, CrXpTable, FilterOptions, MonsterCatalog, MonsterRecord, Party};
///
/// let table = CrXpTable::new([(ChallengeRating::whole(1), 200), (ChallengeRating::whole(5), 1800)]).unwrap();
/// let catalog = MonsterCatalog::new(vec![
///     MonsterRecord::new("Bugbear", ChallengeRating::whole(1), [], &table),
///     MonsterRecord::new("Troll", ChallengeRating::whole(5), [], &table),
/// ]);
/// let party = Party::new(vec![1, 2]).unwrap();
///
/// let options = FilterOptions::default();
/// let candidates = CatalogFilter::new(&options).candidates(&catalog, &party);
/// assert_eq!(candidates.len(), 1);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CatalogFilter<'a> {
    options: &'a FilterOptions,
}

impl<'a> CatalogFilter<'a> {
    pub fn new(options: &'a FilterOptions) -> Self {
        Self { options }
    }

    /// Selects the catalog records that pass every filter step.
    pub fn select<'c>(&self, catalog: &'c MonsterCatalog, party: &Party) -> Vec<&'c MonsterRecord> {
        let mut selected: Vec<&MonsterRecord> = catalog.iter().collect();

        if party.min_level() < LOW_LEVEL_CUTOFF {
            let average_level = party.average_level();
            let policy = self.options.cutoff_policy;
            selected.retain(|m| policy.admits(m.challenge_rating, average_level));
            debug!(
                "Low-level party: capped challenge rating at {} ({:?}), {} monsters remain",
                average_level,
                policy,
                selected.len()
            );
        }

        selected.retain(|m| m.challenge_rating.is_positive());

        if self.options.strict {
            if !self.options.environments.is_empty() {
                selected.retain(|m| m.is_found_in(&self.options.environments));
                debug!("Environment filter left {} monsters", selected.len());
            }

            if !self.options.monsters.is_empty() {
                for name in &self.options.monsters {
                    if !catalog.contains_name(name) {
                        warn!("Requested monster '{}' is not in the catalog", name);
                    }
                }
                selected.retain(|m| self.options.monsters.contains(&m.name));
                debug!("Name filter left {} monsters", selected.len());
            }
        }

        selected.retain(|m| {
            if m.xp.is_none() {
                debug!("Skipping '{}': no XP value for rating {}", m.name, m.challenge_rating);
            }
            m.xp.is_some()
        });

        selected
    }

    /// Selects records and projects them onto search candidates.
    pub fn candidates(&self, catalog: &MonsterCatalog, party: &Party) -> CandidateSet {
        CandidateSet::from_records(self.select(catalog, party))
    }
}
