//! # Combination Search
//!
//! Exhaustive depth-first enumeration of every multiset of candidates whose
//! XP adds up to a budget exactly. Each candidate may appear any number of
//! times.
//!
//! The search walks candidates in non-decreasing index order, so a given
//! multiset of candidates is reached once instead of once per permutation.
//! Results are still keyed by their sorted monster names: two candidates that
//! share a name collapse into one encounter.
//!
//! Cost grows exponentially with the number of candidates and with the ratio
//! of the budget to the cheapest candidate. Catalog-sized inputs (tens of
//! candidates, budgets in the low thousands) finish quickly; [`SearchLimits`]
//! bounds the pathological cases.

use crate::{CandidateSet, DEFAULT_MAX_COMBINATIONS, DEFAULT_MAX_DEPTH, DEFAULT_MAX_NODES};
use log::{debug, warn};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// A multiset of monster names, kept sorted.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Encounter {
    monsters: Vec<String>,
}

impl Encounter {
    /// Builds an encounter from names in any order.
    ///
    /// # Examples
    ///
    /// ```
    /// use encountergen::Encounter;
    ///
    /// let a = Encounter::from_names(["Wolf", "Goblin"]);
    /// let b = Encounter::from_names(["Goblin", "Wolf"]);
    /// assert_eq!(a, b);
    /// assert_eq!(a.to_string(), "1 x Goblin, 1 x Wolf");
    /// ```
    pub fn from_names<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Self {
        let mut monsters: Vec<String> = names.into_iter().map(Into::into).collect();
        monsters.sort();
        Self { monsters }
    }

    /// Names in sorted order, repeated once per monster.
    pub fn monsters(&self) -> &[String] {
        &self.monsters
    }

    /// Number of monsters in the encounter.
    pub fn len(&self) -> usize {
        self.monsters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.monsters.is_empty()
    }

    /// Distinct names with their counts, in name order.
    pub fn groups(&self) -> Vec<(&str, usize)> {
        let mut groups: Vec<(&str, usize)> = Vec::new();
        for name in &self.monsters {
            if let Some((last, count)) = groups.last_mut() {
                if *last == name.as_str() {
                    *count += 1;
                    continue;
                }
            }
            groups.push((name.as_str(), 1));
        }
        groups
    }
}

impl fmt::Display for Encounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.monsters.is_empty() {
            return f.write_str("(no monsters)");
        }
        let parts: Vec<String> = self
            .groups()
            .into_iter()
            .map(|(name, count)| format!("{} x {}", count, name))
            .collect();
        f.write_str(&parts.join(", "))
    }
}

/// Distinct encounters, ordered by their sorted names.
pub type EncounterSet = BTreeSet<Encounter>;

/// Bounds that stop a runaway search.
///
/// Hitting a bound never fails the search; it marks the outcome as truncated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SearchLimits {
    /// Deepest recursion (monsters per encounter) explored
    pub max_depth: Option<usize>,
    /// Most distinct encounters collected before stopping
    pub max_combinations: Option<usize>,
    /// Most search nodes visited before stopping
    pub max_nodes: Option<u64>,
}

impl SearchLimits {
    /// No bounds at all. Only use on inputs known to be small.
    pub fn unbounded() -> Self {
        Self {
            max_depth: None,
            max_combinations: None,
            max_nodes: None,
        }
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_depth: Some(DEFAULT_MAX_DEPTH),
            max_combinations: Some(DEFAULT_MAX_COMBINATIONS),
            max_nodes: Some(DEFAULT_MAX_NODES),
        }
    }
}

/// Result of one search run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Every distinct encounter found
    pub encounters: EncounterSet,
    /// True if a [`SearchLimits`] bound cut the search short
    pub truncated: bool,
    /// Number of search nodes visited
    pub nodes_visited: u64,
}

/// Mutable state for one run. Owned by [`CombinationSearch::run`], never
/// shared between runs.
struct SearchState {
    path: Vec<usize>,
    encounters: EncounterSet,
    truncated: bool,
    stopped: bool,
    nodes_visited: u64,
}

/// Enumerates exact-budget encounters over a candidate set.
///
/// # Examples
///
/// ```
/// use encountergen::{Candidate, CandidateSet, CombinationSearch, Encounter};
///
/// let candidates = CandidateSet::new(vec![Candidate::new("Goblin", 50), Candidate::new("Wolf", 50)]);
/// let outcome = CombinationSearch::new(&candidates).run(100);
///
/// assert!(outcome.encounters.contains(&Encounter::from_names(["Goblin", "Wolf"])));
/// assert!(outcome.encounters.contains(&Encounter::from_names(["Wolf", "Wolf"])));
/// assert_eq!(outcome.encounters.len(), 3);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CombinationSearch<'a> {
    candidates: &'a CandidateSet,
    limits: SearchLimits,
    size_cap: Option<usize>,
}

impl<'a> CombinationSearch<'a> {
    /// Creates a search with the default limits.
    pub fn new(candidates: &'a CandidateSet) -> Self {
        Self {
            candidates,
            limits: SearchLimits::default(),
            size_cap: None,
        }
    }

    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Only explores encounters of at most `size_cap` monsters. Unlike
    /// `max_depth` this is a requested filter and never marks the outcome
    /// as truncated.
    pub fn with_size_cap(mut self, size_cap: Option<usize>) -> Self {
        self.size_cap = size_cap;
        self
    }

    /// Runs the search for an exact budget.
    ///
    /// A budget of zero yields exactly one encounter: the empty one.
    pub fn run(&self, budget: u64) -> SearchOutcome {
        let mut state = SearchState {
            path: Vec::new(),
            encounters: EncounterSet::new(),
            truncated: false,
            stopped: false,
            nodes_visited: 0,
        };

        self.explore(&mut state, 0, budget);

        debug!(
            "Search for {} XP over {} candidates visited {} nodes, found {} encounters",
            budget,
            self.candidates.len(),
            state.nodes_visited,
            state.encounters.len()
        );
        if state.truncated {
            warn!(
                "Search for {} XP was cut short by its limits ({:?}); results are incomplete",
                budget, self.limits
            );
        }

        SearchOutcome {
            encounters: state.encounters,
            truncated: state.truncated,
            nodes_visited: state.nodes_visited,
        }
    }

    fn explore(&self, state: &mut SearchState, start: usize, remaining: u64) {
        if state.stopped {
            return;
        }
        if self
            .limits
            .max_nodes
            .is_some_and(|max| state.nodes_visited >= max)
        {
            state.truncated = true;
            state.stopped = true;
            return;
        }
        state.nodes_visited += 1;

        if remaining == 0 {
            self.record(state);
            return;
        }

        let depth = state.path.len();
        if self.size_cap.is_some_and(|cap| depth >= cap) {
            return;
        }
        if self.limits.max_depth.is_some_and(|max| depth >= max) {
            if self.fits_any(start, remaining) {
                state.truncated = true;
            }
            return;
        }

        for index in start..self.candidates.len() {
            let Some(candidate) = self.candidates.get(index) else {
                break;
            };
            if candidate.xp > remaining {
                continue;
            }
            state.path.push(index);
            self.explore(state, index, remaining - candidate.xp);
            state.path.pop();
            if state.stopped {
                return;
            }
        }
    }

    fn record(&self, state: &mut SearchState) {
        let encounter = Encounter::from_names(
            state
                .path
                .iter()
                .filter_map(|&index| self.candidates.get(index))
                .map(|candidate| candidate.name.clone()),
        );

        if state.encounters.contains(&encounter) {
            return;
        }
        if self
            .limits
            .max_combinations
            .is_some_and(|max| state.encounters.len() >= max)
        {
            state.truncated = true;
            state.stopped = true;
            return;
        }
        state.encounters.insert(encounter);
    }

    fn fits_any(&self, start: usize, remaining: u64) -> bool {
        self.candidates
            .iter()
            .skip(start)
            .any(|candidate| candidate.xp <= remaining)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Candidate;

    fn set(entries: &[(&str, u64)]) -> CandidateSet {
        CandidateSet::new(entries.iter().map(|(name, xp)| Candidate::new(*name, *xp)))
    }

    fn encounters(outcome: &SearchOutcome) -> Vec<Vec<&str>> {
        outcome
            .encounters
            .iter()
            .map(|e| e.monsters().iter().map(String::as_str).collect())
            .collect()
    }

    #[test]
    fn test_goblins_and_wolves() {
        let candidates = set(&[("Goblin", 50), ("Wolf", 50)]);
        let outcome = CombinationSearch::new(&candidates).run(100);
        assert_eq!(
            encounters(&outcome),
            vec![vec!["Goblin", "Goblin"], vec!["Goblin", "Wolf"], vec!["Wolf", "Wolf"]]
        );
        assert!(!outcome.truncated);
    }

    #[test]
    fn test_unreachable_budget() {
        let candidates = set(&[("Goblin", 50)]);
        let outcome = CombinationSearch::new(&candidates).run(75);
        assert!(outcome.encounters.is_empty());
        assert!(!outcome.truncated);
    }

    #[test]
    fn test_zero_budget_yields_empty_encounter() {
        let candidates = set(&[("Goblin", 50)]);
        let outcome = CombinationSearch::new(&candidates).run(0);
        assert_eq!(outcome.encounters.len(), 1);
        assert!(outcome.encounters.iter().next().unwrap().is_empty());

        let outcome = CombinationSearch::new(&CandidateSet::default()).run(0);
        assert_eq!(outcome.encounters.len(), 1);
    }

    #[test]
    fn test_no_candidates() {
        let outcome = CombinationSearch::new(&CandidateSet::default()).run(100);
        assert!(outcome.encounters.is_empty());
    }

    #[test]
    fn test_hand_enumerated_mixed_values() {
        // 25: Kobold, 50: Goblin, 100: Orc; budget 100
        let candidates = set(&[("Orc", 100), ("Kobold", 25), ("Goblin", 50)]);
        let outcome = CombinationSearch::new(&candidates).run(100);
        assert_eq!(
            encounters(&outcome),
            vec![
                vec!["Goblin", "Goblin"],
                vec!["Goblin", "Kobold", "Kobold"],
                vec!["Kobold", "Kobold", "Kobold", "Kobold"],
                vec!["Orc"],
            ]
        );
    }

    #[test]
    fn test_shared_names_collapse() {
        let candidates = set(&[("Guard", 25), ("Guard", 50)]);
        let outcome = CombinationSearch::new(&candidates).run(50);
        // Guard(50) and Guard(25) + Guard(25) are both ["Guard", ...] of
        // different lengths, so both survive.
        assert_eq!(encounters(&outcome), vec![vec!["Guard"], vec!["Guard", "Guard"]]);

        let candidates = set(&[("Guard", 25), ("Guard", 25), ("Guard", 30)]);
        assert_eq!(candidates.len(), 2);
    }

    #[test]
    fn test_size_cap_is_not_truncation() {
        let candidates = set(&[("Kobold", 25), ("Orc", 100)]);
        let outcome = CombinationSearch::new(&candidates)
            .with_size_cap(Some(2))
            .run(100);
        assert_eq!(encounters(&outcome), vec![vec!["Orc"]]);
        assert!(!outcome.truncated);
    }

    #[test]
    fn test_depth_limit_truncates() {
        let candidates = set(&[("Kobold", 25), ("Orc", 100)]);
        let limits = SearchLimits {
            max_depth: Some(2),
            max_combinations: None,
            max_nodes: None,
        };
        let outcome = CombinationSearch::new(&candidates).with_limits(limits).run(100);
        assert_eq!(encounters(&outcome), vec![vec!["Orc"]]);
        assert!(outcome.truncated);
    }

    #[test]
    fn test_combination_limit_truncates() {
        let candidates = set(&[("A", 10), ("B", 10), ("C", 10)]);
        let limits = SearchLimits {
            max_depth: None,
            max_combinations: Some(2),
            max_nodes: None,
        };
        let outcome = CombinationSearch::new(&candidates).with_limits(limits).run(20);
        assert_eq!(outcome.encounters.len(), 2);
        assert!(outcome.truncated);

        let exact = SearchLimits {
            max_depth: None,
            max_combinations: Some(6),
            max_nodes: None,
        };
        let outcome = CombinationSearch::new(&candidates).with_limits(exact).run(20);
        assert_eq!(outcome.encounters.len(), 6);
        assert!(!outcome.truncated);
    }

    #[test]
    fn test_node_limit_truncates() {
        let candidates = set(&[("Rat", 10), ("Kobold", 25), ("Goblin", 50), ("Orc", 100)]);
        let full = CombinationSearch::new(&candidates)
            .with_limits(SearchLimits::unbounded())
            .run(500);
        assert!(!full.truncated);
        assert!(full.nodes_visited > 50);

        let limits = SearchLimits {
            max_depth: None,
            max_combinations: None,
            max_nodes: Some(50),
        };
        let outcome = CombinationSearch::new(&candidates).with_limits(limits).run(500);
        assert!(outcome.truncated);
        assert_eq!(outcome.nodes_visited, 50);
        assert!(outcome.encounters.len() < full.encounters.len());
        assert!(outcome.encounters.is_subset(&full.encounters));

        let roomy = SearchLimits {
            max_nodes: Some(full.nodes_visited),
            ..limits
        };
        let outcome = CombinationSearch::new(&candidates).with_limits(roomy).run(500);
        assert!(!outcome.truncated);
        assert_eq!(outcome.encounters, full.encounters);
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let candidates = set(&[("Goblin", 50), ("Wolf", 50), ("Bugbear", 200)]);
        let search = CombinationSearch::new(&candidates);
        assert_eq!(search.run(300).encounters, search.run(300).encounters);
    }

    #[test]
    fn test_encounter_groups() {
        let encounter = Encounter::from_names(["Wolf", "Goblin", "Wolf"]);
        assert_eq!(encounter.groups(), vec![("Goblin", 1), ("Wolf", 2)]);
        assert_eq!(encounter.to_string(), "1 x Goblin, 2 x Wolf");
        assert_eq!(Encounter::from_names(Vec::<String>::new()).to_string(), "(no monsters)");
    }
}
