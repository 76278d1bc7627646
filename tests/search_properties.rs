//! Property tests for the combination search.

use encountergen::{Candidate, CandidateSet, CombinationSearch, Encounter, EncounterSet, SearchLimits};
use proptest::prelude::*;
use std::collections::BTreeSet;

fn candidate_set(values: &[u64]) -> CandidateSet {
    CandidateSet::new(
        values
            .iter()
            .enumerate()
            .map(|(i, xp)| Candidate::new(format!("M{}", i), *xp)),
    )
}

/// Independent enumeration: choose a count for each candidate in turn.
fn brute_force(values: &[u64], budget: u64) -> EncounterSet {
    fn walk(values: &[u64], index: usize, remaining: u64, counts: &mut Vec<usize>, out: &mut EncounterSet) {
        if index == values.len() {
            if remaining == 0 {
                let names = counts
                    .iter()
                    .enumerate()
                    .flat_map(|(i, count)| std::iter::repeat(format!("M{}", i)).take(*count));
                out.insert(Encounter::from_names(names));
            }
            return;
        }
        let max = remaining / values[index];
        for count in 0..=max {
            counts.push(count as usize);
            walk(values, index + 1, remaining - count * values[index], counts, out);
            counts.pop();
        }
    }

    let mut out = BTreeSet::new();
    walk(values, 0, budget, &mut Vec::new(), &mut out);
    out
}

fn small_values() -> impl Strategy<Value = Vec<u64>> {
    prop::collection::vec(10u64..=60, 0..=4)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_every_encounter_matches_budget(values in small_values(), budget in 0u64..=150) {
        let candidates = candidate_set(&values);
        let outcome = CombinationSearch::new(&candidates).run(budget);
        for encounter in &outcome.encounters {
            let total: u64 = encounter
                .monsters()
                .iter()
                .map(|name| candidates.xp_of(name).unwrap())
                .sum();
            prop_assert_eq!(total, budget);
        }
    }

    #[test]
    fn prop_matches_independent_enumeration(values in small_values(), budget in 0u64..=150) {
        let candidates = candidate_set(&values);
        let outcome = CombinationSearch::new(&candidates)
            .with_limits(SearchLimits::unbounded())
            .run(budget);
        prop_assert!(!outcome.truncated);
        prop_assert_eq!(outcome.encounters, brute_force(&values, budget));
    }

    #[test]
    fn prop_search_is_idempotent(values in small_values(), budget in 0u64..=150) {
        let candidates = candidate_set(&values);
        let search = CombinationSearch::new(&candidates);
        prop_assert_eq!(search.run(budget), search.run(budget));
    }

    #[test]
    fn prop_candidate_order_does_not_matter(values in small_values(), budget in 0u64..=150) {
        let forward = candidate_set(&values);
        let reversed = CandidateSet::new(forward.iter().rev().cloned());
        prop_assert_eq!(
            CombinationSearch::new(&forward).run(budget).encounters,
            CombinationSearch::new(&reversed).run(budget).encounters
        );
    }
}

#[test]
fn test_zero_budget_is_empty_encounter() {
    let outcome = CombinationSearch::new(&candidate_set(&[10, 20])).run(0);
    let only: Vec<&Encounter> = outcome.encounters.iter().collect();
    assert_eq!(only.len(), 1);
    assert!(only[0].is_empty());
}
