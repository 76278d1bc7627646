//! # Search Candidates
//!
//! The (name, XP) pairs handed to the combination search.

use crate::MonsterRecord;
use log::debug;
use serde::Serialize;

/// A monster eligible for the current search.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Candidate {
    pub name: String,
    pub xp: u64,
}

impl Candidate {
    pub fn new(name: impl Into<String>, xp: u64) -> Self {
        Self {
            name: name.into(),
            xp,
        }
    }
}

/// Deduplicated candidates, every one worth more than zero XP.
///
/// Zero-XP entries are dropped on construction: they add nothing to a sum and
/// would let the search recurse forever.
///
/// # Examples
///
/// ```
/// use encountergen::{Candidate, CandidateSet};
///
/// let set = CandidateSet::new(vec![
///     Candidate::new("Goblin", 50),
///     Candidate::new("Goblin", 50),
///     Candidate::new("Rat", 0),
/// ]);
/// assert_eq!(set.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CandidateSet {
    candidates: Vec<Candidate>,
}

impl CandidateSet {
    pub fn new(candidates: impl IntoIterator<Item = Candidate>) -> Self {
        let mut kept: Vec<Candidate> = Vec::new();
        for candidate in candidates {
            if candidate.xp == 0 {
                debug!("Skipping zero-XP candidate '{}'", candidate.name);
                continue;
            }
            if !kept.contains(&candidate) {
                kept.push(candidate);
            }
        }
        Self { candidates: kept }
    }

    /// Projects catalog records onto candidates. Records without XP are skipped.
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a MonsterRecord>) -> Self {
        Self::new(records.into_iter().filter_map(|record| {
            record
                .xp
                .map(|xp| Candidate::new(record.name.clone(), u64::from(xp)))
        }))
    }

    /// Gets the XP of the first candidate with this name.
    pub fn xp_of(&self, name: &str) -> Option<u64> {
        self.candidates
            .iter()
            .find(|candidate| candidate.name == name)
            .map(|candidate| candidate.xp)
    }

    pub fn get(&self, index: usize) -> Option<&Candidate> {
        self.candidates.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Candidate> {
        self.candidates.iter()
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}
