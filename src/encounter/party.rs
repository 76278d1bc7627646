//! # Party
//!
//! The adventuring party an encounter is built for.

use crate::{EncounterError, EncounterResult};
use serde::Serialize;

/// A non-empty group of character levels.
///
/// # Examples
///
/// ```
/// use encountergen::Party;
///
/// let party = Party::new(vec![1, 1, 2, 3]).unwrap();
/// assert_eq!(party.average_level(), 1);
/// assert_eq!(party.min_level(), 1);
/// assert!(Party::new(vec![]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Party {
    levels: Vec<u32>,
}

impl Party {
    /// Creates a party, rejecting an empty list or a level of zero.
    pub fn new(levels: Vec<u32>) -> EncounterResult<Self> {
        if levels.is_empty() {
            return Err(EncounterError::Configuration(
                "Party must contain at least one character".to_string(),
            ));
        }
        if levels.contains(&0) {
            return Err(EncounterError::Configuration(
                "Character levels must be positive, got 0".to_string(),
            ));
        }
        Ok(Self { levels })
    }

    pub fn levels(&self) -> &[u32] {
        &self.levels
    }

    pub fn size(&self) -> usize {
        self.levels.len()
    }

    /// Average level, rounded down.
    pub fn average_level(&self) -> u32 {
        let total: u64 = self.levels.iter().map(|&level| u64::from(level)).sum();
        (total / self.levels.len() as u64) as u32
    }

    pub fn min_level(&self) -> u32 {
        self.levels.iter().copied().min().unwrap_or_default()
    }
}
