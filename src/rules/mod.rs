//! # Rules Module
//!
//! Closed rule vocabularies and the read-only lookup tables that price a
//! party and a monster in experience points.
//!
//! Difficulty and environment labels are parsed once, at the configuration
//! or data boundary. Everything past that boundary works with the enums.

pub mod challenge;
pub mod tables;

pub use challenge::*;
pub use tables::*;

use crate::EncounterError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Encounter difficulty, ordered by severity.
///
/// # Examples
///
/// ```
/// use encountergen::Difficulty;
///
/// let difficulty: Difficulty = "hard".parse().unwrap();
/// assert_eq!(difficulty, Difficulty::Hard);
/// assert!(Difficulty::Easy < Difficulty::Deadly);
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    Deadly,
}

impl Difficulty {
    /// Returns all difficulties from least to most severe.
    pub fn all() -> &'static [Difficulty] {
        &[
            Difficulty::Easy,
            Difficulty::Medium,
            Difficulty::Hard,
            Difficulty::Deadly,
        ]
    }

    /// Gets the label used in configuration documents and rule tables.
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Deadly => "Deadly",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Difficulty {
    type Err = EncounterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Difficulty::all()
            .iter()
            .copied()
            .find(|difficulty| difficulty.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                EncounterError::Configuration(format!(
                    "Value for difficulty not expected: '{}' (expected Easy, Medium, Hard or Deadly)",
                    s
                ))
            })
    }
}

impl TryFrom<String> for Difficulty {
    type Error = EncounterError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Difficulty> for String {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.label().to_string()
    }
}

/// Terrain a monster can be found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Environment {
    Arctic,
    Coastal,
    Desert,
    Forest,
    Grassland,
    Hill,
    Mountain,
    Swamp,
    Underdark,
    Underwater,
    Urban,
    OtherPlane,
}

impl Environment {
    /// Returns every known environment.
    pub fn all() -> &'static [Environment] {
        &[
            Environment::Arctic,
            Environment::Coastal,
            Environment::Desert,
            Environment::Forest,
            Environment::Grassland,
            Environment::Hill,
            Environment::Mountain,
            Environment::Swamp,
            Environment::Underdark,
            Environment::Underwater,
            Environment::Urban,
            Environment::OtherPlane,
        ]
    }

    /// Gets the display label for this environment.
    pub fn label(self) -> &'static str {
        match self {
            Environment::Arctic => "Arctic",
            Environment::Coastal => "Coastal",
            Environment::Desert => "Desert",
            Environment::Forest => "Forest",
            Environment::Grassland => "Grassland",
            Environment::Hill => "Hill",
            Environment::Mountain => "Mountain",
            Environment::Swamp => "Swamp",
            Environment::Underdark => "Underdark",
            Environment::Underwater => "Underwater",
            Environment::Urban => "Urban",
            Environment::OtherPlane => "Other Plane",
        }
    }
}

/// Lowercases and strips separators so "Other Plane", "other-plane" and
/// "other_plane" all compare equal.
fn normalize_label(label: &str) -> String {
    label
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Environment {
    type Err = EncounterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_label(s);
        Environment::all()
            .iter()
            .copied()
            .find(|environment| normalize_label(environment.label()) == wanted)
            .ok_or_else(|| EncounterError::Configuration(format!("Unknown environment: '{}'", s)))
    }
}

impl TryFrom<String> for Environment {
    type Error = EncounterError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Environment> for String {
    fn from(environment: Environment) -> Self {
        environment.label().to_string()
    }
}
