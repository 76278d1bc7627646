//! # Configuration
//!
//! Run configuration and generation constants.
//!
//! A configuration comes either from command line flags or from a JSON
//! document with the same fields:
//!
//! ```json
//! {
//!     "strict": true,
//!     "monsters": ["Goblin", "Goblin Boss"],
//!     "characters": [1, 1, 2, 2],
//!     "environments": ["Forest", "Hill"],
//!     "max-size": 5,
//!     "min-size": 4,
//!     "difficulty": "Medium"
//! }
//! ```

use crate::{
    CrCutoffPolicy, Difficulty, EncounterError, EncounterResult, Environment, FilterOptions,
    SearchLimits,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Parties whose lowest level is below this have monster ratings capped at
/// the average party level.
pub const LOW_LEVEL_CUTOFF: u32 = 4;

/// Default recursion bound for the combination search
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Default number of distinct encounters collected before the search stops
pub const DEFAULT_MAX_COMBINATIONS: usize = 100_000;

/// Default number of search nodes visited before the search stops
pub const DEFAULT_MAX_NODES: u64 = 2_000_000;

fn default_max_depth() -> Option<usize> {
    Some(DEFAULT_MAX_DEPTH)
}

fn default_max_combinations() -> Option<usize> {
    Some(DEFAULT_MAX_COMBINATIONS)
}

fn default_max_nodes() -> Option<u64> {
    Some(DEFAULT_MAX_NODES)
}

/// Everything a single generator run needs to know.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct EncounterConfig {
    /// Only use monsters from the allow-lists
    #[serde(default)]
    pub strict: bool,
    /// Monster name allow-list
    #[serde(default)]
    pub monsters: Vec<String>,
    /// Character levels in the party
    pub characters: Vec<u32>,
    /// Environment allow-list
    #[serde(default)]
    pub environments: Vec<Environment>,
    /// Target difficulty
    #[serde(default)]
    pub difficulty: Difficulty,
    /// Fewest monsters in a reported encounter
    #[serde(default)]
    pub min_size: Option<usize>,
    /// Most monsters in a reported encounter
    #[serde(default)]
    pub max_size: Option<usize>,
    /// Comparison for the low-level challenge rating cap
    #[serde(default)]
    pub cr_cutoff: CrCutoffPolicy,
    /// Search recursion bound
    #[serde(default = "default_max_depth")]
    pub max_depth: Option<usize>,
    /// Search result bound
    #[serde(default = "default_max_combinations")]
    pub max_combinations: Option<usize>,
    /// Search work bound
    #[serde(default = "default_max_nodes")]
    pub max_nodes: Option<u64>,
}

impl EncounterConfig {
    /// Creates a configuration for a party with every other field defaulted.
    pub fn new(characters: Vec<u32>) -> Self {
        Self {
            strict: false,
            monsters: Vec::new(),
            characters,
            environments: Vec::new(),
            difficulty: Difficulty::default(),
            min_size: None,
            max_size: None,
            cr_cutoff: CrCutoffPolicy::default(),
            max_depth: default_max_depth(),
            max_combinations: default_max_combinations(),
            max_nodes: default_max_nodes(),
        }
    }

    /// Parses and validates a JSON configuration document.
    ///
    /// # Examples
    ///
    /// ```
    /// use encountergen::{Difficulty, EncounterConfig};
    ///
    /// let config = EncounterConfig::from_json(r#"{"characters": [3, 3], "difficulty": "Hard"}"#).unwrap();
    /// assert_eq!(config.difficulty, Difficulty::Hard);
    /// assert!(EncounterConfig::from_json(r#"{"characters": [3], "difficulty": "Brutal"}"#).is_err());
    /// ```
    pub fn from_json(json: &str) -> EncounterResult<Self> {
        let config: EncounterConfig = serde_json::from_str(json).map_err(|e| {
            EncounterError::Configuration(format!("Malformed configuration document: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> EncounterResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            EncounterError::Configuration(format!(
                "Could not read configuration file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json(&json)
    }

    /// Checks the fields serde cannot.
    pub fn validate(&self) -> EncounterResult<()> {
        if self.characters.is_empty() {
            return Err(EncounterError::Configuration(
                "At least one character level is required".to_string(),
            ));
        }
        if self.characters.contains(&0) {
            return Err(EncounterError::Configuration(
                "Character levels must be positive, got 0".to_string(),
            ));
        }
        if let (Some(min), Some(max)) = (self.min_size, self.max_size) {
            if min > max {
                return Err(EncounterError::Configuration(format!(
                    "min-size {} is larger than max-size {}",
                    min, max
                )));
            }
        }
        Ok(())
    }

    /// Catalog filter settings for this run.
    pub fn filter_options(&self) -> FilterOptions {
        FilterOptions {
            strict: self.strict,
            environments: self.environments.clone(),
            monsters: self.monsters.clone(),
            cutoff_policy: self.cr_cutoff,
        }
    }

    /// Search bounds for this run.
    pub fn search_limits(&self) -> SearchLimits {
        SearchLimits {
            max_depth: self.max_depth,
            max_combinations: self.max_combinations,
            max_nodes: self.max_nodes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_document() {
        let json = r#"{
            "strict": true,
            "monsters": ["Goblin", "Goblin Boss"],
            "characters": [1, 1, 2, 2],
            "environments": ["Forest", "Hill"],
            "max-size": 5,
            "min-size": 4,
            "difficulty": "Medium"
        }"#;
        let config = EncounterConfig::from_json(json).unwrap();
        assert!(config.strict);
        assert_eq!(config.monsters, vec!["Goblin", "Goblin Boss"]);
        assert_eq!(config.characters, vec![1, 1, 2, 2]);
        assert_eq!(config.environments, vec![Environment::Forest, Environment::Hill]);
        assert_eq!(config.min_size, Some(4));
        assert_eq!(config.max_size, Some(5));
        assert_eq!(config.difficulty, Difficulty::Medium);
        assert_eq!(config.cr_cutoff, CrCutoffPolicy::Inclusive);
        assert_eq!(config.search_limits(), SearchLimits::default());
    }

    #[test]
    fn test_minimal_document_defaults() {
        let config = EncounterConfig::from_json(r#"{"characters": [5]}"#).unwrap();
        assert_eq!(config, EncounterConfig::new(vec![5]));
    }

    #[test]
    fn test_policy_and_limits_from_document() {
        let json = r#"{"characters": [2], "cr-cutoff": "exclusive", "max-depth": null, "max-combinations": 10, "max-nodes": 5000}"#;
        let config = EncounterConfig::from_json(json).unwrap();
        assert_eq!(config.cr_cutoff, CrCutoffPolicy::Exclusive);
        assert_eq!(
            config.search_limits(),
            SearchLimits {
                max_depth: None,
                max_combinations: Some(10),
                max_nodes: Some(5000),
            }
        );
    }

    #[test]
    fn test_rejected_documents_are_configuration_errors() {
        let cases = [
            r#"{"characters": [1], "difficulty": "Brutal"}"#,
            r#"{"characters": [1], "environments": ["Moon"]}"#,
            r#"{"difficulty": "Easy"}"#,
            r#"{"characters": []}"#,
            r#"{"characters": [1, 0]}"#,
            r#"{"characters": [1], "min-size": 5, "max-size": 2}"#,
            "not json",
        ];
        for json in cases {
            let result = EncounterConfig::from_json(json);
            assert!(
                matches!(result, Err(EncounterError::Configuration(_))),
                "expected configuration error for {}",
                json
            );
        }
    }

    #[test]
    fn test_filter_options_mirror_config() {
        let mut config = EncounterConfig::new(vec![1]);
        config.strict = true;
        config.environments = vec![Environment::Urban];
        config.cr_cutoff = CrCutoffPolicy::Exclusive;

        let options = config.filter_options();
        assert!(options.strict);
        assert_eq!(options.environments, vec![Environment::Urban]);
        assert_eq!(options.cutoff_policy, CrCutoffPolicy::Exclusive);
    }
}
