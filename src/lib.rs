//! # Encountergen
//!
//! Random encounter generation for fifth-edition style tabletop games.
//!
//! ## Architecture Overview
//!
//! A run turns a party and a target difficulty into an XP budget, narrows the
//! monster catalog down to a candidate set, and enumerates every multiset of
//! candidates whose XP adds up to the budget exactly.
//!
//! - **Rules**: difficulty and environment enums, challenge ratings, and the
//!   threshold and CR-to-XP tables
//! - **Catalog**: monster records and the filter producing search candidates
//! - **Encounter**: party, XP budget calculation, and the combination search
//! - **Data**: embedded default tables or JSON files from a data directory
//! - **Report**: plain-text rendering of a run
//!
//! ```
//! use encountergen::{Candidate, CandidateSet, CombinationSearch};
//!
//! let candidates = CandidateSet::new(vec![
//!     Candidate::new("Goblin", 50),
//!     Candidate::new("Wolf", 50),
//! ]);
//! let outcome = CombinationSearch::new(&candidates).run(100);
//! assert_eq!(outcome.encounters.len(), 3);
//! ```

pub mod catalog;
pub mod config;
pub mod data;
pub mod encounter;
pub mod report;
pub mod rules;

pub use catalog::*;
pub use config::*;
pub use data::*;
pub use encounter::*;
pub use report::*;
pub use rules::*;

/// Core error type for encounter generation.
#[derive(thiserror::Error, Debug)]
pub enum EncounterError {
    /// Run configuration is invalid or incomplete
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A level or challenge rating has no entry in its rule table
    #[error("Lookup error: {0}")]
    Lookup(String),

    /// Loaded data violates an invariant of the rule tables or catalog
    #[error("Data integrity error: {0}")]
    DataIntegrity(String),

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Result type used throughout the encountergen codebase.
pub type EncounterResult<T> = Result<T, EncounterError>;

/// Version information for the crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
