//! # Encountergen Main Entry Point
//!
//! Parses the command line, loads the rules, generates encounters, and prints
//! the report.

use clap::Parser;
use encountergen::{
    render_run, CrCutoffPolicy, Difficulty, EncounterConfig, EncounterGenerator, EncounterResult,
    Environment, RuleBook, DEFAULT_MAX_COMBINATIONS, DEFAULT_MAX_DEPTH, DEFAULT_MAX_NODES,
};
use log::info;
use std::path::PathBuf;

/// Command line arguments for the encounter generator.
#[derive(Parser, Debug)]
#[command(name = "encountergen")]
#[command(about = "Generates encounters whose monster XP exactly matches a party's budget")]
#[command(version)]
struct Args {
    /// Only use the listed monsters and environments
    #[arg(short, long)]
    strict: bool,

    /// Monsters to use in calculations
    #[arg(short, long, num_args = 1..)]
    monsters: Vec<String>,

    /// Character levels in the encounter
    #[arg(short, long, num_args = 1..)]
    characters: Vec<u32>,

    /// Environments to use in calculations
    #[arg(short, long, num_args = 1..)]
    environments: Vec<Environment>,

    /// Difficulty level of the encounter
    #[arg(short, long, default_value = "Medium")]
    difficulty: Difficulty,

    /// Min number of enemies to return
    #[arg(long)]
    min_size: Option<usize>,

    /// Max number of enemies to return
    #[arg(long)]
    max_size: Option<usize>,

    /// Read the configuration from a JSON file; overrides all other run options
    #[arg(short, long)]
    json: Option<PathBuf>,

    /// Directory holding threshold_table.json, cr_to_xp.json and monster_manual.json
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Cap low-level parties strictly below their average level
    #[arg(long)]
    exclusive_cr_cutoff: bool,

    /// Deepest search recursion before the search gives up on a branch
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Distinct encounters to collect before the search stops
    #[arg(long, default_value_t = DEFAULT_MAX_COMBINATIONS)]
    max_combinations: usize,

    /// Search nodes to visit before the search stops
    #[arg(long, default_value_t = DEFAULT_MAX_NODES)]
    max_nodes: u64,

    /// Fail if any catalog monster has no XP value
    #[arg(long)]
    require_xp: bool,

    /// Only print this many randomly chosen encounters
    #[arg(long)]
    pick: Option<usize>,

    /// Random seed for --pick
    #[arg(long)]
    seed: Option<u64>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

impl Args {
    /// Builds the run configuration, preferring a JSON file when given.
    fn config(&self) -> EncounterResult<EncounterConfig> {
        if let Some(path) = &self.json {
            info!("Reading configuration from {}", path.display());
            return EncounterConfig::load(path);
        }

        let config = EncounterConfig {
            strict: self.strict,
            monsters: self.monsters.clone(),
            characters: self.characters.clone(),
            environments: self.environments.clone(),
            difficulty: self.difficulty,
            min_size: self.min_size,
            max_size: self.max_size,
            cr_cutoff: if self.exclusive_cr_cutoff {
                CrCutoffPolicy::Exclusive
            } else {
                CrCutoffPolicy::Inclusive
            },
            max_depth: Some(self.max_depth),
            max_combinations: Some(self.max_combinations),
            max_nodes: Some(self.max_nodes),
        };
        config.validate()?;
        Ok(config)
    }
}

fn main() -> EncounterResult<()> {
    let args = Args::parse();

    initialize_logging(&args.log_level);

    run(&args)
}

/// Initializes the logging system based on the specified log level.
fn initialize_logging(log_level: &str) {
    env_logger::Builder::new()
        .parse_filters(log_level)
        .format_target(false)
        .init();
}

fn run(args: &Args) -> EncounterResult<()> {
    info!("Starting encountergen v{}", encountergen::VERSION);

    let config = args.config()?;

    let rules = match &args.data_dir {
        Some(dir) => RuleBook::from_dir(dir)?,
        None => RuleBook::embedded()?,
    };
    if args.require_xp {
        rules.catalog().require_complete()?;
    }

    let generated = EncounterGenerator::new(&rules).generate(&config)?;

    let report = match args.pick {
        Some(count) => {
            let picked = generated.pick(count, args.seed);
            render_run(&config, &generated, Some(picked.as_slice()))
        }
        None => render_run(&config, &generated, None),
    };
    print!("{}", report);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use encountergen::EncounterError;

    #[test]
    fn test_run_succeeds_for_small_party() {
        let args = Args::parse_from(["encountergen", "-c", "1", "1", "-s", "-m", "Goblin"]);
        assert!(run(&args).is_ok());
    }

    #[test]
    fn test_run_returns_configuration_errors() {
        let args = Args::parse_from([
            "encountergen", "-c", "3", "--min-size", "5", "--max-size", "2",
        ]);
        let err = run(&args).unwrap_err();
        assert!(matches!(err, EncounterError::Configuration(_)));
    }

    #[test]
    fn test_node_limit_flag_reaches_config() {
        let args = Args::parse_from(["encountergen", "-c", "4", "--max-nodes", "1000"]);
        let config = args.config().unwrap();
        assert_eq!(config.max_nodes, Some(1000));
        assert_eq!(config.search_limits().max_nodes, Some(1000));
    }
}
