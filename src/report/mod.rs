//! # Report Module
//!
//! Plain-text rendering of a generator run: the settings used, the party's XP
//! totals, the candidate monsters, and the encounters found.

use crate::{Encounter, EncounterConfig, GeneratedEncounters, MonsterRecord, XpBudget};

/// Separator printed between report sections.
pub const SECTION_BREAK: &str =
    "============================================================================";

fn join<T: ToString>(items: &[T]) -> String {
    if items.is_empty() {
        return "-".to_string();
    }
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn optional<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

fn row(key: &str, value: &str) -> String {
    format!("{: <17}:{: >40}\n", key, value)
}

/// Echoes the run configuration.
pub fn render_settings(config: &EncounterConfig) -> String {
    let mut out = String::from("Settings\n");
    out.push_str(&row("strict", &config.strict.to_string()));
    out.push_str(&row("monsters", &join(&config.monsters)));
    out.push_str(&row("characters", &join(&config.characters)));
    out.push_str(&row("environments", &join(&config.environments)));
    out.push_str(&row("difficulty", config.difficulty.label()));
    out.push_str(&row("min-size", &optional(config.min_size)));
    out.push_str(&row("max-size", &optional(config.max_size)));
    out.push_str(&row("cr-cutoff", &format!("{:?}", config.cr_cutoff).to_lowercase()));
    out.push_str(&row("max-depth", &optional(config.max_depth)));
    out.push_str(&row("max-combinations", &optional(config.max_combinations)));
    out.push_str(&row("max-nodes", &optional(config.max_nodes)));
    out
}

/// Lists the party's total for each difficulty, marking the target.
pub fn render_budget(budget: &XpBudget) -> String {
    let mut out = String::from("XP Calculations\n");
    for (difficulty, total) in budget.totals() {
        let marker = if difficulty == budget.difficulty() { " *" } else { "" };
        out.push_str(&row(
            &format!("{}{}", difficulty, marker),
            &total.to_string(),
        ));
    }
    out.push_str(&row("average level", &budget.average_level().to_string()));
    out
}

/// Lists the monsters that passed the catalog filter.
pub fn render_candidates(records: &[MonsterRecord]) -> String {
    let mut out = format!("Candidate Monsters ({})\n", records.len());
    if records.is_empty() {
        out.push_str("  none\n");
        return out;
    }
    let width = records.iter().map(|m| m.name.len()).max().unwrap_or(0);
    for monster in records {
        out.push_str(&format!(
            "  {: <width$}  CR {: >4}  {: >7} XP\n",
            monster.name,
            monster.challenge_rating.to_string(),
            optional(monster.xp),
            width = width
        ));
    }
    out
}

/// Lists encounters, one per line, each worth `target` XP.
pub fn render_encounters<'a>(
    encounters: impl IntoIterator<Item = &'a Encounter>,
    target: u64,
    truncated: bool,
) -> String {
    let encounters: Vec<&Encounter> = encounters.into_iter().collect();
    let mut out = format!("Encounters ({})\n", encounters.len());
    if encounters.is_empty() {
        out.push_str("  no combination of candidates matches the budget\n");
    }
    for encounter in encounters {
        out.push_str(&format!("  {} ({} XP)\n", encounter, target));
    }
    if truncated {
        out.push_str("  search limits were reached; the list is incomplete\n");
    }
    out
}

/// Renders a full run. When `picked` is given, only those encounters are
/// listed.
pub fn render_run(
    config: &EncounterConfig,
    generated: &GeneratedEncounters,
    picked: Option<&[&Encounter]>,
) -> String {
    let target = generated.budget.target();
    let encounters = match picked {
        Some(picked) => render_encounters(picked.iter().copied(), target, generated.truncated),
        None => render_encounters(&generated.encounters, target, generated.truncated),
    };

    [
        render_settings(config),
        render_budget(&generated.budget),
        render_candidates(&generated.selected),
        encounters,
    ]
    .iter()
    .map(|section| format!("{}{}\n\n", section, SECTION_BREAK))
    .collect()
}
