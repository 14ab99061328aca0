//! Content/schema validation tests for the shipped station catalog.
//!
//! These tests load the actual `content/stations.json` and validate:
//! 1. Schema validity — the catalog deserializes without error
//! 2. Range constraints — no zero quantities, no empty IDs
//! 3. Cross-reference integrity — module and trader references resolve
//! 4. Content invariants — the upgrade tree is walkable from a fresh profile

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use hideout_core::{
    compute_overall_progress, normalize_station_name, ProgressStore, Requirement, StationGraph,
    TRADERS,
};
use hideout_world::{load_catalog, unresolved_module_references};

/// Helper: resolve the catalog path relative to the workspace root.
/// Integration tests run from the crate directory, so we go up two levels.
fn catalog_path() -> String {
    let manifest = std::env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR not set");
    format!("{manifest}/../../content/stations.json")
}

/// Shared catalog loaded once across all tests in this module.
fn load_test_catalog() -> &'static StationGraph {
    static CATALOG: OnceLock<StationGraph> = OnceLock::new();
    CATALOG.get_or_init(|| {
        load_catalog(&catalog_path()).expect("load_catalog should succeed for shipped content")
    })
}

// =========================================================================
// 1. Schema validation — deserialization succeeds
// =========================================================================

#[test]
fn catalog_loads_successfully() {
    let _graph = load_test_catalog();
}

// =========================================================================
// 2. Range constraints
// =========================================================================

#[test]
fn station_ids_and_names_are_non_empty() {
    let graph = load_test_catalog();
    for station in graph.stations() {
        assert!(!station.id.0.is_empty(), "station has empty id");
        assert!(
            !normalize_station_name(&station.name).is_empty(),
            "station '{}' has a name that normalizes to nothing",
            station.id.0,
        );
    }
}

#[test]
fn item_requirements_have_positive_quantities() {
    let graph = load_test_catalog();
    for station in graph.stations() {
        for level in &station.levels {
            for requirement in &level.requirements {
                if let Requirement::Item { item_id, quantity } = requirement {
                    assert!(!item_id.0.is_empty(), "empty item id in '{}'", station.name);
                    assert!(
                        *quantity > 0,
                        "{} level {} requires 0 of '{}'",
                        station.name,
                        level.level,
                        item_id,
                    );
                    assert!(
                        *quantity <= 100_000_000,
                        "{} level {} '{}' quantity {} looks like a data error",
                        station.name,
                        level.level,
                        item_id,
                        quantity,
                    );
                }
            }
        }
    }
}

#[test]
fn trader_requirements_are_within_loyalty_range() {
    let graph = load_test_catalog();
    for station in graph.stations() {
        for level in &station.levels {
            for requirement in &level.requirements {
                if let Requirement::Trader { trader_id, level: required } = requirement {
                    assert!(
                        (1..=4).contains(required),
                        "{} level {} trader '{}' loyalty {} out of range [1, 4]",
                        station.name,
                        level.level,
                        trader_id,
                        required,
                    );
                }
            }
        }
    }
}

#[test]
fn skill_requirements_are_positive() {
    let graph = load_test_catalog();
    for station in graph.stations() {
        for level in &station.levels {
            for requirement in &level.requirements {
                if let Requirement::Skill { skill, level: required } = requirement {
                    assert!(!skill.is_empty(), "empty skill name in '{}'", station.name);
                    assert!(
                        *required > 0,
                        "{} level {} skill '{}' requires level 0",
                        station.name,
                        level.level,
                        skill,
                    );
                }
            }
        }
    }
}

// =========================================================================
// 3. Cross-reference integrity
// =========================================================================

#[test]
fn module_references_resolve() {
    let graph = load_test_catalog();
    let unresolved = unresolved_module_references(graph);
    assert!(
        unresolved.is_empty(),
        "unresolved module references in shipped catalog: {unresolved:?}",
    );
}

#[test]
fn trader_names_are_in_the_canonical_roster() {
    let graph = load_test_catalog();
    let known: HashSet<&str> = TRADERS.iter().map(|(name, _)| *name).collect();
    for station in graph.stations() {
        for level in &station.levels {
            for requirement in &level.requirements {
                if let Requirement::Trader { trader_id, .. } = requirement {
                    assert!(
                        known.contains(trader_id.as_str()),
                        "{} level {} references unknown trader '{}'",
                        station.name,
                        level.level,
                        trader_id,
                    );
                }
            }
        }
    }
}

// =========================================================================
// 4. Content invariants — the upgrade tree is walkable
// =========================================================================

#[test]
fn stash_level_one_is_the_requirement_free_entry_point() {
    let graph = load_test_catalog();
    let (_, level_one) = graph
        .level("Stash", 1)
        .expect("catalog must define Stash level 1");
    assert!(
        level_one.requirements.is_empty(),
        "Stash level 1 is the base-game entry condition and must be free",
    );
}

#[test]
fn upgrades_require_the_previous_level_of_their_own_station() {
    let graph = load_test_catalog();
    for station in graph.stations() {
        let min_level = station.levels.iter().map(|l| l.level).min().unwrap_or(1);
        for level in &station.levels {
            if level.level == min_level {
                continue;
            }
            let depends_on_previous = level.requirements.iter().any(|r| {
                matches!(r, Requirement::Module { module, level: required }
                    if normalize_station_name(module) == normalize_station_name(&station.name)
                    && *required == level.level - 1)
            });
            assert!(
                depends_on_previous,
                "{} level {} does not require {} level {}",
                station.name,
                level.level,
                station.name,
                level.level - 1,
            );
        }
    }
}

#[test]
fn no_circular_module_dependencies() {
    let graph = load_test_catalog();

    // Build adjacency: (station, level) -> module prerequisites.
    type Node = (String, u32);
    let mut prereq_map: HashMap<Node, Vec<Node>> = HashMap::new();
    for station in graph.stations() {
        for level in &station.levels {
            let node = (normalize_station_name(&station.name), level.level);
            let prereqs = level
                .requirements
                .iter()
                .filter_map(|r| match r {
                    Requirement::Module { module, level } => {
                        Some((normalize_station_name(module), *level))
                    }
                    _ => None,
                })
                .collect();
            prereq_map.insert(node, prereqs);
        }
    }

    // DFS cycle detection
    let mut visited: HashSet<Node> = HashSet::new();
    let mut in_stack: HashSet<Node> = HashSet::new();

    #[allow(clippy::items_after_statements)]
    fn has_cycle(
        node: &(String, u32),
        prereq_map: &HashMap<(String, u32), Vec<(String, u32)>>,
        visited: &mut HashSet<(String, u32)>,
        in_stack: &mut HashSet<(String, u32)>,
    ) -> bool {
        if in_stack.contains(node) {
            return true;
        }
        if visited.contains(node) {
            return false;
        }
        visited.insert(node.clone());
        in_stack.insert(node.clone());
        if let Some(prereqs) = prereq_map.get(node) {
            for prereq in prereqs {
                if has_cycle(prereq, prereq_map, visited, in_stack) {
                    return true;
                }
            }
        }
        in_stack.remove(node);
        false
    }

    let nodes: Vec<Node> = prereq_map.keys().cloned().collect();
    for node in &nodes {
        assert!(
            !has_cycle(node, &prereq_map, &mut visited, &mut in_stack),
            "circular module dependency involving {} level {}",
            node.0,
            node.1,
        );
    }
}

#[test]
fn fresh_profile_starts_at_zero_of_thirty() {
    let graph = load_test_catalog();
    let store = ProgressStore::new();
    let progress = compute_overall_progress(graph, &store);
    assert_eq!(progress.completed_levels, 0);
    assert_eq!(progress.total_levels, 30);
    assert_eq!(progress.percentage, 0);
}
