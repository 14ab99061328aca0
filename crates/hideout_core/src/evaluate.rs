//! Requirement evaluation and level completion resolution.
//!
//! A level is complete when every requirement in its list is satisfied.
//! Module requirements recurse into other stations' levels; the recursion
//! carries an explicit visited set of `(station index, level number)` pairs
//! for the current resolution chain, so malformed catalogs with dependency
//! cycles terminate instead of looping. Every degenerate input — unknown
//! station, missing level, revisited pair — resolves to "not satisfied";
//! nothing in this module panics or returns an error.

use ahash::AHashSet;

use crate::traders::resolve_trader_id;
use crate::{normalize_station_name, ProgressStore, Requirement, StationGraph};

/// Pairs on the current resolution chain. Entries are removed on exit so a
/// prerequisite shared by two branches (a diamond) is not mistaken for a
/// cycle.
type ChainVisited = AHashSet<(usize, u32)>;

/// Decides whether a single requirement of `station_name`'s level
/// `level_number` is satisfied. Pure read over the graph and the store.
pub fn is_requirement_satisfied(
    graph: &StationGraph,
    store: &ProgressStore,
    station_name: &str,
    level_number: u32,
    requirement: &Requirement,
) -> bool {
    // Progress keys are written under the catalog's spelling of the name;
    // canonicalize in case the caller passed an alias.
    let canonical = graph
        .station_by_name(station_name)
        .map_or(station_name, |station| station.name.as_str());
    let mut visited = ChainVisited::default();
    requirement_satisfied(graph, store, canonical, level_number, requirement, &mut visited)
}

/// Decides whether every requirement of the named level is satisfied.
///
/// An unknown station or level number returns false (unresolvable
/// dependency, fails closed). An empty requirement list is vacuously
/// complete; the aggregate layer separately excludes such levels from its
/// denominator.
pub fn is_level_complete(
    graph: &StationGraph,
    store: &ProgressStore,
    station_name: &str,
    level_number: u32,
) -> bool {
    let mut visited = ChainVisited::default();
    level_complete_inner(graph, store, station_name, level_number, &mut visited)
}

/// Per-requirement breakdown of one level for display layers. `None` when
/// the station or level does not exist.
pub fn requirement_states<'graph>(
    graph: &'graph StationGraph,
    store: &ProgressStore,
    station_name: &str,
    level_number: u32,
) -> Option<Vec<(&'graph Requirement, bool)>> {
    let (station, level) = graph.level(station_name, level_number)?;
    let states = level
        .requirements
        .iter()
        .map(|requirement| {
            let mut visited = ChainVisited::default();
            let satisfied = requirement_satisfied(
                graph,
                store,
                &station.name,
                level_number,
                requirement,
                &mut visited,
            );
            (requirement, satisfied)
        })
        .collect();
    Some(states)
}

// ---------------------------------------------------------------------------
// Recursion internals
// ---------------------------------------------------------------------------

fn requirement_satisfied(
    graph: &StationGraph,
    store: &ProgressStore,
    station_name: &str,
    level_number: u32,
    requirement: &Requirement,
    visited: &mut ChainVisited,
) -> bool {
    match requirement {
        Requirement::Item { item_id, quantity } => {
            store.item_found(station_name, level_number, item_id) >= *quantity
        }
        Requirement::Trader {
            trader_id,
            level: required,
        } => store.trader_level(resolve_trader_id(trader_id)) >= *required,
        Requirement::Skill {
            skill,
            level: required,
        } => store.skill_level(station_name, level_number, skill) >= *required,
        Requirement::Module {
            module,
            level: required,
        } => module_satisfied(graph, store, module, *required, visited),
    }
}

fn module_satisfied(
    graph: &StationGraph,
    store: &ProgressStore,
    target_name: &str,
    target_level: u32,
    visited: &mut ChainVisited,
) -> bool {
    // Stash level 1 is an entry condition met by owning the base game, not
    // something to collect.
    if target_level == 1 && normalize_station_name(target_name) == "stash" {
        return true;
    }
    level_complete_inner(graph, store, target_name, target_level, visited)
}

fn level_complete_inner(
    graph: &StationGraph,
    store: &ProgressStore,
    station_name: &str,
    level_number: u32,
    visited: &mut ChainVisited,
) -> bool {
    let Some(index) = graph.station_index(station_name) else {
        return false;
    };
    let station = &graph.stations()[index];
    let Some(level) = station.levels.iter().find(|l| l.level == level_number) else {
        return false;
    };

    // Already on the current chain: a dependency cycle. Break it
    // pessimistically rather than recursing.
    if !visited.insert((index, level_number)) {
        return false;
    }

    let complete = level.requirements.iter().all(|requirement| {
        requirement_satisfied(graph, store, &station.name, level_number, requirement, visited)
    });

    visited.remove(&(index, level_number));
    complete
}
