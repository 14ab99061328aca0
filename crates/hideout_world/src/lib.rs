//! Catalog and progress loading shared between the CLI and the
//! reconciliation subsystem.
//!
//! The catalog loader fails fast on authoring errors that would corrupt the
//! graph (duplicate names, duplicate level numbers). Unresolvable module
//! references are deliberately NOT load errors — external data is allowed
//! to be ill-formed and the engine fails closed on them — but they are
//! reported so callers can warn.

use std::collections::HashMap;
use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use hideout_core::{
    normalize_station_name, ProgressStore, Requirement, StationDef, StationGraph, StationId,
};

#[derive(Deserialize)]
struct CatalogFile {
    stations: Vec<StationDef>,
}

/// Validates a station catalog, panicking on any authoring error.
///
/// Catches mistakes like: two stations whose names collide after
/// normalization (the name is the join key for external payloads), a level
/// number repeated within one station, or a level numbered 0.
pub fn validate_catalog(stations: &[StationDef]) {
    let mut ids: HashSet<&StationId> = HashSet::new();
    let mut names: HashSet<String> = HashSet::new();

    for station in stations {
        assert!(
            ids.insert(&station.id),
            "duplicate station id '{}'",
            station.id.0,
        );
        assert!(
            names.insert(normalize_station_name(&station.name)),
            "station '{}' collides with another station after name normalization",
            station.name,
        );

        let mut levels: HashSet<u32> = HashSet::new();
        for level in &station.levels {
            assert!(
                level.level > 0,
                "station '{}' has a level numbered 0",
                station.name,
            );
            assert!(
                levels.insert(level.level),
                "station '{}' defines level {} twice",
                station.name,
                level.level,
            );
        }
    }
}

/// Loads and validates the station catalog from a JSON file.
pub fn load_catalog(path: &str) -> Result<StationGraph> {
    let file = Path::new(path);
    let catalog: CatalogFile = serde_json::from_str(
        &std::fs::read_to_string(file).with_context(|| format!("reading {path}"))?,
    )
    .with_context(|| format!("parsing {path}"))?;
    validate_catalog(&catalog.stations);
    Ok(StationGraph::new(catalog.stations))
}

/// A module requirement whose target station/level does not exist in the
/// graph. The engine resolves these as "not satisfied"; callers typically
/// warn about them at load time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedModule {
    pub station: StationId,
    pub level: u32,
    pub target: String,
    pub target_level: u32,
}

/// Scans every module requirement for targets missing from the graph.
/// Stash level 1 is skipped: the engine satisfies it unconditionally, so a
/// catalog without an explicit Stash 1 entry is not ill-formed.
pub fn unresolved_module_references(graph: &StationGraph) -> Vec<UnresolvedModule> {
    let mut unresolved = Vec::new();
    for station in graph.stations() {
        for level in &station.levels {
            for requirement in &level.requirements {
                let Requirement::Module {
                    module,
                    level: target_level,
                } = requirement
                else {
                    continue;
                };
                if *target_level == 1 && normalize_station_name(module) == "stash" {
                    continue;
                }
                if graph.level(module, *target_level).is_none() {
                    unresolved.push(UnresolvedModule {
                        station: station.id.clone(),
                        level: level.level,
                        target: module.clone(),
                        target_level: *target_level,
                    });
                }
            }
        }
    }
    unresolved
}

/// Loads the progress store from a flat JSON object. Values that are not
/// numbers coerce to 0 instead of failing the load.
pub fn load_progress(path: &str) -> Result<ProgressStore> {
    let raw: HashMap<String, serde_json::Value> = serde_json::from_str(
        &std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?,
    )
    .with_context(|| format!("parsing {path}"))?;

    let mut store = ProgressStore::new();
    for (key, value) in raw {
        #[allow(clippy::cast_possible_truncation)]
        let coerced = value
            .as_i64()
            .or_else(|| value.as_f64().map(|f| f as i64))
            .unwrap_or(0);
        store.insert_raw(key, coerced);
    }
    Ok(store)
}

/// Writes the progress store back out as a flat JSON object.
pub fn save_progress(path: &str, store: &ProgressStore) -> Result<()> {
    let file = std::fs::File::create(path).with_context(|| format!("creating {path}"))?;
    serde_json::to_writer_pretty(file, store).with_context(|| format!("writing {path}"))?;
    Ok(())
}
