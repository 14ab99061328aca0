//! Whole-graph summaries computed from the catalog and the progress store.
//!
//! Pure reads. Each counted level calls the resolver directly — no result
//! is cached across the scan, so a store mutation between calls is always
//! reflected in the next computation.

use std::collections::HashMap;

use ahash::RandomState;
use serde::Serialize;

use crate::{is_level_complete, ItemId, ProgressStore, Requirement, StationGraph, StationId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OverallProgress {
    pub completed_levels: u32,
    pub total_levels: u32,
    /// Rounded to whole percent; 0 when no levels are counted.
    pub percentage: u32,
}

/// Counts every level with a non-empty requirement list across the graph.
pub fn compute_overall_progress(graph: &StationGraph, store: &ProgressStore) -> OverallProgress {
    let mut completed_levels = 0_u32;
    let mut total_levels = 0_u32;

    for station in graph.stations() {
        for level in &station.levels {
            // Requirement-free levels don't count toward the denominator.
            if level.requirements.is_empty() {
                continue;
            }
            total_levels += 1;
            if is_level_complete(graph, store, &station.name, level.level) {
                completed_levels += 1;
            }
        }
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let percentage = if total_levels == 0 {
        0
    } else {
        (100.0 * f64::from(completed_levels) / f64::from(total_levels)).round() as u32
    };

    OverallProgress {
        completed_levels,
        total_levels,
        percentage,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ItemTotal {
    pub required: u64,
    pub found: u64,
}

impl ItemTotal {
    /// Over-collection still completes (found >= required) but is worth
    /// surfacing to the user.
    pub fn over_collected(&self) -> bool {
        self.found > self.required
    }
}

pub type ItemTotals = HashMap<ItemId, ItemTotal, RandomState>;

/// Accumulates required and found quantities for every item requirement in
/// the graph, regardless of level completion state. Found amounts are not
/// shared between stations that require the same item — each station/level
/// slot is tracked under its own key and the totals simply sum them.
pub fn compute_item_totals(graph: &StationGraph, store: &ProgressStore) -> ItemTotals {
    let mut totals = ItemTotals::default();

    for station in graph.stations() {
        for level in &station.levels {
            for requirement in &level.requirements {
                if let Requirement::Item { item_id, quantity } = requirement {
                    let entry = totals.entry(item_id.clone()).or_default();
                    entry.required += quantity;
                    entry.found += store.item_found(&station.name, level.level, item_id);
                }
            }
        }
    }

    totals
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationProgress {
    pub id: StationId,
    pub name: String,
    pub completed_levels: u32,
    pub total_levels: u32,
}

/// Per-station completed/total counts, in catalog order. The counting rule
/// matches `compute_overall_progress`: requirement-free levels are skipped.
pub fn compute_station_progress(graph: &StationGraph, store: &ProgressStore) -> Vec<StationProgress> {
    graph
        .stations()
        .iter()
        .map(|station| {
            let mut completed_levels = 0_u32;
            let mut total_levels = 0_u32;
            for level in &station.levels {
                if level.requirements.is_empty() {
                    continue;
                }
                total_levels += 1;
                if is_level_complete(graph, store, &station.name, level.level) {
                    completed_levels += 1;
                }
            }
            StationProgress {
                id: station.id.clone(),
                name: station.name.clone(),
                completed_levels,
                total_levels,
            }
        })
        .collect()
}
