//! `hideout_core` — requirement resolution and completion-state engine.
//!
//! No IO, no clock, no randomness. The station catalog is immutable after
//! construction; the progress store is the only mutable input, and every
//! computation here is a pure read over the two.

mod aggregate;
mod evaluate;
mod graph;
mod store;
mod traders;
mod types;

pub use aggregate::{
    compute_item_totals, compute_overall_progress, compute_station_progress, ItemTotal, ItemTotals,
    OverallProgress, StationProgress,
};
pub use evaluate::{is_level_complete, is_requirement_satisfied, requirement_states};
pub use graph::{normalize_station_name, StationGraph};
pub use store::{
    item_key, skill_key, station_skill_key, trader_key, ProgressStore, DEFAULT_TRADER_LEVEL,
};
pub use traders::{resolve_trader_id, TRADERS};
pub use types::*;

#[cfg(any(test, feature = "test-support"))]
pub mod test_fixtures;
