//! Reconciliation of the local station catalog against an upstream
//! snapshot.
//!
//! The upstream API occasionally rebalances the game: quantities change,
//! levels gain or lose requirements, stations appear. This module compares
//! two catalogs and reports what moved, so stale local data is noticed
//! instead of silently mis-tracking. The comparison is a simple list
//! comparison joined by normalized station name — no structural diffing
//! beyond what the report needs.

use serde::Serialize;

use hideout_core::{ItemId, LevelDef, Requirement, StationDef, StationGraph};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CatalogChange {
    /// Present upstream, absent locally.
    StationAdded { station: String },
    /// Present locally, gone upstream.
    StationRemoved { station: String },
    LevelAdded { station: String, level: u32 },
    LevelRemoved { station: String, level: u32 },
    /// Same item required on both sides with a different quantity — the
    /// common rebalance case, reported with the numbers.
    ItemQuantityChanged {
        station: String,
        level: u32,
        item_id: ItemId,
        local: u64,
        remote: u64,
    },
    /// Requirement lists differ beyond item quantities.
    RequirementsChanged { station: String, level: u32 },
}

/// Compares the local catalog against a remote snapshot. Output order is
/// deterministic: local stations in catalog order, then remote-only
/// stations in snapshot order.
pub fn diff_catalogs(local: &StationGraph, remote: &StationGraph) -> Vec<CatalogChange> {
    let mut changes = Vec::new();

    for local_station in local.stations() {
        match remote.station_by_name(&local_station.name) {
            None => changes.push(CatalogChange::StationRemoved {
                station: local_station.name.clone(),
            }),
            Some(remote_station) => {
                diff_station(local_station, remote_station, &mut changes);
            }
        }
    }

    for remote_station in remote.stations() {
        if local.station_by_name(&remote_station.name).is_none() {
            changes.push(CatalogChange::StationAdded {
                station: remote_station.name.clone(),
            });
        }
    }

    changes
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn diff_station(local: &StationDef, remote: &StationDef, changes: &mut Vec<CatalogChange>) {
    for local_level in &local.levels {
        match remote.levels.iter().find(|l| l.level == local_level.level) {
            None => changes.push(CatalogChange::LevelRemoved {
                station: local.name.clone(),
                level: local_level.level,
            }),
            Some(remote_level) => {
                diff_level(&local.name, local_level, remote_level, changes);
            }
        }
    }

    for remote_level in &remote.levels {
        if !local.levels.iter().any(|l| l.level == remote_level.level) {
            changes.push(CatalogChange::LevelAdded {
                station: local.name.clone(),
                level: remote_level.level,
            });
        }
    }
}

fn diff_level(
    station_name: &str,
    local: &LevelDef,
    remote: &LevelDef,
    changes: &mut Vec<CatalogChange>,
) {
    if local.requirements == remote.requirements {
        return;
    }

    // Report per-item quantity moves with the numbers.
    for requirement in &local.requirements {
        let Requirement::Item { item_id, quantity } = requirement else {
            continue;
        };
        let remote_quantity = remote.requirements.iter().find_map(|r| match r {
            Requirement::Item {
                item_id: remote_id,
                quantity,
            } if remote_id == item_id => Some(*quantity),
            _ => None,
        });
        if let Some(remote_quantity) = remote_quantity {
            if remote_quantity != *quantity {
                changes.push(CatalogChange::ItemQuantityChanged {
                    station: station_name.to_string(),
                    level: local.level,
                    item_id: item_id.clone(),
                    local: *quantity,
                    remote: remote_quantity,
                });
            }
        }
    }

    // Anything beyond quantity moves — requirements added, removed, or of a
    // different kind — collapses into one structural change report.
    if !lists_equal_ignoring_item_quantities(local, remote) {
        changes.push(CatalogChange::RequirementsChanged {
            station: station_name.to_string(),
            level: local.level,
        });
    }
}

/// List equality with item quantities masked out, so a pure quantity
/// rebalance does not double-report as a structural change.
fn lists_equal_ignoring_item_quantities(local: &LevelDef, remote: &LevelDef) -> bool {
    if local.requirements.len() != remote.requirements.len() {
        return false;
    }
    local
        .requirements
        .iter()
        .zip(&remote.requirements)
        .all(|(a, b)| match (a, b) {
            (
                Requirement::Item { item_id: id_a, .. },
                Requirement::Item { item_id: id_b, .. },
            ) => id_a == id_b,
            _ => a == b,
        })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
