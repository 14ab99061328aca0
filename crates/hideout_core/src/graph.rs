//! Station graph: the immutable catalog plus a normalized-name index.
//!
//! Upstream data sources are inconsistent about capitalization and spacing
//! of station names, so every by-name entry point normalizes before lookup.
//! Names resolve to indices once at construction; recursion elsewhere in the
//! crate is index-based.

use ahash::AHashMap;

use crate::{LevelDef, StationDef, StationId};

/// Lowercases and strips all whitespace: `"Bitcoin Farm"`, `"bitcoin farm"`
/// and `"BitcoinFarm"` all normalize to `"bitcoinfarm"`.
pub fn normalize_station_name(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

#[derive(Debug, Clone)]
pub struct StationGraph {
    stations: Vec<StationDef>,
    by_name: AHashMap<String, usize>,
}

impl StationGraph {
    /// First definition wins when two stations normalize to the same name;
    /// the world loader rejects such catalogs before they get here.
    pub fn new(stations: Vec<StationDef>) -> Self {
        let mut by_name = AHashMap::with_capacity(stations.len());
        for (index, station) in stations.iter().enumerate() {
            by_name
                .entry(normalize_station_name(&station.name))
                .or_insert(index);
        }
        Self { stations, by_name }
    }

    pub fn stations(&self) -> &[StationDef] {
        &self.stations
    }

    pub(crate) fn station_index(&self, name: &str) -> Option<usize> {
        self.by_name.get(&normalize_station_name(name)).copied()
    }

    pub fn station_by_name(&self, name: &str) -> Option<&StationDef> {
        self.station_index(name).map(|index| &self.stations[index])
    }

    pub fn station_by_id(&self, id: &StationId) -> Option<&StationDef> {
        self.stations.iter().find(|station| &station.id == id)
    }

    /// Looks up one level of one station. `None` means the station or the
    /// level does not exist — callers treat that as an unresolvable
    /// reference, never as complete.
    pub fn level(&self, station_name: &str, level: u32) -> Option<(&StationDef, &LevelDef)> {
        let station = self.station_by_name(station_name)?;
        let found = station.levels.iter().find(|l| l.level == level)?;
        Some((station, found))
    }
}
