//! The flat keyed progress store and its typed accessor layer.
//!
//! Everything a user tracks — item quantities found, trader loyalty levels,
//! skill levels — lives in one `String -> i64` map so the whole store
//! serializes as a plain JSON object. Call sites never format composite
//! keys themselves; the key builders and accessors here are the only place
//! the key shapes and the defaults (missing item 0, missing trader 1,
//! missing skill 0) are written down.

use std::collections::HashMap;

use ahash::RandomState;
use serde::{Deserialize, Serialize};

use crate::ItemId;

/// A trader the user has never touched is at loyalty level 1, not 0.
pub const DEFAULT_TRADER_LEVEL: i64 = 1;

// ---------------------------------------------------------------------------
// Composite key builders
// ---------------------------------------------------------------------------

pub fn item_key(station_name: &str, level: u32, item_id: &ItemId) -> String {
    format!("{station_name}-lvl{level}-{item_id}")
}

pub fn trader_key(trader_id: &str) -> String {
    format!("trader-{trader_id}")
}

pub fn skill_key(skill: &str) -> String {
    format!("skill-{skill}")
}

pub fn station_skill_key(station_name: &str, level: u32, skill: &str) -> String {
    format!("{station_name}-lvl{level}-skill-{skill}")
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgressStore {
    entries: HashMap<String, i64, RandomState>,
}

impl ProgressStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Found quantity for one item slot. Missing key is 0; a negative
    /// stored value (corrupt data) also reads as 0.
    pub fn item_found(&self, station_name: &str, level: u32, item_id: &ItemId) -> u64 {
        let raw = self
            .entries
            .get(&item_key(station_name, level, item_id))
            .copied()
            .unwrap_or(0);
        u64::try_from(raw).unwrap_or(0)
    }

    pub fn set_item_found(&mut self, station_name: &str, level: u32, item_id: &ItemId, found: u64) {
        let value = i64::try_from(found).unwrap_or(i64::MAX);
        self.entries.insert(item_key(station_name, level, item_id), value);
    }

    pub fn trader_level(&self, trader_id: &str) -> i64 {
        self.entries
            .get(&trader_key(trader_id))
            .copied()
            .unwrap_or(DEFAULT_TRADER_LEVEL)
    }

    pub fn set_trader_level(&mut self, trader_id: &str, level: i64) {
        self.entries.insert(trader_key(trader_id), level);
    }

    /// Skill level with the fallback chain: the global entry wins, then the
    /// level-local entry, then 0.
    pub fn skill_level(&self, station_name: &str, level: u32, skill: &str) -> i64 {
        if let Some(value) = self.entries.get(&skill_key(skill)) {
            return *value;
        }
        self.entries
            .get(&station_skill_key(station_name, level, skill))
            .copied()
            .unwrap_or(0)
    }

    pub fn set_skill_level(&mut self, skill: &str, level: i64) {
        self.entries.insert(skill_key(skill), level);
    }

    pub fn set_station_skill_level(&mut self, station_name: &str, level: u32, skill: &str, value: i64) {
        self.entries
            .insert(station_skill_key(station_name, level, skill), value);
    }

    pub fn get_raw(&self, key: &str) -> Option<i64> {
        self.entries.get(key).copied()
    }

    pub fn insert_raw(&mut self, key: impl Into<String>, value: i64) {
        self.entries.insert(key.into(), value);
    }

    /// Full-store reset — the only deletion path progress entries have.
    pub fn reset(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, i64)> {
        self.entries.iter().map(|(key, value)| (key, *value))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
