//! Type definitions for `hideout_core`.
//!
//! The station catalog shapes and the requirement tagged union, with the
//! field names of the external data contract.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

// ---------------------------------------------------------------------------
// ID newtypes
// ---------------------------------------------------------------------------

macro_rules! string_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub String);

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(StationId);
string_id!(ItemId);

// ---------------------------------------------------------------------------
// Catalog types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationDef {
    pub id: StationId,
    /// Display name; also the join key used by external payloads.
    pub name: String,
    /// Display copy. The engine never reads it.
    #[serde(default)]
    pub description: String,
    pub levels: Vec<LevelDef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelDef {
    /// Positive level number. Levels are not necessarily contiguous; a
    /// number absent from `StationDef::levels` does not exist and is never
    /// treated as auto-complete.
    pub level: u32,
    /// Some stations' top level ships with no requirements object at all;
    /// that parses as an empty list rather than failing.
    #[serde(default)]
    pub requirements: SmallVec<[Requirement; 4]>,
}

/// One precondition of a level. The `type` discriminant and the per-variant
/// field names are the external data contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Requirement {
    #[serde(rename_all = "camelCase")]
    Item { item_id: ItemId, quantity: u64 },
    /// Depends on another station (by name) reaching `level`.
    Module { module: String, level: u32 },
    #[serde(rename_all = "camelCase")]
    Trader { trader_id: String, level: i64 },
    Skill { skill: String, level: i64 },
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requirement_wire_format_field_names() {
        let json = r#"[
            {"type": "item", "itemId": "item_wrench", "quantity": 3},
            {"type": "module", "module": "Workbench", "level": 2},
            {"type": "trader", "traderId": "Prapor", "level": 2},
            {"type": "skill", "skill": "Endurance", "level": 1}
        ]"#;
        let requirements: Vec<Requirement> = serde_json::from_str(json).unwrap();
        assert_eq!(
            requirements[0],
            Requirement::Item {
                item_id: ItemId("item_wrench".to_string()),
                quantity: 3,
            }
        );
        assert_eq!(
            requirements[1],
            Requirement::Module {
                module: "Workbench".to_string(),
                level: 2,
            }
        );
        assert_eq!(
            requirements[2],
            Requirement::Trader {
                trader_id: "Prapor".to_string(),
                level: 2,
            }
        );
        assert_eq!(
            requirements[3],
            Requirement::Skill {
                skill: "Endurance".to_string(),
                level: 1,
            }
        );
    }

    #[test]
    fn level_without_requirements_field_parses_as_empty() {
        let level: LevelDef = serde_json::from_str(r#"{"level": 4}"#).unwrap();
        assert_eq!(level.level, 4);
        assert!(level.requirements.is_empty());
    }
}
