//! Shared test fixtures for hideout_core and downstream crates.
//!
//! `base_graph()` provides a six-station hideout exercising all four
//! requirement kinds, a module chain three stations deep, and one
//! requirement-free level (Stash 1). Quantities are small so tests can
//! satisfy them with a handful of store writes.

use smallvec::SmallVec;

use crate::{ItemId, LevelDef, Requirement, StationDef, StationGraph, StationId};

pub fn item_requirement(item_id: &str, quantity: u64) -> Requirement {
    Requirement::Item {
        item_id: ItemId(item_id.to_string()),
        quantity,
    }
}

pub fn module_requirement(module: &str, level: u32) -> Requirement {
    Requirement::Module {
        module: module.to_string(),
        level,
    }
}

pub fn trader_requirement(trader: &str, level: i64) -> Requirement {
    Requirement::Trader {
        trader_id: trader.to_string(),
        level,
    }
}

pub fn skill_requirement(skill: &str, level: i64) -> Requirement {
    Requirement::Skill {
        skill: skill.to_string(),
        level,
    }
}

pub fn station(id: &str, name: &str, levels: Vec<LevelDef>) -> StationDef {
    StationDef {
        id: StationId(id.to_string()),
        name: name.to_string(),
        description: String::new(),
        levels,
    }
}

pub fn level(number: u32, requirements: Vec<Requirement>) -> LevelDef {
    LevelDef {
        level: number,
        requirements: SmallVec::from_vec(requirements),
    }
}

/// Six stations, eleven counted levels (Stash 1 has no requirements and is
/// excluded from aggregate denominators).
pub fn base_graph() -> StationGraph {
    StationGraph::new(vec![
        station(
            "station_stash",
            "Stash",
            vec![
                level(1, vec![]),
                level(2, vec![item_requirement("item_roubles", 150)]),
                level(
                    3,
                    vec![
                        item_requirement("item_roubles", 450),
                        module_requirement("Generator", 1),
                    ],
                ),
            ],
        ),
        station(
            "station_generator",
            "Generator",
            vec![
                level(1, vec![item_requirement("item_spark_plug", 2)]),
                level(
                    2,
                    vec![
                        item_requirement("item_spark_plug", 4),
                        item_requirement("item_car_battery", 1),
                        module_requirement("Stash", 1),
                    ],
                ),
            ],
        ),
        station(
            "station_workbench",
            "Workbench",
            vec![
                level(
                    1,
                    vec![
                        item_requirement("item_toolset", 1),
                        trader_requirement("Mechanic", 1),
                    ],
                ),
                level(2, vec![item_requirement("item_wrench", 5)]),
                level(
                    3,
                    vec![
                        item_requirement("item_drill", 2),
                        skill_requirement("Attention", 2),
                        module_requirement("Generator", 2),
                    ],
                ),
            ],
        ),
        station(
            "station_intelligence_center",
            "Intelligence Center",
            vec![
                level(1, vec![module_requirement("Workbench", 1)]),
                level(
                    2,
                    vec![
                        module_requirement("Workbench", 3),
                        trader_requirement("Prapor", 3),
                    ],
                ),
            ],
        ),
        station(
            "station_bitcoin_farm",
            "Bitcoin Farm",
            vec![level(
                1,
                vec![
                    module_requirement("Intelligence Center", 2),
                    skill_requirement("Hideout Management", 2),
                ],
            )],
        ),
        station(
            "station_lavatory",
            "Lavatory",
            vec![level(1, vec![item_requirement("item_duct_tape", 1)])],
        ),
    ])
}
