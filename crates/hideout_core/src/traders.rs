//! The fixed trader roster.
//!
//! Trader requirements arrive keyed by display name but progress is stored
//! under the upstream API identity, so the one canonical name→id table
//! lives here. Names outside the table pass through as their own identity.

/// Trader display name → upstream API identity.
pub const TRADERS: [(&str, &str); 8] = [
    ("Prapor", "54cb50c76803fa8b248b4571"),
    ("Therapist", "54cb57776803fa99248b456e"),
    ("Fence", "579dc571d53a0658a154fbec"),
    ("Skier", "58330581ace78e27b8b10cee"),
    ("Peacekeeper", "5935c25fb3acc3127c3d8cd9"),
    ("Mechanic", "5a7c2eca46aef81a7ca2145d"),
    ("Ragman", "5ac3b934156ae10c4430e83c"),
    ("Jaeger", "5c0647fdd443bc2504c2d371"),
];

pub fn resolve_trader_id(name: &str) -> &str {
    TRADERS
        .iter()
        .find(|(trader_name, _)| *trader_name == name)
        .map_or(name, |(_, id)| id)
}
