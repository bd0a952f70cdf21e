//! Defines the bonsai style parameter table: trunk angle and the difficulty
//! tier that gates how much growth a tree needs before adopting a style.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Enumerates the classical bonsai styles supported by the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BonsaiStyle {
    FormalUpright,
    InformalUpright,
    Slanting,
    Cascade,
    SemiCascade,
}

impl fmt::Display for BonsaiStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = match self {
            BonsaiStyle::FormalUpright => "formal_upright",
            BonsaiStyle::InformalUpright => "informal_upright",
            BonsaiStyle::Slanting => "slanting",
            BonsaiStyle::Cascade => "cascade",
            BonsaiStyle::SemiCascade => "semi_cascade",
        };
        f.write_str(key)
    }
}

/// Per-style tuning parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleProfile {
    /// Human-readable name for notifications and reports.
    pub display_name: String,
    /// The angle of the trunk relative to vertical, in degrees.
    pub trunk_angle_deg: f64,
    /// Difficulty tier. A tree needs `difficulty * 10` growth to adopt the
    /// style, and regenerates `difficulty + 2` branches when it does.
    pub difficulty: u32,
}

/// Immutable lookup table of style parameters, keyed by [`BonsaiStyle`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleCatalog {
    pub styles: HashMap<BonsaiStyle, StyleProfile>,
}

impl StyleCatalog {
    pub fn get(&self, style: BonsaiStyle) -> Option<&StyleProfile> {
        self.styles.get(&style)
    }
}

impl Default for StyleCatalog {
    fn default() -> Self {
        let mut styles = HashMap::new();
        styles.insert(
            BonsaiStyle::FormalUpright,
            StyleProfile {
                display_name: "Formal Upright".to_string(),
                trunk_angle_deg: 0.0,
                difficulty: 1,
            },
        );
        styles.insert(
            BonsaiStyle::InformalUpright,
            StyleProfile {
                display_name: "Informal Upright".to_string(),
                trunk_angle_deg: 15.0,
                difficulty: 2,
            },
        );
        styles.insert(
            BonsaiStyle::Slanting,
            StyleProfile {
                display_name: "Slanting".to_string(),
                trunk_angle_deg: 30.0,
                difficulty: 2,
            },
        );
        styles.insert(
            BonsaiStyle::Cascade,
            StyleProfile {
                display_name: "Cascade".to_string(),
                trunk_angle_deg: 90.0,
                difficulty: 3,
            },
        );
        styles.insert(
            BonsaiStyle::SemiCascade,
            StyleProfile {
                display_name: "Semi-Cascade".to_string(),
                trunk_angle_deg: 45.0,
                difficulty: 3,
            },
        );
        Self { styles }
    }
}
