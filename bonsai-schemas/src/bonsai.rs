//! The persisted state of a single bonsai tree: vital stats, selected
//! species and style, branch layout, and care history timestamps.

use crate::species::Species;
use crate::style::BonsaiStyle;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Season of the simulated year. Summer raises water loss; nothing in the
/// simulation advances the season on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    #[default]
    Spring,
    Summer,
    Autumn,
    Winter,
}

/// One branch of the tree. Branches are regenerated on a style change and
/// stressed by pruning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    pub length: f64,
    pub angle_deg: f64,
    /// Branch vitality in `[0, 100]`.
    pub health: f64,
}

/// Complete state of one tree. Mutated exclusively through the simulation
/// engine; persisted as-is by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BonsaiState {
    /// Opaque identifier of the tree's owner.
    pub owner_id: String,
    /// Name of the tree, unique per owner.
    pub name: String,
    pub species: Species,
    pub style: BonsaiStyle,
    pub season: Season,
    /// Hydration level in `[0, 100]`.
    pub water: f64,
    /// Light exposure level in `[0, 100]`.
    pub sunlight: f64,
    /// Vitality in `[0, 100]`.
    pub health: f64,
    /// Cumulative growth, `>= 0`. Only a species change can reduce it.
    pub growth: f64,
    /// Simulated age, `>= 0`, monotonically increasing.
    pub age: f64,
    pub branches: Vec<Branch>,
    pub last_watered: DateTime<Utc>,
    pub last_pruned: DateTime<Utc>,
    /// Earned achievement keys. Opaque to the engine, carried for the UI.
    #[serde(default)]
    pub achievements: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BonsaiState {
    /// A freshly potted tree with default stats. Branches start empty; the
    /// simulation builder generates them from the initial style's profile.
    pub fn new(owner_id: &str, name: &str, species: Species, now: DateTime<Utc>) -> Self {
        Self {
            owner_id: owner_id.to_string(),
            name: name.to_string(),
            species,
            style: BonsaiStyle::FormalUpright,
            season: Season::default(),
            water: 50.0,
            sunlight: 50.0,
            health: 100.0,
            growth: 0.0,
            age: 0.0,
            branches: Vec::new(),
            last_watered: now,
            last_pruned: now,
            achievements: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}
