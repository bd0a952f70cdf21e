//! Defines the species parameter table for the bonsai simulation.
//! Each species carries the multipliers that shape how fast a tree grows
//! and how much water and sunlight it demands per tick.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Enumerates the tree species available in the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Species {
    Pine,
    Maple,
    Juniper,
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = match self {
            Species::Pine => "pine",
            Species::Maple => "maple",
            Species::Juniper => "juniper",
        };
        f.write_str(key)
    }
}

/// The overall silhouette of a species' foliage. Carried for renderers;
/// the simulation engine never reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoliageShape {
    Triangular,
    Round,
    Irregular,
}

/// Per-species tuning parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesProfile {
    /// Human-readable name for notifications and reports.
    pub display_name: String,
    /// Multiplier on the base growth increment per tick.
    pub growth_rate: f64,
    /// Multiplier on the base water loss per tick.
    pub water_need: f64,
    /// Multiplier on the sunlight demand of the species.
    pub sunlight_need: f64,
    pub foliage_shape: FoliageShape,
}

/// Immutable lookup table of species parameters, keyed by [`Species`].
///
/// The `Default` table carries the built-in species. A catalog loaded from a
/// knowledge-base file may cover only a subset, so lookups are fallible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesCatalog {
    pub species: HashMap<Species, SpeciesProfile>,
}

impl SpeciesCatalog {
    pub fn get(&self, species: Species) -> Option<&SpeciesProfile> {
        self.species.get(&species)
    }
}

impl Default for SpeciesCatalog {
    fn default() -> Self {
        let mut species = HashMap::new();
        species.insert(
            Species::Pine,
            SpeciesProfile {
                display_name: "Pine".to_string(),
                growth_rate: 0.8,
                water_need: 0.7,
                sunlight_need: 1.2,
                foliage_shape: FoliageShape::Triangular,
            },
        );
        species.insert(
            Species::Maple,
            SpeciesProfile {
                display_name: "Maple".to_string(),
                growth_rate: 1.2,
                water_need: 1.0,
                sunlight_need: 0.8,
                foliage_shape: FoliageShape::Round,
            },
        );
        species.insert(
            Species::Juniper,
            SpeciesProfile {
                display_name: "Juniper".to_string(),
                growth_rate: 0.9,
                water_need: 0.6,
                sunlight_need: 1.0,
                foliage_shape: FoliageShape::Irregular,
            },
        );
        Self { species }
    }
}
