use bonsai_schemas::{species::Species, style::BonsaiStyle};
use serde::{Deserialize, Serialize};

/// What happened during the most recent engine operation. Cleared at the
/// start of each operation, serialized into the time-series log, and folded
/// into the care report afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SimulationEvent {
    Watered { level: f64 },
    SunlightGiven { level: f64 },
    Pruned { branch_count: usize },
    StyleChanged { style: BonsaiStyle },
    SpeciesChanged { species: Species },
    HealthStressed { health: f64 },
}
