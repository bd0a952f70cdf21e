use anyhow::Result;
use bonsai_core::simulation::engine::SimulationEngine;
use chrono::Utc;

/// Threshold-based care policy for unattended demo runs: water and light the
/// tree when its stats dip, prune on a fixed cadence.
pub struct Caretaker {
    pub water_below: f64,
    pub sunlight_below: f64,
    pub prune_every: u64,
}

impl Default for Caretaker {
    fn default() -> Self {
        Self {
            water_below: 40.0,
            sunlight_below: 50.0,
            prune_every: 50,
        }
    }
}

impl Caretaker {
    /// Applies at most one round of care after a tick.
    pub fn tend(&self, engine: &mut SimulationEngine, tick: u64) -> Result<()> {
        if engine.state().water < self.water_below {
            engine.water(Utc::now())?;
        }
        if engine.state().sunlight < self.sunlight_below {
            engine.give_sunlight()?;
        }
        if self.prune_every > 0 && tick % self.prune_every == 0 {
            engine.prune(Utc::now())?;
        }
        Ok(())
    }
}
