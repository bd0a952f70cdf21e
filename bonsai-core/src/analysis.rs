//! Aggregates a simulation's CSV time-series log into a care report:
//! how the tree was tended, how stressed it got, and where it ended up.

use crate::{error::BonsaiError, simulation::state::SimulationEvent};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct LogEntry {
    pub tick: u64,
    pub op: String,
    pub weather: String,
    pub water: f64,
    pub sunlight: f64,
    pub health: f64,
    pub growth: f64,
    pub age: f64,
    pub branch_count: usize,
    pub events_json: String,
}

#[derive(Debug, Default, Clone)]
pub struct CareReport {
    pub total_ticks: u64,
    pub times_watered: u64,
    pub times_sunlight_given: u64,
    pub times_pruned: u64,
    pub style_changes: u64,
    pub species_changes: u64,
    pub stress_events: u64,
    pub min_health: f64,
    pub final_health: f64,
    pub final_growth: f64,
    pub final_age: f64,
}

/// Re-reads a time-series log and folds its event stream into a report.
pub fn care_report(log_path: &str) -> Result<CareReport, BonsaiError> {
    let mut reader = csv::Reader::from_path(log_path)
        .map_err(|e| BonsaiError::CsvError(log_path.to_string(), e))?;

    let mut report = CareReport {
        min_health: 100.0,
        ..CareReport::default()
    };

    for result in reader.deserialize() {
        let record: LogEntry = result.map_err(|e| BonsaiError::CsvError(log_path.to_string(), e))?;

        if record.op == "tick" {
            report.total_ticks += 1;
        }

        let events: Vec<SimulationEvent> = serde_json::from_str(&record.events_json)?;
        for event in events {
            match event {
                SimulationEvent::Watered { .. } => report.times_watered += 1,
                SimulationEvent::SunlightGiven { .. } => report.times_sunlight_given += 1,
                SimulationEvent::Pruned { .. } => report.times_pruned += 1,
                SimulationEvent::StyleChanged { .. } => report.style_changes += 1,
                SimulationEvent::SpeciesChanged { .. } => report.species_changes += 1,
                SimulationEvent::HealthStressed { .. } => report.stress_events += 1,
            }
        }

        report.min_health = report.min_health.min(record.health);
        report.final_health = record.health;
        report.final_growth = record.growth;
        report.final_age = record.age;
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::{builder::SimulationBuilder, engine::TickInputs};
    use bonsai_schemas::{species::Species, weather::WeatherCondition};
    use chrono::Utc;
    use rand::{rngs::SmallRng, SeedableRng};
    use tempfile::TempDir;

    #[test]
    fn report_matches_the_run_that_produced_the_log() {
        let dir = TempDir::new().unwrap();
        let log_path = dir.path().join("run.csv");
        let log_path = log_path.to_str().unwrap();

        let mut rng = SmallRng::seed_from_u64(5);
        let mut engine = SimulationBuilder::new()
            .with_new_tree("owner-1", "Goro", Species::Maple)
            .with_timeseries_logging_to_file(log_path)
            .build(&mut rng)
            .unwrap();

        for _ in 0..10 {
            engine
                .tick(&TickInputs::for_condition(WeatherCondition::Cloudy))
                .unwrap();
        }
        engine.water(Utc::now()).unwrap();
        engine.water(Utc::now()).unwrap();
        engine.give_sunlight().unwrap();
        engine.prune(Utc::now()).unwrap();

        let report = care_report(log_path).unwrap();
        assert_eq!(report.total_ticks, 10);
        assert_eq!(report.times_watered, 2);
        assert_eq!(report.times_sunlight_given, 1);
        assert_eq!(report.times_pruned, 1);
        assert_eq!(report.style_changes, 0);
        assert_eq!(report.final_age, 50.0);
        assert_eq!(report.final_health, engine.state().health);
        assert!(report.min_health <= 100.0);
    }
}
