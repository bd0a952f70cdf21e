use crate::simulation::state::SimulationEvent;
use bonsai_schemas::{bonsai::BonsaiState, weather::WeatherCondition};
use csv::Writer;
use serde::Serialize;
use std::fs;
use std::io;

#[derive(Debug, Serialize)]
struct LogEntry {
    tick: u64,
    op: String,
    weather: String,
    water: f64,
    sunlight: f64,
    health: f64,
    growth: f64,
    age: f64,
    branch_count: usize,
    events_json: String,
}

#[derive(Debug)]
pub struct TimeSeriesLogger {
    writer: Writer<fs::File>,
}

impl TimeSeriesLogger {
    pub fn new(path: &str) -> Result<Self, io::Error> {
        let writer = Writer::from_path(path)?;
        Ok(Self { writer })
    }

    pub fn log_state(
        &mut self,
        tick: u64,
        op: &str,
        weather: Option<WeatherCondition>,
        state: &BonsaiState,
        events: &[SimulationEvent],
    ) -> Result<(), anyhow::Error> {
        let events_json = serde_json::to_string(events)?;

        let entry = LogEntry {
            tick,
            op: op.to_string(),
            weather: weather.map(|w| w.to_string()).unwrap_or_default(),
            water: state.water,
            sunlight: state.sunlight,
            health: state.health,
            growth: state.growth,
            age: state.age,
            branch_count: state.branches.len(),
            events_json,
        };

        self.writer.serialize(entry)?;
        self.writer.flush()?;
        Ok(())
    }
}
