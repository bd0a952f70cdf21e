//! Simulation core for the virtual bonsai: the stat-evolution engine, the
//! weather model feeding it, time-series logging, log analysis, and the
//! JSON file store used to persist trees between runs.

pub mod analysis;
pub mod error;
pub mod logger;
pub mod simulation;
pub mod store;
pub mod weather;
