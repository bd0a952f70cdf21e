//! Weather inputs to the simulation: the internally-cycled ambient condition
//! and the optional reading supplied by an external weather service.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ambient weather condition, cycled by the driver when no external reading
/// is available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCondition {
    #[default]
    Sunny,
    Cloudy,
    Rainy,
    Windy,
}

impl WeatherCondition {
    pub const ALL: [WeatherCondition; 4] = [
        WeatherCondition::Sunny,
        WeatherCondition::Cloudy,
        WeatherCondition::Rainy,
        WeatherCondition::Windy,
    ];

    /// Base sunlight gained (or lost) per tick under this condition, before
    /// the per-tick `/ 10` scaling.
    pub fn sunlight_bonus(&self) -> f64 {
        match self {
            WeatherCondition::Sunny => 20.0,
            WeatherCondition::Cloudy => -10.0,
            WeatherCondition::Rainy => -20.0,
            WeatherCondition::Windy => 0.0,
        }
    }

    /// Base multiplier on the water lost per tick under this condition.
    pub fn water_loss_factor(&self) -> f64 {
        match self {
            WeatherCondition::Sunny => 1.2,
            WeatherCondition::Cloudy => 0.8,
            WeatherCondition::Rainy => 0.5,
            WeatherCondition::Windy => 1.5,
        }
    }
}

impl fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = match self {
            WeatherCondition::Sunny => "sunny",
            WeatherCondition::Cloudy => "cloudy",
            WeatherCondition::Rainy => "rainy",
            WeatherCondition::Windy => "windy",
        };
        f.write_str(key)
    }
}

/// A point-in-time reading from an external weather source. The simulation
/// never fetches this itself; the caller supplies it when available.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    pub temperature_c: f64,
    /// Wind speed in m/s.
    pub wind_speed: f64,
    /// Relative humidity in percent.
    pub humidity: f64,
    /// Free-text condition description, e.g. "light rain".
    pub description: String,
}
