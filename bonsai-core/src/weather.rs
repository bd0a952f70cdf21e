//! Derives per-tick water-loss and sunlight-gain multipliers from the
//! ambient condition and, when available, an external weather reading.

use bonsai_schemas::weather::{WeatherCondition, WeatherReading};
use rand::{rngs::SmallRng, Rng, SeedableRng};

/// Multipliers applied to the base water loss and sunlight gain of a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeatherMultipliers {
    pub water_loss: f64,
    pub sunlight_gain: f64,
}

/// Derives the tick multipliers.
///
/// With a reading, the description rules form an else-if chain and the wind
/// and temperature rules assign over whatever came before them instead of
/// compounding. This overwrite policy is load-bearing: saved trees evolved
/// under it, so it is kept bit-for-bit.
pub fn derive_multipliers(
    condition: WeatherCondition,
    reading: Option<&WeatherReading>,
) -> WeatherMultipliers {
    let Some(reading) = reading else {
        return WeatherMultipliers {
            water_loss: condition.water_loss_factor(),
            sunlight_gain: 1.0,
        };
    };

    let mut water_loss = 1.0;
    let mut sunlight_gain = 1.0;

    let description = reading.description.to_lowercase();
    if description.contains("rain") {
        water_loss *= 0.5;
        sunlight_gain *= 0.8;
    } else if description.contains("cloud") {
        sunlight_gain *= 0.6;
    } else if description.contains("sun") {
        water_loss *= 1.2;
        sunlight_gain *= 1.2;
    }

    if reading.wind_speed > 10.0 {
        water_loss = 1.5;
    }

    if reading.temperature_c < 10.0 {
        water_loss = 0.8;
        sunlight_gain = 0.8;
    } else if reading.temperature_c > 30.0 {
        water_loss = 1.2;
        sunlight_gain = 0.9;
    }

    WeatherMultipliers {
        water_loss,
        sunlight_gain,
    }
}

/// Raw sunlight bonus of a tick, before the gain multiplier and the `/ 10`
/// scaling. With an hour of day it follows daylight (06:00 to 18:00);
/// otherwise the ambient condition decides.
pub fn ambient_sunlight_bonus(condition: WeatherCondition, hour: Option<u32>) -> f64 {
    match hour {
        Some(h) if (6..18).contains(&h) => 20.0,
        Some(_) => -20.0,
        None => condition.sunlight_bonus(),
    }
}

/// Cycles the ambient condition for drivers that have no external weather
/// source. Seeded so demo runs replay identically.
pub struct WeatherCycle {
    rng: SmallRng,
    current: WeatherCondition,
}

impl WeatherCycle {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            current: WeatherCondition::default(),
        }
    }

    pub fn current(&self) -> WeatherCondition {
        self.current
    }

    /// Picks the next condition uniformly at random and returns it.
    pub fn advance(&mut self) -> WeatherCondition {
        let idx = self.rng.gen_range(0..WeatherCondition::ALL.len());
        self.current = WeatherCondition::ALL[idx];
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(temperature_c: f64, wind_speed: f64, description: &str) -> WeatherReading {
        WeatherReading {
            temperature_c,
            wind_speed,
            humidity: 50.0,
            description: description.to_string(),
        }
    }

    #[test]
    fn condition_factors_apply_without_a_reading() {
        let m = derive_multipliers(WeatherCondition::Rainy, None);
        assert_eq!(m.water_loss, 0.5);
        assert_eq!(m.sunlight_gain, 1.0);

        let m = derive_multipliers(WeatherCondition::Windy, None);
        assert_eq!(m.water_loss, 1.5);
    }

    #[test]
    fn description_rules_are_an_else_if_chain() {
        let m = derive_multipliers(WeatherCondition::Sunny, Some(&reading(20.0, 2.0, "light rain")));
        assert_eq!(m.water_loss, 0.5);
        assert_eq!(m.sunlight_gain, 0.8);

        // "rain" wins over "cloud" when both appear
        let m = derive_multipliers(
            WeatherCondition::Sunny,
            Some(&reading(20.0, 2.0, "rain and clouds")),
        );
        assert_eq!(m.water_loss, 0.5);

        let m = derive_multipliers(WeatherCondition::Sunny, Some(&reading(20.0, 2.0, "few clouds")));
        assert_eq!(m.water_loss, 1.0);
        assert_eq!(m.sunlight_gain, 0.6);
    }

    #[test]
    fn wind_overwrites_the_description_multiplier() {
        let m = derive_multipliers(WeatherCondition::Sunny, Some(&reading(20.0, 12.0, "light rain")));
        assert_eq!(m.water_loss, 1.5);
        // sunlight keeps the rain reduction
        assert_eq!(m.sunlight_gain, 0.8);
    }

    #[test]
    fn temperature_overwrites_wind_and_description() {
        let m = derive_multipliers(WeatherCondition::Sunny, Some(&reading(5.0, 12.0, "clear sun")));
        assert_eq!(m.water_loss, 0.8);
        assert_eq!(m.sunlight_gain, 0.8);

        let m = derive_multipliers(WeatherCondition::Sunny, Some(&reading(35.0, 2.0, "clear sun")));
        assert_eq!(m.water_loss, 1.2);
        assert_eq!(m.sunlight_gain, 0.9);
    }

    #[test]
    fn daylight_hours_decide_the_bonus_when_given() {
        assert_eq!(ambient_sunlight_bonus(WeatherCondition::Rainy, Some(12)), 20.0);
        assert_eq!(ambient_sunlight_bonus(WeatherCondition::Sunny, Some(3)), -20.0);
        assert_eq!(ambient_sunlight_bonus(WeatherCondition::Cloudy, None), -10.0);
    }

    #[test]
    fn weather_cycle_replays_for_a_seed() {
        let mut a = WeatherCycle::from_seed(7);
        let mut b = WeatherCycle::from_seed(7);
        for _ in 0..20 {
            assert_eq!(a.advance(), b.advance());
        }
    }
}
