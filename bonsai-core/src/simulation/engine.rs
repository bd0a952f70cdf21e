use super::{branches, state::SimulationEvent};
use crate::{
    error::BonsaiError,
    logger::TimeSeriesLogger,
    weather::{ambient_sunlight_bonus, derive_multipliers},
};
use bonsai_schemas::{
    bonsai::{BonsaiState, Season},
    species::{Species, SpeciesCatalog},
    style::{BonsaiStyle, StyleCatalog},
    weather::{WeatherCondition, WeatherReading},
};
use chrono::{DateTime, Utc};
use rand::Rng;

const BASE_WATER_LOSS: f64 = 0.5;
const SUMMER_WATER_MULTIPLIER: f64 = 1.5;
const BASE_GROWTH: f64 = 0.1;
const AGE_PER_TICK: f64 = 5.0;
const DEFICIENCY_THRESHOLD: f64 = 20.0;
const DEFICIENCY_PENALTY: f64 = 5.0;
const GROWTH_HEALTH_GATE: f64 = 50.0;
const GROWTH_PER_DIFFICULTY: f64 = 10.0;
const SPECIES_CHANGE_MIN_AGE: f64 = 10.0;
const TRANSPLANT_HEALTH: f64 = 80.0;

/// Inputs to one tick: elapsed time and whatever weather the driver knows.
#[derive(Debug, Clone)]
pub struct TickInputs {
    pub elapsed_ticks: u64,
    pub condition: WeatherCondition,
    pub reading: Option<WeatherReading>,
    /// Hour of day (0..24). When present, daylight drives the sunlight
    /// bonus instead of the ambient condition.
    pub hour: Option<u32>,
}

impl TickInputs {
    pub fn for_condition(condition: WeatherCondition) -> Self {
        Self {
            elapsed_ticks: 1,
            condition,
            reading: None,
            hour: None,
        }
    }
}

/// The stat-evolution engine for one tree.
///
/// Owns the `BonsaiState` exclusively and mutates it only through the six
/// operations below. Every operation leaves the stats inside their invariant
/// ranges, and validation failures leave the state untouched. The engine
/// performs no I/O beyond the optional time-series log.
#[derive(Debug)]
pub struct SimulationEngine {
    pub(super) state: BonsaiState,
    pub(super) species_catalog: SpeciesCatalog,
    pub(super) style_catalog: StyleCatalog,
    pub(super) tick: u64,
    pub(super) events: Vec<SimulationEvent>,
    pub(super) logger: Option<TimeSeriesLogger>,
}

impl SimulationEngine {
    /// Advances the tree by one time-step.
    ///
    /// All deltas are computed from the entering state and applied together,
    /// so the order of the stat updates cannot feed into each other within a
    /// single tick. Health never increases here; the only recovery path is a
    /// healthy watering.
    pub fn tick(&mut self, inputs: &TickInputs) -> Result<(), BonsaiError> {
        let species = self
            .species_catalog
            .get(self.state.species)
            .ok_or(BonsaiError::UnknownSpecies(self.state.species))?;

        self.events.clear();
        self.tick += 1;

        let multipliers = derive_multipliers(inputs.condition, inputs.reading.as_ref());
        let season_multiplier = if self.state.season == Season::Summer {
            SUMMER_WATER_MULTIPLIER
        } else {
            1.0
        };

        let water_loss =
            BASE_WATER_LOSS * multipliers.water_loss * species.water_need * season_multiplier;
        let sunlight_delta =
            ambient_sunlight_bonus(inputs.condition, inputs.hour) * multipliers.sunlight_gain / 10.0;

        let deficient = self.state.water < DEFICIENCY_THRESHOLD
            || self.state.sunlight < DEFICIENCY_THRESHOLD;
        let health_loss = if deficient { DEFICIENCY_PENALTY } else { 0.0 };

        let growth_delta = if self.state.health < GROWTH_HEALTH_GATE {
            0.0
        } else {
            let water_factor = if self.state.water > 30.0 && self.state.water < 80.0 {
                1.0
            } else {
                0.5
            };
            let sunlight_factor = if self.state.sunlight > 40.0 && self.state.sunlight < 90.0 {
                1.0
            } else {
                0.5
            };
            BASE_GROWTH * species.growth_rate * water_factor * sunlight_factor
        };

        self.state.water = clamp_stat(self.state.water - water_loss);
        self.state.sunlight = clamp_stat(self.state.sunlight + sunlight_delta);
        self.state.health = clamp_stat(self.state.health - health_loss);
        self.state.growth += growth_delta;
        self.state.age += inputs.elapsed_ticks as f64 * AGE_PER_TICK;

        if deficient {
            self.events.push(SimulationEvent::HealthStressed {
                health: self.state.health,
            });
        }

        self.log("tick", Some(inputs.condition))
    }

    /// Waters the tree. The health adjustment branches on the post-watering
    /// level: soaked trees take overwatering damage, a comfortable level
    /// grants the only health bonus in the simulation.
    pub fn water(&mut self, now: DateTime<Utc>) -> Result<(), BonsaiError> {
        self.events.clear();

        self.state.water = clamp_stat(self.state.water + 20.0);
        self.state.last_watered = now;

        let stressed = if self.state.water > 80.0 {
            self.state.health = clamp_stat(self.state.health - 5.0);
            true
        } else if self.state.water < 20.0 {
            self.state.health = clamp_stat(self.state.health - 10.0);
            true
        } else {
            self.state.health = clamp_stat(self.state.health + 2.0);
            false
        };

        self.events.push(SimulationEvent::Watered {
            level: self.state.water,
        });
        if stressed {
            self.events.push(SimulationEvent::HealthStressed {
                health: self.state.health,
            });
        }

        self.log("water", None)
    }

    /// Exposes the tree to light. No health effect.
    pub fn give_sunlight(&mut self) -> Result<(), BonsaiError> {
        self.events.clear();

        self.state.sunlight = clamp_stat(self.state.sunlight + 10.0);
        self.events.push(SimulationEvent::SunlightGiven {
            level: self.state.sunlight,
        });

        self.log("sunlight", None)
    }

    /// Prunes every branch. Cutting stresses both the branches and the tree.
    pub fn prune(&mut self, now: DateTime<Utc>) -> Result<(), BonsaiError> {
        self.events.clear();

        for branch in &mut self.state.branches {
            branch.health = clamp_stat(branch.health - 10.0);
        }
        self.state.health = clamp_stat(self.state.health - 5.0);
        self.state.last_pruned = now;

        self.events.push(SimulationEvent::Pruned {
            branch_count: self.state.branches.len(),
        });

        self.log("prune", None)
    }

    /// Restyles the tree, regenerating its branches for the new trunk line.
    ///
    /// Fails without touching the state when the tree has not grown enough
    /// for the style's difficulty tier.
    pub fn change_style<R: Rng>(
        &mut self,
        new_style: BonsaiStyle,
        rng: &mut R,
    ) -> Result<(), BonsaiError> {
        let profile = self
            .style_catalog
            .get(new_style)
            .ok_or(BonsaiError::UnknownStyle(new_style))?;
        let required = profile.difficulty as f64 * GROWTH_PER_DIFFICULTY;
        if self.state.growth < required {
            return Err(BonsaiError::InsufficientGrowth {
                style: new_style,
                required,
                actual: self.state.growth,
            });
        }

        self.events.clear();

        self.state.style = new_style;
        self.state.health = clamp_stat(self.state.health - 10.0);
        self.state.branches = branches::generate(profile, rng);

        self.events
            .push(SimulationEvent::StyleChanged { style: new_style });

        self.log("change_style", None)
    }

    /// Repots the tree as a different species. Transplant shock resets
    /// health to a fixed level and costs some growth.
    ///
    /// Fails without touching the state while the tree is too young.
    pub fn change_species(&mut self, new_species: Species) -> Result<(), BonsaiError> {
        self.species_catalog
            .get(new_species)
            .ok_or(BonsaiError::UnknownSpecies(new_species))?;
        if self.state.age < SPECIES_CHANGE_MIN_AGE {
            return Err(BonsaiError::ImmatureTree {
                age: self.state.age,
                required: SPECIES_CHANGE_MIN_AGE,
            });
        }

        self.events.clear();

        self.state.species = new_species;
        self.state.health = TRANSPLANT_HEALTH;
        self.state.growth = (self.state.growth - 10.0).max(0.0);

        self.events.push(SimulationEvent::SpeciesChanged {
            species: new_species,
        });

        self.log("change_species", None)
    }

    pub fn state(&self) -> &BonsaiState {
        &self.state
    }

    /// Consumes the engine, handing the tree back for persistence.
    pub fn into_state(self) -> BonsaiState {
        self.state
    }

    pub fn current_tick(&self) -> u64 {
        self.tick
    }

    pub fn events(&self) -> &[SimulationEvent] {
        &self.events
    }

    fn log(&mut self, op: &str, weather: Option<WeatherCondition>) -> Result<(), BonsaiError> {
        if let Some(logger) = &mut self.logger {
            logger.log_state(self.tick, op, weather, &self.state, &self.events)?;
        }
        Ok(())
    }
}

fn clamp_stat(value: f64) -> f64 {
    value.clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::builder::SimulationBuilder;
    use bonsai_schemas::bonsai::Branch;
    use rand::{rngs::SmallRng, SeedableRng};
    use std::collections::HashMap;

    fn fixed_now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-03-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn engine_with(mutate: impl FnOnce(&mut BonsaiState)) -> SimulationEngine {
        let mut state = BonsaiState::new("owner-1", "Kiyoshi", Species::Pine, fixed_now());
        state.branches = vec![Branch {
            length: 15.0,
            angle_deg: 0.0,
            health: 100.0,
        }];
        mutate(&mut state);
        let mut rng = SmallRng::seed_from_u64(0);
        SimulationBuilder::new()
            .with_bonsai(state)
            .build(&mut rng)
            .unwrap()
    }

    fn assert_invariants(state: &BonsaiState) {
        assert!((0.0..=100.0).contains(&state.water));
        assert!((0.0..=100.0).contains(&state.sunlight));
        assert!((0.0..=100.0).contains(&state.health));
        assert!(state.growth >= 0.0);
        assert!(state.age >= 0.0);
        for branch in &state.branches {
            assert!((0.0..=100.0).contains(&branch.health));
        }
    }

    #[test]
    fn tick_applies_weather_species_and_season() {
        let mut engine = engine_with(|_| {});
        engine
            .tick(&TickInputs::for_condition(WeatherCondition::Sunny))
            .unwrap();

        let state = engine.state();
        // 0.5 base * 1.2 sunny * 0.7 pine water need
        assert!((state.water - (50.0 - 0.42)).abs() < 1e-9);
        // +20 sunny bonus / 10
        assert!((state.sunlight - 52.0).abs() < 1e-9);
        assert_eq!(state.health, 100.0);
        // 0.1 base * 0.8 pine growth rate, both comfort factors at 1
        assert!((state.growth - 0.08).abs() < 1e-9);
        assert_eq!(state.age, 5.0);
        assert_invariants(state);
    }

    #[test]
    fn summer_raises_water_loss() {
        let mut engine = engine_with(|s| s.season = Season::Summer);
        engine
            .tick(&TickInputs::for_condition(WeatherCondition::Sunny))
            .unwrap();
        assert!((engine.state().water - (50.0 - 0.63)).abs() < 1e-9);
    }

    #[test]
    fn deficiency_costs_health_and_low_health_stops_growth() {
        let mut engine = engine_with(|s| {
            s.water = 10.0;
            s.health = 40.0;
            s.growth = 3.0;
        });
        engine
            .tick(&TickInputs::for_condition(WeatherCondition::Cloudy))
            .unwrap();

        let state = engine.state();
        assert_eq!(state.health, 35.0);
        assert_eq!(state.growth, 3.0);
        assert!(matches!(
            engine.events(),
            [SimulationEvent::HealthStressed { .. }]
        ));
    }

    #[test]
    fn comfort_factors_halve_growth_outside_their_bands() {
        // water exactly 30 sits outside the strict 30..80 band
        let mut engine = engine_with(|s| {
            s.water = 30.0;
            s.sunlight = 95.0;
        });
        engine
            .tick(&TickInputs::for_condition(WeatherCondition::Windy))
            .unwrap();
        // 0.1 * 0.8 * 0.5 * 0.5
        assert!((engine.state().growth - 0.02).abs() < 1e-9);
    }

    #[test]
    fn tick_clamps_at_the_stat_bounds() {
        let mut engine = engine_with(|s| {
            s.water = 0.0;
            s.sunlight = 100.0;
        });
        engine
            .tick(&TickInputs::for_condition(WeatherCondition::Sunny))
            .unwrap();
        assert_eq!(engine.state().water, 0.0);
        assert_eq!(engine.state().sunlight, 100.0);
        assert_invariants(engine.state());
    }

    #[test]
    fn daylight_reading_drives_sunlight_when_hour_is_known() {
        let mut engine = engine_with(|_| {});
        let inputs = TickInputs {
            elapsed_ticks: 1,
            condition: WeatherCondition::Rainy,
            reading: Some(WeatherReading {
                temperature_c: 20.0,
                wind_speed: 2.0,
                humidity: 80.0,
                description: "light rain".to_string(),
            }),
            hour: Some(23),
        };
        engine.tick(&inputs).unwrap();
        // night: -20 bonus * 0.8 rain gain / 10
        assert!((engine.state().sunlight - (50.0 - 1.6)).abs() < 1e-9);
        // 0.5 base * 0.5 rain * 0.7 pine
        assert!((engine.state().water - (50.0 - 0.175)).abs() < 1e-9);
    }

    #[test]
    fn elapsed_ticks_scale_only_the_age() {
        let mut engine = engine_with(|_| {});
        let mut inputs = TickInputs::for_condition(WeatherCondition::Sunny);
        inputs.elapsed_ticks = 4;
        engine.tick(&inputs).unwrap();
        assert_eq!(engine.state().age, 20.0);
        assert!((engine.state().water - (50.0 - 0.42)).abs() < 1e-9);
    }

    #[test]
    fn overwatering_damages_health() {
        let mut engine = engine_with(|s| s.water = 90.0);
        engine.water(fixed_now()).unwrap();
        assert_eq!(engine.state().water, 100.0);
        assert_eq!(engine.state().health, 95.0);
        assert_eq!(engine.state().last_watered, fixed_now());
    }

    #[test]
    fn watering_bonus_branches_on_the_post_update_level() {
        // 5 + 20 = 25: neither over- nor underwatered, so the bonus applies
        let mut engine = engine_with(|s| {
            s.water = 5.0;
            s.health = 50.0;
        });
        engine.water(fixed_now()).unwrap();
        assert_eq!(engine.state().water, 25.0);
        assert_eq!(engine.state().health, 52.0);
    }

    #[test]
    fn watering_bonus_never_exceeds_full_health() {
        let mut engine = engine_with(|s| s.water = 50.0);
        engine.water(fixed_now()).unwrap();
        assert_eq!(engine.state().health, 100.0);
    }

    #[test]
    fn sunlight_saturates_at_the_cap() {
        let mut engine = engine_with(|s| s.sunlight = 100.0);
        engine.give_sunlight().unwrap();
        assert_eq!(engine.state().sunlight, 100.0);
        assert_eq!(engine.state().health, 100.0);
    }

    #[test]
    fn pruning_stresses_branches_and_tree() {
        let mut engine = engine_with(|s| {
            s.branches = vec![
                Branch {
                    length: 12.0,
                    angle_deg: -45.0,
                    health: 100.0,
                },
                Branch {
                    length: 18.0,
                    angle_deg: 45.0,
                    health: 5.0,
                },
            ];
        });
        engine.prune(fixed_now()).unwrap();
        assert_eq!(engine.state().branches[0].health, 90.0);
        assert_eq!(engine.state().branches[1].health, 0.0);
        assert_eq!(engine.state().health, 95.0);
        assert_eq!(engine.state().last_pruned, fixed_now());
    }

    #[test]
    fn style_change_requires_growth_and_leaves_state_untouched_on_failure() {
        let mut engine = engine_with(|s| s.growth = 15.0);
        let before = engine.state().clone();
        let mut rng = SmallRng::seed_from_u64(3);

        let err = engine
            .change_style(BonsaiStyle::Cascade, &mut rng)
            .unwrap_err();
        assert!(matches!(
            err,
            BonsaiError::InsufficientGrowth { required, .. } if required == 30.0
        ));
        assert_eq!(engine.state(), &before);
    }

    #[test]
    fn style_change_restyles_and_regrows_branches() {
        let mut engine = engine_with(|s| s.growth = 30.0);
        let mut rng = SmallRng::seed_from_u64(3);
        engine.change_style(BonsaiStyle::Cascade, &mut rng).unwrap();

        let state = engine.state();
        assert_eq!(state.style, BonsaiStyle::Cascade);
        assert_eq!(state.health, 90.0);
        assert_eq!(state.branches.len(), 5);
        assert!(state.branches.iter().all(|b| b.health == 100.0));
        assert_invariants(state);
    }

    #[test]
    fn species_change_requires_maturity() {
        let mut engine = engine_with(|s| s.age = 5.0);
        let before = engine.state().clone();

        let err = engine.change_species(Species::Maple).unwrap_err();
        assert!(matches!(err, BonsaiError::ImmatureTree { age, .. } if age == 5.0));
        assert_eq!(engine.state(), &before);
    }

    #[test]
    fn species_change_resets_health_and_costs_growth() {
        let mut engine = engine_with(|s| {
            s.age = 10.0;
            s.health = 30.0;
            s.growth = 6.0;
        });
        engine.change_species(Species::Maple).unwrap();

        let state = engine.state();
        assert_eq!(state.species, Species::Maple);
        // hard reset, regardless of whether health was above or below
        assert_eq!(state.health, 80.0);
        assert_eq!(state.growth, 0.0);
    }

    #[test]
    fn a_partial_catalog_turns_lookups_into_errors() {
        let state = BonsaiState::new("owner-1", "Kiyoshi", Species::Pine, fixed_now());
        let mut rng = SmallRng::seed_from_u64(0);
        let mut engine = SimulationBuilder::new()
            .with_bonsai(state)
            .build(&mut rng)
            .unwrap();
        engine.species_catalog = SpeciesCatalog {
            species: HashMap::new(),
        };

        let err = engine
            .tick(&TickInputs::for_condition(WeatherCondition::Sunny))
            .unwrap_err();
        assert!(matches!(err, BonsaiError::UnknownSpecies(Species::Pine)));
    }

    #[test]
    fn stats_stay_in_range_under_sustained_neglect() {
        let mut engine = engine_with(|s| s.season = Season::Summer);
        for _ in 0..500 {
            engine
                .tick(&TickInputs::for_condition(WeatherCondition::Windy))
                .unwrap();
        }
        assert_invariants(engine.state());
        assert_eq!(engine.state().health, 0.0);
    }
}
