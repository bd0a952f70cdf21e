use crate::{
    error::BonsaiError,
    logger::TimeSeriesLogger,
    simulation::{branches, engine::SimulationEngine},
};
use bonsai_schemas::{
    bonsai::BonsaiState,
    species::{Species, SpeciesCatalog},
    style::StyleCatalog,
};
use chrono::Utc;
use rand::Rng;

/// A fluent builder for constructing a `SimulationEngine`.
///
/// Catalogs fall back to the built-in tables when not supplied. The tree is
/// either an existing `BonsaiState` (e.g. loaded from the store) or a fresh
/// one created from an owner, a name and a species.
#[derive(Default)]
pub struct SimulationBuilder {
    species_catalog: Option<SpeciesCatalog>,
    style_catalog: Option<StyleCatalog>,
    bonsai: Option<BonsaiState>,
    new_tree: Option<(String, String, Species)>,
    log_path: Option<String>,
}

impl SimulationBuilder {
    /// Creates a new, empty `SimulationBuilder`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the species parameter table for the simulation.
    pub fn with_species_catalog(mut self, catalog: SpeciesCatalog) -> Self {
        self.species_catalog = Some(catalog);
        self
    }

    /// Sets the style parameter table for the simulation.
    pub fn with_style_catalog(mut self, catalog: StyleCatalog) -> Self {
        self.style_catalog = Some(catalog);
        self
    }

    /// Sets an existing tree to simulate.
    pub fn with_bonsai(mut self, bonsai: BonsaiState) -> Self {
        self.bonsai = Some(bonsai);
        self
    }

    /// Pots a fresh tree with default stats for the given owner.
    pub fn with_new_tree(mut self, owner_id: &str, name: &str, species: Species) -> Self {
        self.new_tree = Some((owner_id.to_string(), name.to_string(), species));
        self
    }

    /// Configures the simulation to write time-series data to the specified CSV file.
    pub fn with_timeseries_logging_to_file(mut self, path: &str) -> Self {
        self.log_path = Some(path.to_string());
        self
    }

    /// Consumes the builder and returns a fully configured `SimulationEngine`.
    ///
    /// The random source seeds the initial branch layout when the tree has
    /// none yet.
    ///
    /// # Errors
    ///
    /// Returns a `BonsaiError` if no tree was provided, or if the tree's
    /// species or style is missing from the catalogs.
    pub fn build<R: Rng>(self, rng: &mut R) -> Result<SimulationEngine, BonsaiError> {
        let species_catalog = self.species_catalog.unwrap_or_default();
        let style_catalog = self.style_catalog.unwrap_or_default();

        let mut state = match (self.bonsai, self.new_tree) {
            (Some(state), _) => state,
            (None, Some((owner_id, name, species))) => {
                BonsaiState::new(&owner_id, &name, species, Utc::now())
            }
            (None, None) => return Err(BonsaiError::NoTreeProvided),
        };

        species_catalog
            .get(state.species)
            .ok_or(BonsaiError::UnknownSpecies(state.species))?;
        let style = style_catalog
            .get(state.style)
            .ok_or(BonsaiError::UnknownStyle(state.style))?;

        if state.branches.is_empty() {
            state.branches = branches::generate(style, rng);
        }

        let logger = match self.log_path {
            Some(path) => Some(
                TimeSeriesLogger::new(&path).map_err(|e| BonsaiError::FileIO(path.clone(), e))?,
            ),
            None => None,
        };

        Ok(SimulationEngine {
            state,
            species_catalog,
            style_catalog,
            tick: 0,
            events: Vec::new(),
            logger,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bonsai_schemas::style::BonsaiStyle;
    use rand::{rngs::SmallRng, SeedableRng};
    use std::collections::HashMap;

    #[test]
    fn a_new_tree_starts_with_defaults_and_styled_branches() {
        let mut rng = SmallRng::seed_from_u64(11);
        let engine = SimulationBuilder::new()
            .with_new_tree("owner-1", "Chibi", Species::Juniper)
            .build(&mut rng)
            .unwrap();

        let state = engine.state();
        assert_eq!(state.owner_id, "owner-1");
        assert_eq!(state.species, Species::Juniper);
        assert_eq!(state.style, BonsaiStyle::FormalUpright);
        assert_eq!(state.water, 50.0);
        assert_eq!(state.sunlight, 50.0);
        assert_eq!(state.health, 100.0);
        assert_eq!(state.growth, 0.0);
        assert_eq!(state.age, 0.0);
        // formal upright: difficulty 1, so 3 branches
        assert_eq!(state.branches.len(), 3);
    }

    #[test]
    fn building_without_a_tree_fails() {
        let mut rng = SmallRng::seed_from_u64(11);
        let err = SimulationBuilder::new().build(&mut rng).unwrap_err();
        assert!(matches!(err, BonsaiError::NoTreeProvided));
    }

    #[test]
    fn building_against_a_partial_catalog_fails() {
        let mut rng = SmallRng::seed_from_u64(11);
        let err = SimulationBuilder::new()
            .with_new_tree("owner-1", "Chibi", Species::Pine)
            .with_species_catalog(SpeciesCatalog {
                species: HashMap::new(),
            })
            .build(&mut rng)
            .unwrap_err();
        assert!(matches!(err, BonsaiError::UnknownSpecies(Species::Pine)));
    }
}
