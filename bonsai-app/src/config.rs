use anyhow::{Context, Result};
use bonsai_schemas::{
    file_formats::{SpeciesCatalogFile, StyleCatalogFile},
    species::SpeciesCatalog,
    style::StyleCatalog,
};
use std::{fs, path::Path};

/// The static parameter tables for a simulation run.
///
/// Loaded from YAML knowledge-base files when a data directory is given,
/// falling back to the built-in tables otherwise.
pub struct Catalogs {
    pub species: SpeciesCatalog,
    pub styles: StyleCatalog,
}

impl Catalogs {
    pub fn builtin() -> Self {
        Self {
            species: SpeciesCatalog::default(),
            styles: StyleCatalog::default(),
        }
    }

    /// Loads `species.yaml` and `styles.yaml` from the base directory.
    pub fn load(base_path: &str) -> Result<Self> {
        println!("Loading catalogs from '{}'...", base_path);

        let species_path = Path::new(base_path).join("species.yaml");
        let species_str = fs::read_to_string(&species_path)
            .with_context(|| format!("Failed to read {:?}", species_path))?;
        let species_file: SpeciesCatalogFile = serde_yaml::from_str(&species_str)
            .with_context(|| format!("Failed to parse YAML from {:?}", species_path))?;

        let styles_path = Path::new(base_path).join("styles.yaml");
        let styles_str = fs::read_to_string(&styles_path)
            .with_context(|| format!("Failed to read {:?}", styles_path))?;
        let styles_file: StyleCatalogFile = serde_yaml::from_str(&styles_str)
            .with_context(|| format!("Failed to parse YAML from {:?}", styles_path))?;

        println!("Catalogs loaded successfully.");
        Ok(Self {
            species: species_file.catalog,
            styles: styles_file.catalog,
        })
    }
}
