use bonsai_schemas::{species::Species, style::BonsaiStyle};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BonsaiError {
    #[error("tree needs {required} growth to adopt the '{style}' style (has {actual:.1})")]
    InsufficientGrowth {
        style: BonsaiStyle,
        required: f64,
        actual: f64,
    },

    #[error("tree is too young to change species (age {age:.1}, needs {required})")]
    ImmatureTree { age: f64, required: f64 },

    #[error("species '{0}' not found in catalog")]
    UnknownSpecies(Species),

    #[error("style '{0}' not found in catalog")]
    UnknownStyle(BonsaiStyle),

    #[error("no tree named '{name}' for owner '{owner_id}'")]
    TreeNotFound { owner_id: String, name: String },

    #[error("a tree must be provided for the simulation")]
    NoTreeProvided,

    #[error("I/O error for file '{0}': {1}")]
    FileIO(String, #[source] std::io::Error),

    #[error("Failed to parse YAML from '{0}': {1}")]
    YamlParsing(String, #[source] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParsing(#[from] serde_json::Error),

    #[error("Failed to process CSV file '{0}': {1}")]
    CsvError(String, #[source] csv::Error),

    #[error("An error occurred during logging: {0}")]
    LoggingError(#[from] anyhow::Error),
}
