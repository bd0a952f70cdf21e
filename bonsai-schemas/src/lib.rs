//! Shared data schemas for the virtual bonsai simulation.
//!
//! These types are plain serde data carriers: the tree state itself, the
//! static species/style catalogs, weather inputs, and the YAML file wrappers
//! used to load tuned catalogs from disk. All behavior lives in `bonsai-core`.

pub mod bonsai;
pub mod file_formats;
pub mod species;
pub mod style;
pub mod weather;
