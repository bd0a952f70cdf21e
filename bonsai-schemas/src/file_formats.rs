use crate::{species::SpeciesCatalog, style::StyleCatalog};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SpeciesCatalogFile {
    pub schema_version: String,
    #[serde(flatten)]
    pub catalog: SpeciesCatalog,
}

#[derive(Debug, Deserialize)]
pub struct StyleCatalogFile {
    pub schema_version: String,
    #[serde(flatten)]
    pub catalog: StyleCatalog,
}
