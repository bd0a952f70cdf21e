//! JSON file store for bonsai trees, keyed by owner and tree name.
//!
//! The simulation core is agnostic to how trees are persisted; this store is
//! the default collaborator, writing one pretty-printed JSON file per tree
//! under `<root>/<owner_id>/<name>.json`.

use crate::error::BonsaiError;
use bonsai_schemas::bonsai::BonsaiState;
use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};

pub struct BonsaiStore {
    root: PathBuf,
}

impl BonsaiStore {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Persists a tree, refreshing its `updated_at` stamp first.
    pub fn save(&self, state: &mut BonsaiState) -> Result<(), BonsaiError> {
        state.updated_at = Utc::now();

        let path = self.tree_path(&state.owner_id, &state.name);
        let dir = path.parent().expect("tree path always has a parent");
        fs::create_dir_all(dir)
            .map_err(|e| BonsaiError::FileIO(dir.display().to_string(), e))?;

        let json = serde_json::to_string_pretty(state)?;
        fs::write(&path, json).map_err(|e| BonsaiError::FileIO(path.display().to_string(), e))
    }

    pub fn load(&self, owner_id: &str, name: &str) -> Result<BonsaiState, BonsaiError> {
        let path = self.tree_path(owner_id, name);
        if !path.exists() {
            return Err(BonsaiError::TreeNotFound {
                owner_id: owner_id.to_string(),
                name: name.to_string(),
            });
        }
        let json = fs::read_to_string(&path)
            .map_err(|e| BonsaiError::FileIO(path.display().to_string(), e))?;
        Ok(serde_json::from_str(&json)?)
    }

    /// All trees belonging to an owner. An owner with no saved trees yields
    /// an empty list rather than an error.
    pub fn list_for_owner(&self, owner_id: &str) -> Result<Vec<BonsaiState>, BonsaiError> {
        let dir = self.root.join(owner_id);
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut trees = Vec::new();
        let entries =
            fs::read_dir(&dir).map_err(|e| BonsaiError::FileIO(dir.display().to_string(), e))?;
        for entry in entries {
            let entry = entry.map_err(|e| BonsaiError::FileIO(dir.display().to_string(), e))?;
            let path = entry.path();
            if path.is_file() && path.extension().map_or(false, |s| s == "json") {
                let json = fs::read_to_string(&path)
                    .map_err(|e| BonsaiError::FileIO(path.display().to_string(), e))?;
                trees.push(serde_json::from_str(&json)?);
            }
        }
        Ok(trees)
    }

    fn tree_path(&self, owner_id: &str, name: &str) -> PathBuf {
        self.root.join(owner_id).join(format!("{name}.json"))
    }
}
