use std::collections::BTreeMap;
use std::path::PathBuf;

use lockstep_core::{Legend, TerrainCode, TerrainRole};
use serde::Deserialize;

use crate::error::LoadError;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawConfig {
    map_file: Option<PathBuf>,
    terrain_keys: Option<BTreeMap<String, i32>>,
}

/// Parsed scenario configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapConfig {
    /// Map file path exactly as written in the config.
    pub map_file: PathBuf,
    pub legend: Legend,
}

impl MapConfig {
    /// Parse a config document. Terrain keys beyond the four roles are
    /// ignored.
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        let raw: RawConfig = serde_json::from_str(json).map_err(|source| LoadError::Json {
            document: "config",
            source,
        })?;

        let keys = raw.terrain_keys.ok_or(LoadError::MissingField {
            document: "config",
            field: "terrainKeys",
        })?;
        let code = |role: TerrainRole| {
            keys.get(role.key())
                .copied()
                .map(TerrainCode)
                .ok_or(LoadError::MissingRole(role))
        };
        let legend = Legend::new(
            code(TerrainRole::Start)?,
            code(TerrainRole::Target)?,
            code(TerrainRole::Elevated)?,
            code(TerrainRole::Reachable)?,
        )?;

        let map_file = raw.map_file.ok_or(LoadError::MissingField {
            document: "config",
            field: "mapFile",
        })?;

        Ok(Self { map_file, legend })
    }
}
