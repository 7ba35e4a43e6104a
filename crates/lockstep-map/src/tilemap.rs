use lockstep_core::{GridError, TerrainCode, TerrainGrid};
use serde::Deserialize;

use crate::error::LoadError;

#[derive(Deserialize)]
struct RawMap {
    #[serde(default)]
    tilesets: Vec<RawTileset>,
    #[serde(default)]
    layers: Vec<RawLayer>,
}

#[derive(Deserialize)]
struct RawTileset {
    tilewidth: usize,
    tileheight: usize,
}

#[derive(Deserialize)]
struct RawLayer {
    data: Option<Vec<f64>>,
}

const DOCUMENT: &str = "map";

/// Parse a Tiled-style map document into a terrain grid.
///
/// Fractional codes are truncated toward zero. Data beyond `rows * cols`
/// cells is ignored.
pub(crate) fn parse_grid(json: &str) -> Result<TerrainGrid, LoadError> {
    let raw: RawMap = serde_json::from_str(json).map_err(|source| LoadError::Json {
        document: DOCUMENT,
        source,
    })?;

    let tileset = raw.tilesets.first().ok_or(LoadError::MissingField {
        document: DOCUMENT,
        field: "tilesets",
    })?;
    let (cols, rows) = (tileset.tilewidth, tileset.tileheight);

    let layer = raw.layers.first().ok_or(LoadError::MissingField {
        document: DOCUMENT,
        field: "layers",
    })?;
    let data = layer.data.as_ref().ok_or(LoadError::MissingField {
        document: DOCUMENT,
        field: "data",
    })?;

    let cells = rows
        .checked_mul(cols)
        .ok_or(GridError::TooLarge { rows, cols })?;
    if data.len() > cells {
        log::debug!("ignoring {} cells past {rows}x{cols}", data.len() - cells);
    }
    let codes = data
        .iter()
        .take(cells)
        .map(|&v| TerrainCode(v as i32))
        .collect();
    Ok(TerrainGrid::from_flat(rows, cols, codes)?)
}
