//! Scenario loading: a JSON config naming a tile map and the terrain
//! legend, and the tile map itself.
//!
//! ```json
//! { "mapFile": "map.json",
//!   "terrainKeys": { "start": 0, "target": 8, "elevated": 3, "reachable": -1 } }
//! ```
//!
//! The map follows the Tiled JSON layout: the first tileset's `tilewidth`
//! and `tileheight` give the column and row counts, and the first layer's
//! `data` array holds the codes row-major. Start and target cells are
//! collected in scan order and paired into a [`Roster`](lockstep_core::Roster).

mod config;
mod error;
mod scenario;
mod tilemap;

pub use config::MapConfig;
pub use error::LoadError;
pub use scenario::{Scenario, load};

/// Config path used when none is given, relative to the working directory.
/// The sample scenario ships under `lockstep/data/`.
pub const DEFAULT_CONFIG_PATH: &str = "data/config.json";
