//! **lockstep-core** — value types shared by the lockstep routing crates.
//!
//! This crate provides the grid-side vocabulary used by the search engine,
//! the map loader and the renderer: positions and bounds, the immutable
//! terrain grid, the terrain legend, the unit roster and solved paths.

pub mod geom;
pub mod grid;
pub mod legend;
pub mod path;
pub mod roster;

pub use geom::{Bounds, Position};
pub use grid::{GridError, TerrainCode, TerrainGrid};
pub use legend::{Legend, LegendError, TerrainRole};
pub use path::Path;
pub use roster::{Roster, RosterError, Unit};
