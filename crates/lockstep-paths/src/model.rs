use lockstep_core::{Legend, Position, TerrainCode, TerrainGrid};

use crate::traits::Traversable;

/// The terrain grid seen through its traversability predicate.
///
/// A position is valid when it is inside the grid on both axes and its code
/// is not the legend's elevated code. Grid well-formedness is assumed.
#[derive(Debug, Clone, Copy)]
pub struct GridModel<'g> {
    grid: &'g TerrainGrid,
    elevated: TerrainCode,
}

impl<'g> GridModel<'g> {
    pub fn new(grid: &'g TerrainGrid, legend: &Legend) -> Self {
        Self::with_elevated(grid, legend.elevated())
    }

    /// Model treating only `elevated` as an obstacle.
    pub fn with_elevated(grid: &'g TerrainGrid, elevated: TerrainCode) -> Self {
        Self { grid, elevated }
    }

    pub fn grid(&self) -> &'g TerrainGrid {
        self.grid
    }
}

impl Traversable for GridModel<'_> {
    #[inline]
    fn is_valid(&self, p: Position) -> bool {
        self.grid.at(p).is_some_and(|code| code != self.elevated)
    }
}
