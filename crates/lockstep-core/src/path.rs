//! Solved unit paths.

use crate::geom::Position;

/// An ordered route from start to target, both inclusive.
///
/// An empty path means the unit's target could not be reached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Path(Vec<Position>);

impl Path {
    /// The empty (unreachable) path.
    pub const fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of positions, endpoints included.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Number of unit-cost steps taken.
    pub fn cost(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    pub fn start(&self) -> Option<Position> {
        self.0.first().copied()
    }

    pub fn target(&self) -> Option<Position> {
        self.0.last().copied()
    }

    pub fn positions(&self) -> &[Position] {
        &self.0
    }

    pub fn contains(&self, p: Position) -> bool {
        self.0.contains(&p)
    }

    /// Whether every consecutive pair is one 4-connected step apart.
    pub fn is_contiguous(&self) -> bool {
        self.0.windows(2).all(|w| w[0].is_adjacent(w[1]))
    }

    pub fn into_positions(self) -> Vec<Position> {
        self.0
    }
}

impl From<Vec<Position>> for Path {
    fn from(v: Vec<Position>) -> Self {
        Self(v)
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Position;
    type IntoIter = std::slice::Iter<'a, Position>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
