//! An immutable integer-code grid for terrain.
//!
//! [`TerrainCode`] is a newtype over `i32`; codes are opaque and only gain
//! meaning through a [`Legend`](crate::Legend). [`TerrainGrid`] stores them
//! row-major and is never mutated after construction.

use crate::geom::{Bounds, Position};
use std::fmt;

/// An opaque terrain code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TerrainCode(pub i32);

impl TerrainCode {
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    pub const fn value(self) -> i32 {
        self.0
    }
}

impl From<i32> for TerrainCode {
    fn from(v: i32) -> Self {
        Self(v)
    }
}

impl From<TerrainCode> for i32 {
    fn from(c: TerrainCode) -> Self {
        c.0
    }
}

/// A rectangular matrix of terrain codes.
///
/// Deserialization goes through [`TerrainGrid::from_flat`], so `cells`
/// always covers `bounds` exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawGrid"))]
pub struct TerrainGrid {
    cells: Vec<TerrainCode>,
    bounds: Bounds,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawGrid {
    cells: Vec<TerrainCode>,
    bounds: RawBounds,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawBounds {
    rows: usize,
    cols: usize,
}

#[cfg(feature = "serde")]
impl TryFrom<RawGrid> for TerrainGrid {
    type Error = GridError;

    fn try_from(raw: RawGrid) -> Result<Self, GridError> {
        Self::from_flat(raw.bounds.rows, raw.bounds.cols, raw.cells)
    }
}

/// Bounds for a `rows` x `cols` grid and its cell count, if both fit.
fn checked_bounds(rows: usize, cols: usize) -> Result<(Bounds, usize), GridError> {
    match (rows.checked_mul(cols), i32::try_from(rows), i32::try_from(cols)) {
        (Some(len), Ok(r), Ok(c)) => Ok((Bounds::new(r, c), len)),
        _ => Err(GridError::TooLarge { rows, cols }),
    }
}

impl TerrainGrid {
    /// Build a grid from nested rows. Every row must have the same length.
    pub fn from_rows(rows: Vec<Vec<TerrainCode>>) -> Result<Self, GridError> {
        let cols = rows.first().map_or(0, Vec::len);
        if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != cols) {
            return Err(GridError::Ragged {
                row,
                expected: cols,
                found: r.len(),
            });
        }
        let (bounds, _) = checked_bounds(rows.len(), cols)?;
        let cells = rows.into_iter().flatten().collect();
        Ok(Self { cells, bounds })
    }

    /// Build a grid from row-major data of exactly `rows * cols` codes.
    pub fn from_flat(rows: usize, cols: usize, data: Vec<TerrainCode>) -> Result<Self, GridError> {
        let (bounds, len) = checked_bounds(rows, cols)?;
        if data.len() != len {
            return Err(GridError::Length {
                expected: len,
                found: data.len(),
            });
        }
        Ok(Self {
            cells: data,
            bounds,
        })
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn rows(&self) -> usize {
        self.bounds.rows.max(0) as usize
    }

    pub fn cols(&self) -> usize {
        self.bounds.cols.max(0) as usize
    }

    pub fn contains(&self, p: Position) -> bool {
        self.bounds.contains(p)
    }

    /// Code at `p`, or `None` if out of bounds.
    pub fn at(&self, p: Position) -> Option<TerrainCode> {
        self.bounds.index(p).map(|i| self.cells[i])
    }

    /// Iterate over `(position, code)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, TerrainCode)> + '_ {
        self.bounds.iter().zip(self.cells.iter().copied())
    }

    /// All positions holding `code`, in row-major order.
    pub fn positions_of(&self, code: TerrainCode) -> Vec<Position> {
        self.iter()
            .filter(|&(_, c)| c == code)
            .map(|(p, _)| p)
            .collect()
    }

    /// Borrow one row of codes.
    pub fn row(&self, row: usize) -> Option<&[TerrainCode]> {
        let cols = self.cols();
        (row < self.rows()).then(|| &self.cells[row * cols..(row + 1) * cols])
    }
}

/// Errors raised when building a [`TerrainGrid`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// A row's length differs from the first row's.
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// Flat data does not cover the declared dimensions.
    Length { expected: usize, found: usize },
    /// A dimension does not fit a position coordinate, or the cell count
    /// overflows.
    TooLarge { rows: usize, cols: usize },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ragged {
                row,
                expected,
                found,
            } => write!(f, "grid row {row} has {found} cells, expected {expected}"),
            Self::Length { expected, found } => {
                write!(f, "grid data has {found} cells, expected {expected}")
            }
            Self::TooLarge { rows, cols } => write!(f, "grid of {rows}x{cols} cells is too large"),
        }
    }
}

impl std::error::Error for GridError {}
