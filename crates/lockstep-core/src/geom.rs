//! Geometry primitives: [`Position`] and [`Bounds`].
//!
//! Positions are addressed as (row, column), matching the row-major layout
//! of terrain maps. There is deliberately no ordering on [`Position`].

use std::fmt;

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// A grid cell address. Rows grow downward, columns grow right.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    /// Create a new position.
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Return a position shifted by (drow, dcol).
    #[inline]
    pub const fn shift(self, drow: i32, dcol: i32) -> Self {
        Self {
            row: self.row + drow,
            col: self.col + dcol,
        }
    }

    /// The four 4-connected neighbours, in expansion order: down, up,
    /// right, left.
    #[inline]
    pub const fn neighbors_4(self) -> [Position; 4] {
        [
            self.shift(1, 0),
            self.shift(-1, 0),
            self.shift(0, 1),
            self.shift(0, -1),
        ]
    }

    /// Whether `other` is exactly one 4-connected step away.
    #[inline]
    pub fn is_adjacent(self, other: Position) -> bool {
        (self.row - other.row).abs() + (self.col - other.col).abs() == 1
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(i32, i32)> for Position {
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}

// ---------------------------------------------------------------------------
// Bounds
// ---------------------------------------------------------------------------

/// The extent of a grid anchored at (0, 0): rows `[0, rows)` and columns
/// `[0, cols)`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub rows: i32,
    pub cols: i32,
}

impl Bounds {
    #[inline]
    pub const fn new(rows: i32, cols: i32) -> Self {
        Self { rows, cols }
    }

    /// Number of cells covered.
    #[inline]
    pub fn len(self) -> usize {
        if self.is_empty() {
            0
        } else {
            self.rows as usize * self.cols as usize
        }
    }

    /// Whether the bounds cover no cell.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.rows <= 0 || self.cols <= 0
    }

    /// Whether the position lies inside on both axes.
    #[inline]
    pub fn contains(self, p: Position) -> bool {
        p.row >= 0 && p.row < self.rows && p.col >= 0 && p.col < self.cols
    }

    /// Iterate over all positions in row-major order.
    pub fn iter(self) -> BoundsIter {
        BoundsIter {
            bounds: self,
            next: Position::new(0, 0),
        }
    }

    /// Row-major flat index of `p`, or `None` when out of bounds.
    #[inline]
    pub fn index(self, p: Position) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        Some(p.row as usize * self.cols as usize + p.col as usize)
    }
}

/// Row-major iterator over a [`Bounds`].
pub struct BoundsIter {
    bounds: Bounds,
    next: Position,
}

impl Iterator for BoundsIter {
    type Item = Position;

    fn next(&mut self) -> Option<Position> {
        if self.bounds.is_empty() || self.next.row >= self.bounds.rows {
            return None;
        }
        let p = self.next;
        self.next.col += 1;
        if self.next.col >= self.bounds.cols {
            self.next.col = 0;
            self.next.row += 1;
        }
        Some(p)
    }
}
