use lockstep_core::Position;

use crate::traits::Heuristic;

/// Manhattan (L1) distance between two positions.
#[inline]
pub fn manhattan(a: Position, b: Position) -> i32 {
    (a.row - b.row).abs() + (a.col - b.col).abs()
}

/// The Manhattan heuristic. Admissible and consistent for 4-connected,
/// unit-cost movement.
#[derive(Debug, Clone, Copy, Default)]
pub struct Manhattan;

impl Heuristic for Manhattan {
    #[inline]
    fn estimate(&self, from: Position, to: Position) -> i32 {
        manhattan(from, to)
    }
}
