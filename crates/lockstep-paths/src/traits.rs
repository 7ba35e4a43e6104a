use lockstep_core::Position;

/// Answers whether a unit may stand on a position.
pub trait Traversable {
    /// `true` iff `p` is inside the grid and not an obstacle. Never fails.
    fn is_valid(&self, p: Position) -> bool;
}

impl<F: Fn(Position) -> bool> Traversable for F {
    fn is_valid(&self, p: Position) -> bool {
        self(p)
    }
}

/// Remaining-cost estimate used to order the open set.
pub trait Heuristic {
    /// Estimate of the cost from `from` to `to`.
    /// Must never overestimate the true cost (admissible).
    fn estimate(&self, from: Position, to: Position) -> i32;
}
