//! Routing for one or more units on a static, uniform-cost grid.
//!
//! Every unit runs its own A\* search (4-connected moves, Manhattan
//! heuristic). The [`StepCoordinator`] advances all searches in lockstep,
//! one node expansion per unit per round, and rejects neighbours that
//! coincide with another unit's currently recorded position.
//!
//! - **Single unit** shortest path without collision filtering ([`find_path`])
//! - **Multiple units** synchronized search ([`StepCoordinator`], [`plan`])
//!
//! # Trait seams
//!
//! | Trait | Used for |
//! |---|---|
//! | [`Traversable`] | position validity (bounds + obstacles) |
//! | [`Heuristic`] | remaining-cost estimate ([`Manhattan`]) |

mod coordinator;
mod distance;
mod model;
mod reconstruct;
mod search;
mod single;
mod traits;

pub use coordinator::{
    Plan, RoundReport, StepCoordinator, StepError, StepOutcome, UnitOutcome, UnitStatus,
};
pub use distance::{Manhattan, manhattan};
pub use model::GridModel;
pub use reconstruct::reconstruct;
pub use search::{NodeId, SearchNode, SearchState};
pub use single::find_path;
pub use traits::{Heuristic, Traversable};

use lockstep_core::Roster;

/// Solve every unit of `roster` on `model` with the round-robin coordinator.
pub fn plan<T: Traversable>(model: &T, roster: &Roster) -> Plan {
    StepCoordinator::new(model, roster).run()
}
