//! Synchronized round-robin search across all units.
//!
//! Each round visits units in index order and gives every unit still
//! searching exactly one node expansion. A neighbour is rejected when it
//! equals another unit's recorded position in the shared position array.
//! Unit `i` writes its slot right after expanding, so within one round it
//! sees fresh positions for units `< i` and last round's positions for
//! units `> i`. This is point-in-time avoidance only: units may still cross
//! or swap cells between rounds.

use std::fmt;

use lockstep_core::{Path, Position, Roster, RosterError, Unit};

use crate::distance::Manhattan;
use crate::search::SearchState;
use crate::traits::Traversable;

/// Lifecycle of one unit's search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnitStatus {
    /// Still has open nodes and has not popped its target.
    Searching,
    /// Popped its target; the path is final.
    Reached,
    /// Ran out of open nodes; the path stays empty for good.
    Exhausted,
}

/// What happened to one unit during one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Not searching any more; nothing done.
    Skipped,
    /// Popped its target this round.
    Reached,
    /// Found nothing left to pop this round.
    Exhausted,
    /// Expanded one node, inserting or improving `relaxed` neighbours.
    Expanded { relaxed: usize },
}

/// Summary of one round.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundReport {
    /// 1-based round number.
    pub round: usize,
    /// Units that expanded a node.
    pub expanded: usize,
    /// Units that reached their target this round.
    pub reached: Vec<usize>,
    /// Units whose search ran dry this round.
    pub exhausted: Vec<usize>,
}

struct UnitTrack {
    unit: Unit,
    search: SearchState,
    status: UnitStatus,
    path: Path,
}

/// Drives one [`SearchState`] per unit through synchronized rounds.
pub struct StepCoordinator<'m, T: Traversable + ?Sized> {
    model: &'m T,
    units: Vec<UnitTrack>,
    rounds: usize,
}

impl<'m, T: Traversable + ?Sized> StepCoordinator<'m, T> {
    /// Seed a search for every unit of `roster`.
    pub fn new(model: &'m T, roster: &Roster) -> Self {
        let units = roster
            .iter()
            .map(|unit| UnitTrack {
                unit,
                search: SearchState::new(unit.start, unit.target, &Manhattan),
                status: UnitStatus::Searching,
                path: Path::empty(),
            })
            .collect();
        Self {
            model,
            units,
            rounds: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Position array to feed the first round: every unit at its start.
    pub fn initial_positions(&self) -> Vec<Position> {
        self.units.iter().map(|t| t.unit.start).collect()
    }

    /// Rounds run so far.
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    pub fn status(&self, index: usize) -> Option<UnitStatus> {
        self.units.get(index).map(|t| t.status)
    }

    pub fn search(&self, index: usize) -> Option<&SearchState> {
        self.units.get(index).map(|t| &t.search)
    }

    /// Whether another round can make progress.
    ///
    /// Exhausted units count as done, same as reached ones.
    pub fn is_active(&self) -> bool {
        self.units.iter().any(|t| t.status == UnitStatus::Searching)
    }

    /// Run one round, reading and updating `positions` in unit order.
    ///
    /// `positions` needs a slot for every unit; extra slots are read as
    /// occupied cells but never written.
    pub fn round(&mut self, positions: &mut [Position]) -> Result<RoundReport, StepError> {
        self.check_slots(positions)?;
        Ok(self.advance(positions))
    }

    fn check_slots(&self, positions: &[Position]) -> Result<(), StepError> {
        if positions.len() < self.units.len() {
            return Err(StepError::MissingSlots {
                slots: positions.len(),
                units: self.units.len(),
            });
        }
        Ok(())
    }

    fn advance(&mut self, positions: &mut [Position]) -> RoundReport {
        self.rounds += 1;
        let mut report = RoundReport {
            round: self.rounds,
            ..RoundReport::default()
        };
        for i in 0..self.units.len() {
            match self.step_unit(i, positions) {
                StepOutcome::Skipped => {}
                StepOutcome::Reached => report.reached.push(i),
                StepOutcome::Exhausted => report.exhausted.push(i),
                StepOutcome::Expanded { .. } => {
                    report.expanded += 1;
                    if self.units[i].status == UnitStatus::Exhausted {
                        report.exhausted.push(i);
                    }
                }
            }
        }
        log::debug!(
            "round {}: {} expanded, {} reached, {} exhausted",
            report.round,
            report.expanded,
            report.reached.len(),
            report.exhausted.len()
        );
        report
    }

    /// Advance unit `index` by one expansion against `positions`.
    fn step_unit(&mut self, index: usize, positions: &mut [Position]) -> StepOutcome {
        let model = self.model;
        let track = &mut self.units[index];
        if track.status != UnitStatus::Searching {
            return StepOutcome::Skipped;
        }

        let Some(id) = track.search.pop() else {
            track.status = UnitStatus::Exhausted;
            log::warn!(
                "unit {index} cannot reach its target {}",
                track.unit.target
            );
            return StepOutcome::Exhausted;
        };

        let current = track.search.node(id).pos;
        if current == track.unit.target {
            track.path = track.search.path_to(id);
            track.status = UnitStatus::Reached;
            log::info!(
                "unit {index} has reached its target {} in {} steps",
                track.unit.target,
                track.path.cost()
            );
            return StepOutcome::Reached;
        }

        let snapshot: &[Position] = positions;
        let relaxed = track.search.expand(id, model, &Manhattan, |p| {
            snapshot
                .iter()
                .enumerate()
                .any(|(other, &q)| other != index && q == p)
        });
        positions[index] = current;

        if track.search.is_open_empty() {
            track.status = UnitStatus::Exhausted;
            log::warn!(
                "unit {index} cannot reach its target {}",
                track.unit.target
            );
        }
        StepOutcome::Expanded { relaxed }
    }

    /// Run rounds from the start positions until no unit is searching.
    pub fn run(self) -> Plan {
        let positions = self.initial_positions();
        self.settle(positions)
    }

    /// Run rounds against `positions` until no unit is searching.
    pub fn run_from(self, positions: Vec<Position>) -> Result<Plan, StepError> {
        self.check_slots(&positions)?;
        Ok(self.settle(positions))
    }

    fn settle(mut self, mut positions: Vec<Position>) -> Plan {
        while self.is_active() {
            self.advance(&mut positions);
        }
        log::debug!("all units settled after {} rounds", self.rounds);
        self.into_plan()
    }

    /// Freeze the current state into a [`Plan`]. Units still searching keep
    /// an empty path.
    pub fn into_plan(self) -> Plan {
        let outcomes = self
            .units
            .into_iter()
            .map(|t| UnitOutcome {
                expansions: t.search.expansions(),
                unit: t.unit,
                status: t.status,
                path: t.path,
            })
            .collect();
        Plan {
            outcomes,
            rounds: self.rounds,
        }
    }
}

/// Errors raised when driving rounds by hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepError {
    /// The position array has fewer slots than there are units.
    MissingSlots { slots: usize, units: usize },
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSlots { slots, units } => {
                write!(f, "position array holds {slots} slots for {units} units")
            }
        }
    }
}

impl std::error::Error for StepError {}

/// Final state of one unit.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitOutcome {
    pub unit: Unit,
    pub status: UnitStatus,
    /// Start-to-target route; empty unless `status` is `Reached`.
    pub path: Path,
    /// Nodes this unit moved into its closed set.
    pub expansions: usize,
}

/// Result of a multi-unit run: one outcome per unit, in unit order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Plan {
    outcomes: Vec<UnitOutcome>,
    rounds: usize,
}

impl Plan {
    pub fn outcomes(&self) -> &[UnitOutcome] {
        &self.outcomes
    }

    /// Rounds the coordinator ran.
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Path of unit `index`, possibly empty.
    pub fn path(&self, index: usize) -> Result<&Path, RosterError> {
        self.outcomes
            .get(index)
            .map(|o| &o.path)
            .ok_or(RosterError::IndexOutOfBounds {
                index,
                len: self.outcomes.len(),
            })
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> + '_ {
        self.outcomes.iter().map(|o| &o.path)
    }

    pub fn into_paths(self) -> Vec<Path> {
        self.outcomes.into_iter().map(|o| o.path).collect()
    }

    pub fn all_reached(&self) -> bool {
        self.outcomes
            .iter()
            .all(|o| o.status == UnitStatus::Reached)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GridModel;
    use lockstep_core::{TerrainCode, TerrainGrid};

    const ELEVATED: TerrainCode = TerrainCode(3);

    fn p(row: i32, col: i32) -> Position {
        Position::new(row, col)
    }

    fn grid(rows: &[&str]) -> TerrainGrid {
        let rows = rows
            .iter()
            .map(|r| {
                r.chars()
                    .map(|c| if c == '#' { ELEVATED } else { TerrainCode(-1) })
                    .collect()
            })
            .collect();
        TerrainGrid::from_rows(rows).unwrap()
    }

    fn roster(pairs: &[(Position, Position)]) -> Roster {
        Roster::balanced(
            pairs.iter().map(|&(s, _)| s).collect(),
            pairs.iter().map(|&(_, t)| t).collect(),
        )
        .unwrap()
    }

    fn assert_round_trip(plan: &Plan) {
        for o in plan.outcomes() {
            if o.path.is_empty() {
                continue;
            }
            assert_eq!(o.path.start(), Some(o.unit.start));
            assert_eq!(o.path.target(), Some(o.unit.target));
            assert!(o.path.is_contiguous(), "unit {} path jumps", o.unit.index);
        }
    }

    #[test]
    fn single_unit_on_open_4x4() {
        let g = grid(&["....", "....", "....", "...."]);
        let model = GridModel::with_elevated(&g, ELEVATED);
        let plan = crate::plan(&model, &roster(&[(p(0, 0), p(3, 3))]));
        let path = plan.path(0).unwrap();
        assert_eq!(path.len(), 7);
        assert_eq!(path.cost(), 6);
        assert!(plan.all_reached());
        assert_round_trip(&plan);
    }

    #[test]
    fn unreachable_unit_does_not_livelock() {
        // Unit 0 is sealed in the left pocket; unit 1 arrives quickly.
        let g = grid(&[
            "..#..", //
            "..#..",
            "..#..",
            "..#..",
            "..#..",
        ]);
        let model = GridModel::with_elevated(&g, ELEVATED);
        let plan = crate::plan(&model, &roster(&[(p(0, 0), p(0, 4)), (p(4, 3), p(4, 4))]));

        assert_eq!(plan.outcomes()[0].status, UnitStatus::Exhausted);
        assert!(plan.path(0).unwrap().is_empty());
        assert_eq!(plan.outcomes()[0].expansions, 10);
        assert_eq!(plan.outcomes()[1].status, UnitStatus::Reached);
        assert_eq!(plan.path(1).unwrap().positions(), &[p(4, 3), p(4, 4)]);
        // One round per pocket cell, plus the round that observes it empty.
        assert!(plan.rounds() <= 11, "ran {} rounds", plan.rounds());
        assert_round_trip(&plan);
    }

    #[test]
    fn fully_blocked_unit_exhausts_in_first_round() {
        let g = grid(&[".#..", "##..", "....", "...."]);
        let model = GridModel::with_elevated(&g, ELEVATED);
        let mut c = StepCoordinator::new(&model, &roster(&[(p(0, 0), p(3, 3)), (p(2, 0), p(3, 3))]));
        let mut positions = c.initial_positions();
        let report = c.round(&mut positions).unwrap();
        assert_eq!(report.exhausted, vec![0]);
        assert_eq!(report.expanded, 2);
        assert_eq!(c.status(0), Some(UnitStatus::Exhausted));
        assert!(c.is_active());

        let plan = c.run_from(positions).unwrap();
        assert!(plan.path(0).unwrap().is_empty());
        assert_eq!(plan.path(1).unwrap().cost(), 4);
    }

    #[test]
    fn later_unit_sees_fresh_positions_earlier_sees_stale() {
        let g = grid(&["...", "..."]);
        let model = GridModel::with_elevated(&g, ELEVATED);
        let mut c = StepCoordinator::new(&model, &roster(&[(p(0, 0), p(1, 2)), (p(0, 1), p(1, 1))]));

        // Slot 0 holds a stale value that unit 0 overwrites before unit 1
        // reads it; slot 1 holds a stale value that unit 0 reads as-is.
        let mut positions = vec![p(5, 5), p(1, 0)];
        c.round(&mut positions).unwrap();

        let s0 = c.search(0).unwrap();
        assert!(!s0.is_discovered(p(1, 0)), "unit 0 must read slot 1 as recorded");
        assert!(s0.is_discovered(p(0, 1)));

        let s1 = c.search(1).unwrap();
        assert!(!s1.is_discovered(p(0, 0)), "unit 1 must read unit 0's fresh slot");
        assert!(s1.is_discovered(p(1, 1)));
        assert!(s1.is_discovered(p(0, 2)));

        assert_eq!(positions, vec![p(0, 0), p(0, 1)]);
    }

    #[test]
    fn reached_unit_keeps_last_expanded_position() {
        let g = grid(&["...."]);
        let model = GridModel::with_elevated(&g, ELEVATED);
        let mut c = StepCoordinator::new(&model, &roster(&[(p(0, 0), p(0, 1))]));
        let mut positions = c.initial_positions();

        assert_eq!(c.round(&mut positions).unwrap().expanded, 1);
        let report = c.round(&mut positions).unwrap();
        assert_eq!(report.reached, vec![0]);
        assert_eq!(positions, vec![p(0, 0)]);
        assert!(!c.is_active());
    }

    #[test]
    fn short_position_array_is_an_error() {
        let g = grid(&["...", "..."]);
        let model = GridModel::with_elevated(&g, ELEVATED);
        let mut c = StepCoordinator::new(&model, &roster(&[(p(0, 0), p(1, 2)), (p(0, 1), p(1, 1))]));
        let err = StepError::MissingSlots { slots: 1, units: 2 };

        assert_eq!(c.round(&mut [p(0, 0)]), Err(err.clone()));
        assert_eq!(c.rounds(), 0);
        assert_eq!(c.search(0).unwrap().expansions(), 0);
        assert_eq!(err.to_string(), "position array holds 1 slots for 2 units");
        assert_eq!(c.run_from(vec![p(0, 0)]), Err(err));
    }

    #[test]
    fn parked_units_can_seal_a_shared_target() {
        // Three starts share one duplicated target. A unit that arrives keeps
        // its last expanded cell recorded, so the first two arrivals close
        // off the approaches for unit 0. The run must still terminate.
        let g = grid(&["....", "....", ".#..", "#..."]);
        let model = GridModel::with_elevated(&g, ELEVATED);
        let r = Roster::balanced(vec![p(0, 0), p(0, 2), p(1, 0)], vec![p(3, 3)]).unwrap();
        let plan = crate::plan(&model, &r);

        let statuses: Vec<_> = plan.outcomes().iter().map(|o| o.status).collect();
        assert_eq!(
            statuses,
            vec![UnitStatus::Exhausted, UnitStatus::Reached, UnitStatus::Reached]
        );
        assert!(plan.path(0).unwrap().is_empty());
        assert_eq!(plan.path(1).unwrap().cost(), 4);
        assert_eq!(plan.path(2).unwrap().cost(), 5);
        assert_round_trip(&plan);
    }

    #[test]
    fn empty_roster_finishes_immediately() {
        let g = grid(&[".."]);
        let model = GridModel::with_elevated(&g, ELEVATED);
        let plan = crate::plan(&model, &Roster::default());
        assert!(plan.is_empty());
        assert_eq!(plan.rounds(), 0);
        assert_eq!(
            plan.path(0),
            Err(RosterError::IndexOutOfBounds { index: 0, len: 0 })
        );
    }

    #[test]
    fn runs_are_deterministic() {
        let g = grid(&["......", "..#...", "..#...", "......"]);
        let model = GridModel::with_elevated(&g, ELEVATED);
        let r = roster(&[(p(0, 0), p(3, 5)), (p(3, 0), p(0, 5)), (p(1, 1), p(2, 4))]);
        let plan = crate::plan(&model, &r);
        assert!(plan.all_reached());
        assert_round_trip(&plan);
        assert_eq!(plan.path(0).unwrap().cost(), 8);
        assert_eq!(plan.path(1).unwrap().cost(), 8);
        assert_eq!(plan.path(2).unwrap().cost(), 6);
        assert_eq!(plan, crate::plan(&model, &r));
    }
}
