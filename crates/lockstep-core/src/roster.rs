//! Units and their start/target pairing.

use crate::geom::Position;
use std::fmt;

/// One mobile unit, identified by its index in the roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Unit {
    pub index: usize,
    pub start: Position,
    pub target: Position,
}

/// Ordered start positions paired one-to-one with target positions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawRoster"))]
pub struct Roster {
    starts: Vec<Position>,
    targets: Vec<Position>,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawRoster {
    starts: Vec<Position>,
    targets: Vec<Position>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawRoster> for Roster {
    type Error = RosterError;

    fn try_from(raw: RawRoster) -> Result<Self, RosterError> {
        Self::paired(raw.starts, raw.targets)
    }
}

impl Roster {
    /// Pair starts with targets.
    ///
    /// When targets are scarcer than starts the last target is repeated
    /// until the lists match; surplus targets are dropped. Starts without
    /// any target at all cannot be paired and are rejected.
    pub fn balanced(starts: Vec<Position>, mut targets: Vec<Position>) -> Result<Self, RosterError> {
        if starts.len() > targets.len() {
            let Some(&last) = targets.last() else {
                return Err(RosterError::NoTargets {
                    starts: starts.len(),
                });
            };
            targets.resize(starts.len(), last);
        } else {
            targets.truncate(starts.len());
        }
        Ok(Self { starts, targets })
    }

    /// Pair starts with targets exactly; the lists must have equal length.
    pub fn paired(starts: Vec<Position>, targets: Vec<Position>) -> Result<Self, RosterError> {
        if starts.len() != targets.len() {
            return Err(RosterError::Unpaired {
                starts: starts.len(),
                targets: targets.len(),
            });
        }
        Ok(Self { starts, targets })
    }

    pub fn len(&self) -> usize {
        self.starts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }

    /// Start position of unit `index`.
    pub fn start(&self, index: usize) -> Result<Position, RosterError> {
        self.starts
            .get(index)
            .copied()
            .ok_or(RosterError::IndexOutOfBounds {
                index,
                len: self.len(),
            })
    }

    /// Target position of unit `index`.
    pub fn target(&self, index: usize) -> Result<Position, RosterError> {
        self.targets
            .get(index)
            .copied()
            .ok_or(RosterError::IndexOutOfBounds {
                index,
                len: self.len(),
            })
    }

    pub fn starts(&self) -> &[Position] {
        &self.starts
    }

    pub fn targets(&self) -> &[Position] {
        &self.targets
    }

    /// Iterate over units in index order.
    pub fn iter(&self) -> impl Iterator<Item = Unit> + '_ {
        self.starts
            .iter()
            .zip(&self.targets)
            .enumerate()
            .map(|(index, (&start, &target))| Unit {
                index,
                start,
                target,
            })
    }
}

/// Errors raised by [`Roster`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterError {
    /// A unit index past the end of the roster was requested.
    IndexOutOfBounds { index: usize, len: usize },
    /// Start positions exist but no target does.
    NoTargets { starts: usize },
    /// Start and target lists of different lengths given for exact pairing.
    Unpaired { starts: usize, targets: usize },
}

impl fmt::Display for RosterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexOutOfBounds { index, len } => {
                write!(f, "unit index {index} out of bounds for {len} units")
            }
            Self::NoTargets { starts } => {
                write!(f, "{starts} start positions but no target position")
            }
            Self::Unpaired { starts, targets } => {
                write!(f, "{starts} start positions cannot pair with {targets} targets")
            }
        }
    }
}

impl std::error::Error for RosterError {}
