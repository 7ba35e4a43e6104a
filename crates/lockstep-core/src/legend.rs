//! The terrain legend: which code plays which role.

use crate::grid::TerrainCode;
use std::fmt;

/// The four roles a terrain code can play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TerrainRole {
    Start,
    Target,
    Elevated,
    Reachable,
}

impl TerrainRole {
    /// All roles, in the order they are validated.
    pub const ALL: [TerrainRole; 4] = [
        TerrainRole::Start,
        TerrainRole::Target,
        TerrainRole::Elevated,
        TerrainRole::Reachable,
    ];

    /// Key naming this role in map configuration files.
    pub const fn key(self) -> &'static str {
        match self {
            TerrainRole::Start => "start",
            TerrainRole::Target => "target",
            TerrainRole::Elevated => "elevated",
            TerrainRole::Reachable => "reachable",
        }
    }
}

impl fmt::Display for TerrainRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Mapping from roles to pairwise-distinct terrain codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawLegend"))]
pub struct Legend {
    start: TerrainCode,
    target: TerrainCode,
    elevated: TerrainCode,
    reachable: TerrainCode,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawLegend {
    start: TerrainCode,
    target: TerrainCode,
    elevated: TerrainCode,
    reachable: TerrainCode,
}

#[cfg(feature = "serde")]
impl TryFrom<RawLegend> for Legend {
    type Error = LegendError;

    fn try_from(raw: RawLegend) -> Result<Self, LegendError> {
        Self::new(raw.start, raw.target, raw.elevated, raw.reachable)
    }
}

impl Legend {
    /// Build a legend, rejecting any code used for more than one role.
    pub fn new(
        start: TerrainCode,
        target: TerrainCode,
        elevated: TerrainCode,
        reachable: TerrainCode,
    ) -> Result<Self, LegendError> {
        let legend = Self {
            start,
            target,
            elevated,
            reachable,
        };
        let mut seen: Vec<TerrainCode> = Vec::with_capacity(4);
        for role in TerrainRole::ALL {
            let code = legend.code(role);
            if seen.contains(&code) {
                return Err(LegendError::DuplicateCode { role, code });
            }
            seen.push(code);
        }
        Ok(legend)
    }

    pub fn code(&self, role: TerrainRole) -> TerrainCode {
        match role {
            TerrainRole::Start => self.start,
            TerrainRole::Target => self.target,
            TerrainRole::Elevated => self.elevated,
            TerrainRole::Reachable => self.reachable,
        }
    }

    pub fn start(&self) -> TerrainCode {
        self.start
    }

    pub fn target(&self) -> TerrainCode {
        self.target
    }

    pub fn elevated(&self) -> TerrainCode {
        self.elevated
    }

    pub fn reachable(&self) -> TerrainCode {
        self.reachable
    }

    /// The role a code plays, if any.
    pub fn role_of(&self, code: TerrainCode) -> Option<TerrainRole> {
        TerrainRole::ALL.into_iter().find(|&r| self.code(r) == code)
    }
}

/// Errors raised when building a [`Legend`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LegendError {
    /// `code` was already assigned to an earlier role when `role` claimed it.
    DuplicateCode { role: TerrainRole, code: TerrainCode },
}

impl fmt::Display for LegendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateCode { role, code } => {
                write!(f, "duplicate terrain code {} for role {role}", code.0)
            }
        }
    }
}

impl std::error::Error for LegendError {}
