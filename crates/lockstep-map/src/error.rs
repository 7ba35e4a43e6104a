use std::fmt;
use std::io;
use std::path::PathBuf;

use lockstep_core::{GridError, LegendError, RosterError, TerrainRole};

/// Errors raised while loading a scenario.
#[derive(Debug)]
pub enum LoadError {
    /// A file could not be read.
    Io { path: PathBuf, source: io::Error },
    /// A document is not valid JSON or has the wrong shape.
    Json {
        document: &'static str,
        source: serde_json::Error,
    },
    /// A required field is absent or empty.
    MissingField {
        document: &'static str,
        field: &'static str,
    },
    /// The legend lacks one of the four roles.
    MissingRole(TerrainRole),
    /// Two roles share a terrain code.
    Legend(LegendError),
    /// The tile data does not fill the declared dimensions.
    Grid(GridError),
    /// Start and target cells cannot be paired.
    Roster(RosterError),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "cannot read {}: {source}", path.display()),
            Self::Json { document, source } => write!(f, "invalid {document} JSON: {source}"),
            Self::MissingField { document, field } => {
                write!(f, "{document} is missing required field `{field}`")
            }
            Self::MissingRole(role) => write!(f, "missing required terrain key: {role}"),
            Self::Legend(e) => write!(f, "{e}"),
            Self::Grid(e) => write!(f, "{e}"),
            Self::Roster(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::Legend(e) => Some(e),
            Self::Grid(e) => Some(e),
            Self::Roster(e) => Some(e),
            Self::MissingField { .. } | Self::MissingRole(_) => None,
        }
    }
}

impl From<LegendError> for LoadError {
    fn from(e: LegendError) -> Self {
        Self::Legend(e)
    }
}

impl From<GridError> for LoadError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

impl From<RosterError> for LoadError {
    fn from(e: RosterError) -> Self {
        Self::Roster(e)
    }
}
