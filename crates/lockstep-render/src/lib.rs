//! Text rendering of a terrain grid with solved paths overlaid.
//!
//! Every cell is drawn as a glyph followed by a space:
//!
//! | Glyph | Cell |
//! |---|---|
//! | `S` | a unit's start |
//! | `T` | a unit's target |
//! | `P` | on a unit's path (tinted per unit in [`RenderStyle::Ansi`]) |
//! | `#` | elevated |
//! | `.` | reachable |
//! | `?` | any other code |

use std::fmt::Write as _;

use crossterm::style::{Color, Stylize};
use lockstep_core::{Legend, Path, Position, Roster, TerrainGrid, TerrainRole};
use lockstep_paths::Plan;

/// Whether path cells carry ANSI color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderStyle {
    /// Glyphs only.
    Plain,
    /// Path glyphs tinted by unit index.
    #[default]
    Ansi,
}

/// Path tints, cycled by unit index.
const PATH_COLORS: [Color; 6] = [
    Color::DarkRed,
    Color::DarkGreen,
    Color::DarkYellow,
    Color::DarkBlue,
    Color::DarkMagenta,
    Color::DarkCyan,
];

/// Render `grid` row by row, marking the roster's starts and targets and
/// overlaying `paths` (one per unit, in unit order).
///
/// Start and target markers win over path cells. When several paths cross
/// a cell, the highest unit index colors it.
pub fn render_map<'a>(
    grid: &TerrainGrid,
    legend: &Legend,
    roster: &Roster,
    paths: impl IntoIterator<Item = &'a Path>,
    style: RenderStyle,
) -> String {
    let paths: Vec<&Path> = paths.into_iter().collect();
    let mut out = String::with_capacity(grid.rows() * (grid.cols() * 2 + 1));

    for row in 0..grid.rows() as i32 {
        for col in 0..grid.cols() as i32 {
            let p = Position::new(row, col);
            let glyph = if roster.starts().contains(&p) {
                "S "
            } else if roster.targets().contains(&p) {
                "T "
            } else if let Some(unit) = paths.iter().rposition(|path| path.contains(p)) {
                match style {
                    RenderStyle::Plain => "P ",
                    RenderStyle::Ansi => {
                        let color = PATH_COLORS[unit % PATH_COLORS.len()];
                        let _ = write!(out, "{}", "P ".with(color));
                        continue;
                    }
                }
            } else {
                match grid.at(p).and_then(|code| legend.role_of(code)) {
                    Some(TerrainRole::Elevated) => "# ",
                    Some(TerrainRole::Reachable) => ". ",
                    Some(TerrainRole::Start) => "S ",
                    Some(TerrainRole::Target) => "T ",
                    None => "? ",
                }
            };
            out.push_str(glyph);
        }
        out.push('\n');
    }
    out
}

/// One line per unit listing its path, or noting that none was found.
pub fn render_report(plan: &Plan) -> String {
    let mut out = String::new();
    for (i, outcome) in plan.outcomes().iter().enumerate() {
        if outcome.path.is_empty() {
            let _ = writeln!(out, "No valid path found for unit {i}");
            continue;
        }
        let _ = write!(out, "Path for unit {i}:");
        for p in &outcome.path {
            let _ = write!(out, " {p}");
        }
        out.push('\n');
    }
    out
}
