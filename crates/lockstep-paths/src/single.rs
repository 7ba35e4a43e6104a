use lockstep_core::{Path, Position};

use crate::distance::Manhattan;
use crate::search::SearchState;
use crate::traits::Traversable;

/// Compute a shortest 4-connected path from `from` to `to` for a lone unit.
///
/// No collision filtering is applied. Returns the full path (including both
/// endpoints), or an empty path if `to` cannot be reached.
pub fn find_path<T: Traversable + ?Sized>(model: &T, from: Position, to: Position) -> Path {
    let mut search = SearchState::new(from, to, &Manhattan);
    while let Some(id) = search.pop() {
        if search.node(id).pos == to {
            return search.path_to(id);
        }
        search.expand(id, model, &Manhattan, |_| false);
    }
    Path::empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GridModel;
    use lockstep_core::{TerrainCode, TerrainGrid};

    const ELEVATED: TerrainCode = TerrainCode(3);

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

    #[test]
    fn open_4x4_corner_to_corner() {
        let g = grid(&["....", "....", "....", "...."]);
        let model = GridModel::with_elevated(&g, ELEVATED);
        let path = find_path(&model, Position::new(0, 0), Position::new(3, 3));
        assert_eq!(path.len(), 7);
        assert_eq!(path.cost(), 6);
        assert!(path.is_contiguous());
        // Ties go to smaller h, then earlier insertion: down before right.
        assert_eq!(
            path.positions(),
            &[
                Position::new(0, 0),
                Position::new(1, 0),
                Position::new(2, 0),
                Position::new(3, 0),
                Position::new(3, 1),
                Position::new(3, 2),
                Position::new(3, 3),
            ]
        );
    }

    #[test]
    fn detours_around_walls_optimally() {
        let g = grid(&[
            ".#...", //
            ".#.#.",
            ".#.#.",
            "...#.",
        ]);
        let model = GridModel::with_elevated(&g, ELEVATED);
        let path = find_path(&model, Position::new(0, 0), Position::new(3, 4));
        assert_eq!(path.cost(), 13);
        assert_eq!(path.start(), Some(Position::new(0, 0)));
        assert_eq!(path.target(), Some(Position::new(3, 4)));
        assert!(path.is_contiguous());
        assert!(path.positions().iter().all(|&p| model.is_valid(p)));
    }

    #[test]
    fn walled_off_target_gives_empty_path() {
        let g = grid(&[".###", "####", "####", "###."]);
        let model = GridModel::with_elevated(&g, ELEVATED);
        assert!(find_path(&model, Position::new(0, 0), Position::new(3, 3)).is_empty());
    }

    #[test]
    fn start_equals_target() {
        let g = grid(&["..", ".."]);
        let model = GridModel::with_elevated(&g, ELEVATED);
        let path = find_path(&model, Position::new(1, 1), Position::new(1, 1));
        assert_eq!(path.positions(), &[Position::new(1, 1)]);
        assert_eq!(path.cost(), 0);
    }
}
