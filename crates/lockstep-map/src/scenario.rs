use std::fs;
use std::path::Path;

use lockstep_core::{Legend, Roster, TerrainGrid};

use crate::config::MapConfig;
use crate::error::LoadError;
use crate::tilemap::parse_grid;

/// Everything the router consumes: the grid, its legend and the paired units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    pub grid: TerrainGrid,
    pub legend: Legend,
    pub roster: Roster,
}

impl Scenario {
    /// Build a scenario from a grid and legend by scanning for start and
    /// target cells in row-major order.
    pub fn from_grid(grid: TerrainGrid, legend: Legend) -> Result<Self, LoadError> {
        let starts = grid.positions_of(legend.start());
        let targets = grid.positions_of(legend.target());
        for p in &starts {
            log::debug!("start position {p}");
        }
        for p in &targets {
            log::debug!("target position {p}");
        }
        if starts.len() != targets.len() {
            log::info!(
                "pairing {} start positions with {} target positions",
                starts.len(),
                targets.len()
            );
        }
        let roster = Roster::balanced(starts, targets)?;
        Ok(Self {
            grid,
            legend,
            roster,
        })
    }

    /// Parse a scenario from in-memory config and map documents. The
    /// config's `mapFile` entry is not consulted.
    pub fn from_json(config: &str, map: &str) -> Result<Self, LoadError> {
        let cfg = MapConfig::from_json(config)?;
        Self::from_grid(parse_grid(map)?, cfg.legend)
    }
}

/// Load the config at `config_path` and the map it names.
///
/// A relative `mapFile` is resolved against the config file's directory.
pub fn load(config_path: impl AsRef<Path>) -> Result<Scenario, LoadError> {
    let config_path = config_path.as_ref();
    log::info!("parsing config file {}", config_path.display());
    let cfg = MapConfig::from_json(&read(config_path)?)?;

    let map_path = match config_path.parent() {
        Some(dir) if cfg.map_file.is_relative() => dir.join(&cfg.map_file),
        _ => cfg.map_file.clone(),
    };
    log::info!("parsing map file {}", map_path.display());
    let grid = parse_grid(&read(&map_path)?)?;

    let scenario = Scenario::from_grid(grid, cfg.legend)?;
    log::info!(
        "map is parsed: {}x{} cells, {} units",
        scenario.grid.rows(),
        scenario.grid.cols(),
        scenario.roster.len()
    );
    Ok(scenario)
}

fn read(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use lockstep_core::{Position, RosterError, TerrainCode};
    use std::path::PathBuf;

    const CONFIG: &str = r#"{"mapFile": "test_map.json",
        "terrainKeys": {"start": 0, "target": 8, "elevated": 3, "reachable": -1}}"#;

    fn map_json(data: &str) -> String {
        format!(
            r#"{{"layers": [{{"name": "world", "data": {data}}}],
                 "tilesets": [{{"tilewidth": 4, "tileheight": 4}}]}}"#
        )
    }

    fn p(row: i32, col: i32) -> Position {
        Position::new(row, col)
    }

    /// Fresh scratch directory under the system temp dir.
    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("lockstep-map-{}-{name}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn single_unit_map() {
        let s = Scenario::from_json(
            CONFIG,
            &map_json("[0,-1,-1,-1,-1,-1,-1,-1,-1,-1,-1,-1,-1,-1,-1,8]"),
        )
        .unwrap();
        assert_eq!((s.grid.rows(), s.grid.cols()), (4, 4));
        assert_eq!(s.roster.start(0), Ok(p(0, 0)));
        assert_eq!(s.roster.target(0), Ok(p(3, 3)));
    }

    #[test]
    fn multiple_units_pair_in_scan_order() {
        let s = Scenario::from_json(
            CONFIG,
            &map_json("[0,-1,0,-1,-1,-1,-1,-1,-1,8,-1,-1,3,-1,8,3]"),
        )
        .unwrap();
        assert_eq!(s.roster.len(), 2);
        assert_eq!(s.roster.start(0), Ok(p(0, 0)));
        assert_eq!(s.roster.target(0), Ok(p(2, 1)));
        assert_eq!(s.roster.start(1), Ok(p(0, 2)));
        assert_eq!(s.roster.target(1), Ok(p(3, 2)));
    }

    #[test]
    fn fractional_map_codes() {
        let s = Scenario::from_json(
            CONFIG,
            &map_json("[0.4,-1.6,0.3,-1.3,-1.5,-1,-1,-1,-1,3.2,-1,-1,8.4,-1,-1,8.2]"),
        )
        .unwrap();
        assert_eq!(s.roster.starts(), &[p(0, 0), p(0, 2)]);
        assert_eq!(s.roster.targets(), &[p(3, 0), p(3, 3)]);
    }

    #[test]
    fn single_target_is_duplicated() {
        let s = Scenario::from_json(
            CONFIG,
            &map_json("[0,-1,0,-1,0,-1,-1,-1,-1,3,-1,-1,3,-1,-1,8]"),
        )
        .unwrap();
        assert_eq!(s.roster.starts(), &[p(0, 0), p(0, 2), p(1, 0)]);
        assert_eq!(s.roster.targets(), &[p(3, 3), p(3, 3), p(3, 3)]);
        assert_eq!(
            s.roster.start(3),
            Err(RosterError::IndexOutOfBounds { index: 3, len: 3 })
        );
    }

    #[test]
    fn custom_legend() {
        let config = r#"{"mapFile": "test_map.json",
            "terrainKeys": {"start": 4, "target": 6, "elevated": 0, "reachable": 8}}"#;
        let s = Scenario::from_json(config, &map_json("[4,8,0,0,8,8,8,8,8,8,8,8,0,8,8,6]"))
            .unwrap();
        assert_eq!(s.legend.elevated(), TerrainCode(0));
        assert_eq!(s.roster.start(0), Ok(p(0, 0)));
        assert_eq!(s.roster.target(0), Ok(p(3, 3)));
    }

    #[test]
    fn starts_without_targets_are_rejected() {
        let err = Scenario::from_json(CONFIG, &map_json("[0,-1,-1,-1,-1,-1,-1,-1,-1,-1,-1,-1,-1,-1,-1,-1]"))
            .unwrap_err();
        assert!(matches!(err, LoadError::Roster(RosterError::NoTargets { starts: 1 })));
    }

    #[test]
    fn load_resolves_map_next_to_config() {
        let dir = scratch("resolve");
        fs::write(dir.join("test_config.json"), CONFIG).unwrap();
        fs::write(
            dir.join("test_map.json"),
            map_json("[0,-1,-1,-1,-1,-1,-1,-1,-1,-1,-1,-1,-1,-1,-1,8]"),
        )
        .unwrap();

        let s = load(dir.join("test_config.json")).unwrap();
        assert_eq!(s.roster.len(), 1);
        assert_eq!(s.roster.target(0), Ok(p(3, 3)));
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn load_reports_missing_map_file() {
        let dir = scratch("missing");
        fs::write(
            dir.join("test_config.json"),
            CONFIG.replace("test_map.json", "badMapPath.json"),
        )
        .unwrap();

        let err = load(dir.join("test_config.json")).unwrap_err();
        match err {
            LoadError::Io { path, .. } => assert!(path.ends_with("badMapPath.json")),
            other => panic!("unexpected error: {other}"),
        }
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn sample_scenario_loads_from_binary_dir() {
        let dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../../lockstep");
        let s = load(dir.join(crate::DEFAULT_CONFIG_PATH)).unwrap();
        assert_eq!((s.grid.rows(), s.grid.cols()), (8, 8));
        assert_eq!(s.roster.len(), 3);
        assert_eq!(s.roster.start(0), Ok(p(0, 0)));
    }

    #[test]
    fn load_reports_missing_config() {
        let err = load("/nonexistent/lockstep/config.json").unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(std::error::Error::source(&err).is_some());
    }
}
