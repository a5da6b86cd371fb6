//! Shared setup for the hexpath demos.
//!
//! Demonstrates: loading a JSON config, scattering seeded random obstacles
//! over a hex grid, and comparing every search strategy on the same set of
//! requests.

use std::time::Duration;

use hexpath_core::{GridConfig, GridError, HexGrid, WorldPos};
use hexpath_paths::{Pathfinder, Strategy};
use hexpath_requests::ManagerConfig;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Everything a demo run needs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub grid: GridConfig,
    pub manager: ManagerConfig,
    /// Chance that any cell is an obstacle.
    pub obstacle_density: f64,
    /// Number of random start/end pairs to route.
    pub requests: usize,
    pub seed: u64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::new(40, 30),
            manager: ManagerConfig::default(),
            obstacle_density: 0.25,
            requests: 20,
            seed: 42,
        }
    }
}

#[derive(Debug, Error)]
pub enum DemoError {
    #[error("cannot read config {path}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("obstacle density {0} is outside 0..=1")]
    Density(f64),
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Read a config from a JSON file, or use the defaults when no path is given.
pub fn load_config(path: Option<&str>) -> Result<DemoConfig, DemoError> {
    let Some(path) = path else {
        return Ok(DemoConfig::default());
    };
    let text = std::fs::read_to_string(path).map_err(|source| DemoError::Read {
        path: path.to_owned(),
        source,
    })?;
    parse_config(&text).map_err(|source| DemoError::Parse {
        path: path.to_owned(),
        source,
    })
}

pub fn parse_config(text: &str) -> Result<DemoConfig, serde_json::Error> {
    serde_json::from_str(text)
}

/// Build a grid where each cell is an obstacle with probability
/// `obstacle_density`, drawn from `rng`.
pub fn scatter_obstacles(
    config: &GridConfig,
    obstacle_density: f64,
    rng: &mut StdRng,
) -> Result<HexGrid, DemoError> {
    if !(0.0..=1.0).contains(&obstacle_density) {
        return Err(DemoError::Density(obstacle_density));
    }
    let grid = HexGrid::new(config, |_| !rng.random_bool(obstacle_density))?;
    Ok(grid)
}

/// Pick `count` start/end pairs among walkable cells.
pub fn random_endpoints(grid: &HexGrid, count: usize, rng: &mut StdRng) -> Vec<(WorldPos, WorldPos)> {
    let walkable: Vec<WorldPos> = grid
        .iter()
        .filter(|(_, c)| c.is_walkable())
        .map(|(_, c)| c.position())
        .collect();
    if walkable.is_empty() {
        return Vec::new();
    }
    (0..count)
        .map(|_| {
            let a = walkable[rng.random_range(0..walkable.len())];
            let b = walkable[rng.random_range(0..walkable.len())];
            (a, b)
        })
        .collect()
}

/// The grid and requests described by a config.
pub fn build_scenario(config: &DemoConfig) -> Result<(HexGrid, Vec<(WorldPos, WorldPos)>), DemoError> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let grid = scatter_obstacles(&config.grid, config.obstacle_density, &mut rng)?;
    let pairs = random_endpoints(&grid, config.requests, &mut rng);
    Ok((grid, pairs))
}

/// Totals for one strategy over a batch of requests.
#[derive(Clone, Debug, PartialEq)]
pub struct StrategyReport {
    pub strategy: Strategy,
    pub found: usize,
    pub failed: usize,
    pub total_moves: usize,
    pub expanded: usize,
    pub elapsed: Duration,
}

/// Route every pair with every strategy.
pub fn compare_strategies(grid: &HexGrid, pairs: &[(WorldPos, WorldPos)]) -> Vec<StrategyReport> {
    Strategy::ALL
        .into_iter()
        .map(|strategy| {
            let mut finder = Pathfinder::new(strategy);
            let mut report = StrategyReport {
                strategy,
                found: 0,
                failed: 0,
                total_moves: 0,
                expanded: 0,
                elapsed: Duration::ZERO,
            };
            for &(start, end) in pairs {
                match finder.find_path(grid, start, end) {
                    Ok(outcome) => {
                        if outcome.success {
                            report.found += 1;
                            report.total_moves += outcome.path.moves();
                        } else {
                            report.failed += 1;
                        }
                        report.expanded += outcome.stats.expanded;
                        report.elapsed += outcome.stats.elapsed;
                    }
                    Err(err) => {
                        log::warn!("{strategy}: {err}");
                        report.failed += 1;
                    }
                }
            }
            report
        })
        .collect()
}
