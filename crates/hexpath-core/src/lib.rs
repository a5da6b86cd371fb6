//! **hexpath-core**: hex grid model for the *hexpath* pathfinding engine.
//!
//! This crate provides cube coordinates and directions, cell metrics and
//! layout, and the [`HexGrid`] adjacency graph that searches run over.

pub mod cell;
pub mod config;
pub mod geom;
pub mod grid;
pub mod metrics;

pub use cell::{Cell, CellId};
pub use config::GridConfig;
pub use geom::{CubeCoord, Direction, MAX_POSITION_COORD, WorldPos};
pub use grid::{GridError, HexGrid};
pub use metrics::{DEFAULT_OUTER_RADIUS, HexMetrics, INNER_RADIUS_FACTOR};
