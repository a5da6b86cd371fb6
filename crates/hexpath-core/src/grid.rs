//! The [`HexGrid`] type: a fixed rectangle of hex cells with a prebuilt
//! adjacency graph.
//!
//! Cells are laid out row by row in offset coordinates (column `x`, row
//! `z`), odd rows shifted half a cell along world `x`. Walkability is decided
//! once, at construction, by a caller-supplied obstacle test.

use thiserror::Error;

use crate::cell::{Cell, CellId};
use crate::config::GridConfig;
use crate::geom::{CubeCoord, Direction, WorldPos};
use crate::metrics::HexMetrics;

/// Errors raised while building or querying a [`HexGrid`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    /// No cell contains the given world position.
    #[error("no cell at world position {position}")]
    CellNotFound { position: WorldPos },
    /// Width or height is zero.
    #[error("grid must have at least one row and one column")]
    EmptyGrid,
    /// The outer radius is zero, negative or not finite.
    #[error("invalid cell radius {0}")]
    InvalidRadius(f32),
    /// A walkability table does not match the grid size.
    #[error("walkability table has {actual} entries, grid has {expected} cells")]
    WalkabilityLength { expected: usize, actual: usize },
}

/// A rectangle of hex cells.
///
/// The grid is immutable once built, so it can be shared between threads
/// and read by any number of searches at once.
#[derive(Clone, Debug)]
pub struct HexGrid {
    cells: Vec<Cell>,
    width: usize,
    height: usize,
    metrics: HexMetrics,
}

impl HexGrid {
    /// Build a grid, asking `is_walkable` about the centre of every cell.
    pub fn new(
        config: &GridConfig,
        mut is_walkable: impl FnMut(WorldPos) -> bool,
    ) -> Result<Self, GridError> {
        if config.width == 0 || config.height == 0 {
            return Err(GridError::EmptyGrid);
        }
        if !(config.outer_radius.is_finite() && config.outer_radius > 0.0) {
            return Err(GridError::InvalidRadius(config.outer_radius));
        }

        let metrics = config.metrics();
        let mut grid = Self {
            cells: Vec::with_capacity(config.len()),
            width: config.width,
            height: config.height,
            metrics,
        };

        for z in 0..grid.height {
            for x in 0..grid.width {
                grid.create_cell(x, z, &mut is_walkable);
            }
        }

        log::debug!(
            "built {}x{} hex grid, {} walkable cells",
            grid.width,
            grid.height,
            grid.walkable_count()
        );
        Ok(grid)
    }

    /// Build a grid from a row-major walkability table.
    pub fn from_walkability(config: &GridConfig, walkable: &[bool]) -> Result<Self, GridError> {
        if walkable.len() != config.len() {
            return Err(GridError::WalkabilityLength {
                expected: config.len(),
                actual: walkable.len(),
            });
        }
        let mut next = walkable.iter().copied();
        Self::new(config, |_| next.next().unwrap_or(false))
    }

    /// A grid where every cell is walkable.
    pub fn open(config: &GridConfig) -> Result<Self, GridError> {
        Self::new(config, |_| true)
    }

    fn create_cell(&mut self, x: usize, z: usize, is_walkable: &mut impl FnMut(WorldPos) -> bool) {
        let (xi, zi) = (x as i32, z as i32);
        let position = self.metrics.cell_center(xi, zi);
        let walkable = is_walkable(position);
        let id = CellId::new(self.cells.len());
        self.cells
            .push(Cell::new(CubeCoord::from_offset(xi, zi), position, walkable));

        // Only backward links; the symmetric setter fills the forward ones.
        if x > 0 {
            self.link(id, Direction::W, self.offset_id(x - 1, z));
        }
        if z > 0 {
            if z % 2 == 0 {
                self.link(id, Direction::SE, self.offset_id(x, z - 1));
                if x > 0 {
                    self.link(id, Direction::SW, self.offset_id(x - 1, z - 1));
                }
            } else {
                self.link(id, Direction::SW, self.offset_id(x, z - 1));
                if x + 1 < self.width {
                    self.link(id, Direction::SE, self.offset_id(x + 1, z - 1));
                }
            }
        }
    }

    /// Make `b` the neighbour of `a` in direction `dir`, and `a` the
    /// neighbour of `b` in the opposite direction.
    fn link(&mut self, a: CellId, dir: Direction, b: CellId) {
        self.cells[a.index()].neighbors[dir.index()] = Some(b);
        self.cells[b.index()].neighbors[dir.opposite().index()] = Some(a);
    }

    #[inline]
    fn offset_id(&self, x: usize, z: usize) -> CellId {
        CellId::new(z * self.width + x)
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn metrics(&self) -> HexMetrics {
        self.metrics
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Upper bound on the number of cells a search can hold open at once.
    #[inline]
    pub fn max_heap_size(&self) -> usize {
        self.width * self.height
    }

    /// The cell with the given id.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this grid.
    #[inline]
    pub fn cell(&self, id: CellId) -> &Cell {
        &self.cells[id.index()]
    }

    /// The cell with the given id, or `None` if it is out of range.
    #[inline]
    pub fn get(&self, id: CellId) -> Option<&Cell> {
        self.cells.get(id.index())
    }

    /// The cell at offset column `x`, row `z`.
    pub fn cell_at_offset(&self, x: i32, z: i32) -> Option<CellId> {
        if x < 0 || z < 0 || x as usize >= self.width || z as usize >= self.height {
            return None;
        }
        Some(self.offset_id(x as usize, z as usize))
    }

    /// The cell with the given cube coordinates.
    #[inline]
    pub fn cell_at_coords(&self, coords: CubeCoord) -> Option<CellId> {
        let x = coords.x.checked_add(coords.z / 2)?;
        self.cell_at_offset(x, coords.z)
    }

    /// The cell containing a world position.
    ///
    /// Positions outside the grid yield [`GridError::CellNotFound`].
    pub fn cell_from_world(&self, position: WorldPos) -> Result<CellId, GridError> {
        CubeCoord::from_position(position, &self.metrics)
            .and_then(|coords| self.cell_at_coords(coords))
            .ok_or(GridError::CellNotFound { position })
    }

    /// The neighbour of `id` in direction `dir`.
    #[inline]
    pub fn neighbor(&self, id: CellId, dir: Direction) -> Option<CellId> {
        self.cells[id.index()].neighbor(dir)
    }

    /// Present neighbours of `id` in NE, E, SE, SW, W, NW order.
    pub fn neighbors(&self, id: CellId) -> impl Iterator<Item = CellId> + '_ {
        self.cells[id.index()].neighbors()
    }

    /// All cells with their ids, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (CellId, &Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, c)| (CellId::new(i), c))
    }

    /// Number of walkable cells.
    pub fn walkable_count(&self) -> usize {
        self.cells.iter().filter(|c| c.walkable).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(w: usize, h: usize) -> HexGrid {
        HexGrid::open(&GridConfig::new(w, h)).unwrap()
    }

    #[test]
    fn rejects_empty_and_bad_radius() {
        assert_eq!(
            HexGrid::open(&GridConfig::new(0, 4)).unwrap_err(),
            GridError::EmptyGrid
        );
        assert!(matches!(
            HexGrid::open(&GridConfig::new(2, 2).with_outer_radius(-1.0)),
            Err(GridError::InvalidRadius(_))
        ));
        assert!(matches!(
            HexGrid::open(&GridConfig::new(2, 2).with_outer_radius(f32::NAN)),
            Err(GridError::InvalidRadius(_))
        ));
    }

    #[test]
    fn walkability_table_must_match() {
        let err = HexGrid::from_walkability(&GridConfig::new(3, 3), &[true; 8]).unwrap_err();
        assert_eq!(
            err,
            GridError::WalkabilityLength {
                expected: 9,
                actual: 8
            }
        );
    }

    #[test]
    fn walkability_table_is_row_major() {
        let mut table = [true; 6];
        table[4] = false; // x = 1, z = 1
        let g = HexGrid::from_walkability(&GridConfig::new(3, 2), &table).unwrap();
        let id = g.cell_at_offset(1, 1).unwrap();
        assert!(!g.cell(id).is_walkable());
        assert_eq!(g.walkable_count(), 5);
    }

    #[test]
    fn obstacle_test_sees_cell_centres() {
        let cfg = GridConfig::new(4, 4);
        let m = cfg.metrics();
        let blocked = m.cell_center(2, 1);
        let g = HexGrid::new(&cfg, |p| p != blocked).unwrap();
        let id = g.cell_at_offset(2, 1).unwrap();
        assert!(!g.cell(id).is_walkable());
        assert_eq!(g.walkable_count(), 15);
    }

    #[test]
    fn neighbor_links_are_symmetric() {
        let g = grid(7, 6);
        for (id, cell) in g.iter() {
            for dir in Direction::ALL {
                if let Some(n) = cell.neighbor(dir) {
                    assert_eq!(g.neighbor(n, dir.opposite()), Some(id), "{id} {dir}");
                }
            }
        }
    }

    #[test]
    fn neighbor_links_match_cube_offsets() {
        let g = grid(6, 6);
        for (id, cell) in g.iter() {
            for dir in Direction::ALL {
                let expected = g.cell_at_coords(cell.coords().step(dir));
                assert_eq!(g.neighbor(id, dir), expected, "{id} {dir}");
            }
        }
    }

    #[test]
    fn interior_cells_have_six_neighbors() {
        let g = grid(5, 5);
        let centre = g.cell_at_offset(2, 2).unwrap();
        assert_eq!(g.neighbors(centre).count(), 6);
        let corner = g.cell_at_offset(0, 0).unwrap();
        assert_eq!(g.neighbors(corner).count(), 2);
    }

    #[test]
    fn neighbors_follow_slot_order() {
        let g = grid(5, 5);
        let centre = g.cell_at_offset(2, 2).unwrap();
        let by_slot: Vec<_> = Direction::ALL
            .into_iter()
            .filter_map(|d| g.neighbor(centre, d))
            .collect();
        assert_eq!(g.neighbors(centre).collect::<Vec<_>>(), by_slot);
    }

    #[test]
    fn single_cell_grid_has_no_neighbors() {
        let g = grid(1, 1);
        assert_eq!(g.len(), 1);
        assert_eq!(g.neighbors(CellId::new(0)).count(), 0);
    }

    #[test]
    fn cell_from_world_finds_every_centre() {
        let g = grid(6, 4);
        for (id, cell) in g.iter() {
            assert_eq!(g.cell_from_world(cell.position()), Ok(id));
        }
    }

    #[test]
    fn positions_outside_are_not_found() {
        let g = grid(3, 3);
        let far = WorldPos::planar(-500.0, 12.0);
        assert_eq!(
            g.cell_from_world(far),
            Err(GridError::CellNotFound { position: far })
        );
        let above = WorldPos::planar(0.0, 3.0 * 15.0);
        assert!(g.cell_from_world(above).is_err());
    }

    #[test]
    fn unrepresentable_positions_are_not_found() {
        let g = grid(3, 3);
        for position in [
            WorldPos::planar(0.0, 1.0e12),
            WorldPos::planar(-3.0e11, 0.0),
            WorldPos::planar(f32::MAX, f32::MIN),
            WorldPos::planar(f32::NAN, f32::NAN),
            WorldPos::planar(f32::NAN, 0.0),
            WorldPos::planar(f32::INFINITY, 0.0),
            WorldPos::planar(0.0, f32::NEG_INFINITY),
        ] {
            assert!(
                matches!(g.cell_from_world(position), Err(GridError::CellNotFound { .. })),
                "{position:?}"
            );
        }
    }

    #[test]
    fn extreme_coords_are_off_grid() {
        let g = grid(3, 3);
        assert_eq!(g.cell_at_coords(CubeCoord::new(i32::MAX, 4)), None);
        assert_eq!(g.cell_at_coords(CubeCoord::new(i32::MIN, 0)), None);
    }

    #[test]
    fn cell_from_world_picks_the_nearest_centre() {
        let g = grid(8, 6);
        let m = g.metrics();
        // One cell in from the border, so the nearest centre is on the grid.
        let lo = m.cell_center(1, 1);
        let hi = m.cell_center(6, 4);
        let dist2 = |a: WorldPos, b: WorldPos| (a.x - b.x).powi(2) + (a.z - b.z).powi(2);

        let mut checked = 0;
        let mut x = lo.x;
        while x <= hi.x {
            let mut z = lo.z;
            while z <= hi.z {
                let p = WorldPos::planar(x, z);
                let mut by_distance: Vec<(f32, CellId)> =
                    g.iter().map(|(id, c)| (dist2(p, c.position()), id)).collect();
                by_distance.sort_by(|a, b| a.0.total_cmp(&b.0));
                // Skip points on a shared edge.
                if by_distance[1].0 - by_distance[0].0 > 1e-2 {
                    assert_eq!(g.cell_from_world(p), Ok(by_distance[0].1), "{p:?}");
                    checked += 1;
                }
                z += 0.73;
            }
            x += 0.61;
        }
        assert!(checked > 1000);
    }

    #[test]
    fn coordinates_keep_the_cube_invariant() {
        let g = grid(9, 7);
        for (_, cell) in g.iter() {
            let c = cell.coords();
            assert_eq!(c.x + c.y() + c.z, 0);
        }
    }

    #[test]
    fn grid_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HexGrid>();
    }
}
