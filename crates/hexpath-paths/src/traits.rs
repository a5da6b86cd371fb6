use hexpath_core::{CellId, CubeCoord, Direction, HexGrid, WorldPos};

/// The view of a hex grid that searches need.
///
/// [`HexGrid`] is the canonical implementation; anything that can answer
/// these queries with stable [`CellId`]s below [`cell_count`](Self::cell_count)
/// can be searched.
pub trait HexGraph {
    /// Number of cells. Every id handed out is below this bound.
    fn cell_count(&self) -> usize;

    /// The cell containing a world position, or `None` when no cell does.
    fn cell_from_world(&self, position: WorldPos) -> Option<CellId>;

    /// The neighbour of `id` in direction `dir`, or `None` on an edge.
    fn neighbor(&self, id: CellId, dir: Direction) -> Option<CellId>;

    fn is_walkable(&self, id: CellId) -> bool;

    fn coords(&self, id: CellId) -> CubeCoord;

    /// World-space centre of the cell.
    fn position(&self, id: CellId) -> WorldPos;

    /// Present neighbours of `id` in slot order.
    fn neighbors(&self, id: CellId) -> impl Iterator<Item = CellId> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |d| self.neighbor(id, d))
    }
}

impl HexGraph for HexGrid {
    #[inline]
    fn cell_count(&self) -> usize {
        self.len()
    }

    #[inline]
    fn cell_from_world(&self, position: WorldPos) -> Option<CellId> {
        HexGrid::cell_from_world(self, position).ok()
    }

    #[inline]
    fn neighbor(&self, id: CellId, dir: Direction) -> Option<CellId> {
        HexGrid::neighbor(self, id, dir)
    }

    #[inline]
    fn is_walkable(&self, id: CellId) -> bool {
        self.cell(id).is_walkable()
    }

    #[inline]
    fn coords(&self, id: CellId) -> CubeCoord {
        self.cell(id).coords()
    }

    #[inline]
    fn position(&self, id: CellId) -> WorldPos {
        self.cell(id).position()
    }
}
