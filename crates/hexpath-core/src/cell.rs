//! The [`Cell`] type, one hex of a [`HexGrid`](crate::HexGrid).

use std::fmt;

use crate::geom::{CubeCoord, Direction, WorldPos};

/// Dense index of a cell inside the grid that owns it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellId(usize);

impl CellId {
    #[inline]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A grid node: position, walkability and links to its six neighbours.
///
/// Cells carry no search state. Costs and parent links live in the
/// search that is currently visiting them.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    pub(crate) coords: CubeCoord,
    pub(crate) position: WorldPos,
    pub(crate) walkable: bool,
    pub(crate) neighbors: [Option<CellId>; 6],
}

impl Cell {
    pub(crate) fn new(coords: CubeCoord, position: WorldPos, walkable: bool) -> Self {
        Self {
            coords,
            position,
            walkable,
            neighbors: [None; 6],
        }
    }

    #[inline]
    pub fn coords(&self) -> CubeCoord {
        self.coords
    }

    /// World-space centre of the cell.
    #[inline]
    pub fn position(&self) -> WorldPos {
        self.position
    }

    #[inline]
    pub fn is_walkable(&self) -> bool {
        self.walkable
    }

    /// The neighbour in direction `dir`, or `None` on a grid edge.
    #[inline]
    pub fn neighbor(&self, dir: Direction) -> Option<CellId> {
        self.neighbors[dir.index()]
    }

    /// The neighbour on the opposite side of `dir`.
    #[inline]
    pub fn neighbor_opposite(&self, dir: Direction) -> Option<CellId> {
        self.neighbors[dir.opposite().index()]
    }

    /// Present neighbours in NE, E, SE, SW, W, NW order.
    pub fn neighbors(&self) -> impl Iterator<Item = CellId> + '_ {
        self.neighbors.iter().flatten().copied()
    }
}
