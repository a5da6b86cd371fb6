//! Geometry primitives: [`CubeCoord`], [`Direction`] and [`WorldPos`].
//!
//! Hex cells are addressed with cube coordinates `(x, y, z)` where
//! `x + y + z == 0`. Only `x` and `z` are stored; `y` is derived.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use crate::metrics::HexMetrics;

// ---------------------------------------------------------------------------
// CubeCoord
// ---------------------------------------------------------------------------

/// Cube coordinates of a hex cell. The `y` axis is derived as `-x - z`, so
/// the cube-sum invariant holds for every value of this type.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CubeCoord {
    pub x: i32,
    pub z: i32,
}

impl CubeCoord {
    /// Origin (0, 0, 0).
    pub const ZERO: Self = Self { x: 0, z: 0 };

    /// Create a coordinate from its `x` and `z` components.
    #[inline]
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// The derived `y` component.
    #[inline]
    pub const fn y(self) -> i32 {
        -self.x - self.z
    }

    /// Convert offset (column `x`, row `z`) coordinates of a row-shifted
    /// grid into cube coordinates. Odd rows are shifted half a cell right.
    #[inline]
    pub const fn from_offset(x: i32, z: i32) -> Self {
        Self::new(x - z / 2, z)
    }

    /// Inverse of [`from_offset`](Self::from_offset).
    #[inline]
    pub const fn to_offset(self) -> (i32, i32) {
        (self.x + self.z / 2, self.z)
    }

    /// Convert a continuous world position into the cube coordinate of the
    /// cell containing it.
    ///
    /// Each axis is rounded to the nearest integer (ties to even). When the
    /// rounded triple breaks the cube-sum invariant, the axis that deviated
    /// most from its rounded value is recomputed from the other two.
    ///
    /// Returns `None` for non-finite positions and for positions so far out
    /// that their coordinates would leave [`MAX_POSITION_COORD`].
    pub fn from_position(pos: WorldPos, metrics: &HexMetrics) -> Option<Self> {
        let mut x = pos.x / (metrics.inner_radius() * 2.0);
        let mut y = -x;
        let offset = pos.z / (metrics.outer_radius() * 3.0);
        x -= offset;
        y -= offset;
        let z = -x - y;
        if !(representable(x) && representable(y) && representable(z)) {
            return None;
        }

        let mut ix = x.round_ties_even() as i32;
        let iy = y.round_ties_even() as i32;
        let mut iz = z.round_ties_even() as i32;
        if ix + iy + iz == 0 {
            return Some(Self::new(ix, iz));
        }

        let dx = (x - ix as f32).abs();
        let dy = (y - iy as f32).abs();
        let dz = (z - iz as f32).abs();
        if dx > dy && dx > dz {
            ix = -iy - iz;
        } else if dz > dy {
            iz = -ix - iy;
        }
        // Otherwise y deviated most; it is derived anyway.
        Some(Self::new(ix, iz))
    }

    /// The neighbouring coordinate in direction `dir`.
    #[inline]
    pub fn step(self, dir: Direction) -> Self {
        self + dir.offset()
    }
}

/// Largest axis magnitude [`CubeCoord::from_position`] produces. Sums of
/// three such axes, and offset conversion, stay within `i32`.
pub const MAX_POSITION_COORD: i32 = i32::MAX / 4;

// False for NaN too.
#[inline]
fn representable(v: f32) -> bool {
    v.abs() <= MAX_POSITION_COORD as f32
}

impl fmt::Display for CubeCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y(), self.z)
    }
}

impl Add for CubeCoord {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.z + rhs.z)
    }
}

impl Sub for CubeCoord {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.z - rhs.z)
    }
}

impl Mul<i32> for CubeCoord {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: i32) -> Self {
        Self::new(self.x * rhs, self.z * rhs)
    }
}

impl Neg for CubeCoord {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.z)
    }
}

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// One of the six hex directions, in neighbour-slot order.
///
/// Even slots (NE, SE, W) are *cardinal*, odd slots (E, SW, NW) are
/// *diagonal*. Jump Point Search treats the two families differently.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    NE = 0,
    E = 1,
    SE = 2,
    SW = 3,
    W = 4,
    NW = 5,
}

impl Direction {
    /// All directions in slot order.
    pub const ALL: [Direction; 6] = [
        Direction::NE,
        Direction::E,
        Direction::SE,
        Direction::SW,
        Direction::W,
        Direction::NW,
    ];

    /// Slot index `0..6`.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Direction for slot `i`, wrapping modulo 6.
    #[inline]
    pub const fn from_index(i: usize) -> Self {
        Self::ALL[i % 6]
    }

    /// The direction pointing the other way.
    #[inline]
    pub const fn opposite(self) -> Self {
        Self::from_index(self.index() + 3)
    }

    /// Rotate by `steps` slots (positive is clockwise).
    #[inline]
    pub const fn rotated(self, steps: i32) -> Self {
        Self::from_index((self.index() as i32 + steps).rem_euclid(6) as usize)
    }

    /// Whether this is one of NE, SE, W.
    #[inline]
    pub const fn is_cardinal(self) -> bool {
        self.index() % 2 == 0
    }

    /// Whether this is one of E, SW, NW.
    #[inline]
    pub const fn is_diagonal(self) -> bool {
        !self.is_cardinal()
    }

    /// The two directions adjacent to this one (counter-clockwise first).
    #[inline]
    pub const fn sides(self) -> [Direction; 2] {
        [self.rotated(-1), self.rotated(1)]
    }

    /// Cube offset of a single step in this direction.
    #[inline]
    pub const fn offset(self) -> CubeCoord {
        match self {
            Direction::NE => CubeCoord::new(0, 1),
            Direction::E => CubeCoord::new(1, 0),
            Direction::SE => CubeCoord::new(1, -1),
            Direction::SW => CubeCoord::new(0, -1),
            Direction::W => CubeCoord::new(-1, 0),
            Direction::NW => CubeCoord::new(-1, 1),
        }
    }

    /// The direction whose unit offset is `offset`, if any.
    pub fn from_offset(offset: CubeCoord) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.offset() == offset)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::NE => "NE",
            Direction::E => "E",
            Direction::SE => "SE",
            Direction::SW => "SW",
            Direction::W => "W",
            Direction::NW => "NW",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// WorldPos
// ---------------------------------------------------------------------------

/// A continuous world-space position. Grids lie in the `y = 0` plane.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldPos {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl WorldPos {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// A position on the ground plane.
    #[inline]
    pub const fn planar(x: f32, z: f32) -> Self {
        Self { x, y: 0.0, z }
    }
}

impl fmt::Display for WorldPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2}, {:.2})", self.x, self.y, self.z)
    }
}

impl Add for WorldPos {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for WorldPos {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}
