//! Hex cell dimensions and the offset → world layout.

use crate::geom::WorldPos;

/// Ratio of a hexagon's inner radius to its outer radius (`sqrt(3) / 2`).
pub const INNER_RADIUS_FACTOR: f32 = 0.866_025_4;

/// Default outer radius of a cell in world units.
pub const DEFAULT_OUTER_RADIUS: f32 = 10.0;

/// Dimensions of a pointy-top hex cell.
///
/// The outer radius is the centre-to-corner distance; the inner radius is
/// the centre-to-edge distance and is derived from it.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HexMetrics {
    outer_radius: f32,
}

impl Default for HexMetrics {
    fn default() -> Self {
        Self::new(DEFAULT_OUTER_RADIUS)
    }
}

impl HexMetrics {
    /// Metrics for cells with the given outer radius.
    #[inline]
    pub const fn new(outer_radius: f32) -> Self {
        Self { outer_radius }
    }

    #[inline]
    pub const fn outer_radius(&self) -> f32 {
        self.outer_radius
    }

    #[inline]
    pub fn inner_radius(&self) -> f32 {
        self.outer_radius * INNER_RADIUS_FACTOR
    }

    /// World-space centre of the cell at offset column `x`, row `z`.
    ///
    /// Rows advance along world `z` by one and a half outer radii; odd rows
    /// are shifted half a cell along world `x`.
    pub fn cell_center(&self, x: i32, z: i32) -> WorldPos {
        let wx = (x as f32 + z as f32 * 0.5 - (z / 2) as f32) * (self.inner_radius() * 2.0);
        let wz = z as f32 * (self.outer_radius * 1.5);
        WorldPos::planar(wx, wz)
    }
}
