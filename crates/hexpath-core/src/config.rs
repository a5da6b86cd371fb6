//! Grid construction parameters.

use crate::metrics::{DEFAULT_OUTER_RADIUS, HexMetrics};

/// Dimensions and cell size of a [`HexGrid`](crate::HexGrid).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridConfig {
    /// Number of columns.
    pub width: usize,
    /// Number of rows.
    pub height: usize,
    /// Centre-to-corner radius of a cell in world units.
    pub outer_radius: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
            outer_radius: DEFAULT_OUTER_RADIUS,
        }
    }
}

impl GridConfig {
    /// A config of the given size with the default cell radius.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Set the outer radius (builder).
    pub fn with_outer_radius(mut self, outer_radius: f32) -> Self {
        self.outer_radius = outer_radius;
        self
    }

    #[inline]
    pub fn metrics(&self) -> HexMetrics {
        HexMetrics::new(self.outer_radius)
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let cfg: GridConfig = serde_json::from_str(r#"{ "width": 32 }"#).unwrap();
        assert_eq!(cfg.width, 32);
        assert_eq!(cfg.height, 10);
        assert_eq!(cfg.outer_radius, DEFAULT_OUTER_RADIUS);
    }

    #[test]
    fn config_round_trip() {
        let cfg = GridConfig::new(7, 3).with_outer_radius(2.5);
        let json = serde_json::to_string(&cfg).unwrap();
        let back: GridConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg, back);
    }
}
