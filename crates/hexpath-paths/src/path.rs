use hexpath_core::WorldPos;

/// An ordered route of world-space waypoints, start first.
///
/// An empty path means no route was found.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Path {
    waypoints: Vec<WorldPos>,
}

impl Path {
    pub fn new(waypoints: Vec<WorldPos>) -> Self {
        Self { waypoints }
    }

    /// The empty "no route" path.
    pub const fn empty() -> Self {
        Self {
            waypoints: Vec::new(),
        }
    }

    #[inline]
    pub fn waypoints(&self) -> &[WorldPos] {
        &self.waypoints
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    #[inline]
    pub fn first(&self) -> Option<WorldPos> {
        self.waypoints.first().copied()
    }

    #[inline]
    pub fn last(&self) -> Option<WorldPos> {
        self.waypoints.last().copied()
    }

    /// Number of single-cell moves along the path.
    #[inline]
    pub fn moves(&self) -> usize {
        self.waypoints.len().saturating_sub(1)
    }

    /// Index of the first waypoint equal to `pos`.
    pub fn index_of(&self, pos: WorldPos) -> Option<usize> {
        self.waypoints.iter().position(|&w| w == pos)
    }

    /// Number of waypoints between `a` and `b` along the path, in either
    /// order. `None` if either is not a waypoint.
    pub fn distance_of(&self, a: WorldPos, b: WorldPos) -> Option<usize> {
        Some(self.index_of(a)?.abs_diff(self.index_of(b)?))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WorldPos> {
        self.waypoints.iter()
    }

    pub fn into_vec(self) -> Vec<WorldPos> {
        self.waypoints
    }
}

impl From<Vec<WorldPos>> for Path {
    fn from(waypoints: Vec<WorldPos>) -> Self {
        Self::new(waypoints)
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a WorldPos;
    type IntoIter = std::slice::Iter<'a, WorldPos>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn path_serializes_as_a_list() {
        let path = Path::from(vec![WorldPos::planar(1.0, 2.0)]);
        let json = serde_json::to_string(&path).unwrap();
        assert!(json.starts_with('['));
        let back: Path = serde_json::from_str(&json).unwrap();
        assert_eq!(back, path);
    }
}
