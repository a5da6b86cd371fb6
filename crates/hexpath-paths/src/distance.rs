use hexpath_core::CubeCoord;

/// Hex (cube) distance between two cells: the number of single steps on
/// the shortest lattice route, `max(|Δx|, |Δy|, |Δz|)`.
#[inline]
pub fn hex_distance(a: CubeCoord, b: CubeCoord) -> i32 {
    let d = a - b;
    d.x.abs().max(d.y().abs()).max(d.z.abs())
}
