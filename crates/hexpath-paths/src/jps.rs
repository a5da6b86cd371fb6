//! Jump Point Search on a hex lattice.
//!
//! Of the six directions, the even slots (NE, SE, W) are cardinal and the
//! odd slots (E, SW, NW) are diagonal; a diagonal step equals its two side
//! cardinals combined. A jump runs straight until it reaches the goal or a
//! cell with a forced neighbour; diagonal jumps also stop where one of their
//! side scans finds a jump point. Cells off the grid count as blocked.

use hexpath_core::{CellId, CubeCoord, Direction};

use crate::astar::relax;
use crate::distance::hex_distance;
use crate::open::Frontier;
use crate::space::{NodeState, SearchSpace};
use crate::traits::HexGraph;

/// Expand `current` by jumping in every direction.
pub(crate) fn expand<G: HexGraph + ?Sized>(
    grid: &G,
    space: &mut SearchSpace,
    frontier: &mut Frontier,
    current: CellId,
    end: CellId,
) {
    let here = grid.coords(current);
    let goal = grid.coords(end);
    let current_g = space.g(current);

    for dir in Direction::ALL {
        let Some(next) = grid.neighbor(current, dir) else {
            continue;
        };
        if !grid.is_walkable(next) || space.state(next) == NodeState::Closed {
            continue;
        }
        let Some(point) = jump(grid, current, next, dir, end) else {
            continue;
        };
        if space.state(point) == NodeState::Closed {
            continue;
        }
        log::trace!("jump point {point} from {current} heading {dir}");
        let there = grid.coords(point);
        let g = current_g + hex_distance(here, there);
        relax(space, frontier, current, point, g, hex_distance(there, goal));
    }
}

/// Walk from `from` through `next` in direction `dir` until a jump point.
fn jump<G: HexGraph + ?Sized>(
    grid: &G,
    mut from: CellId,
    mut next: CellId,
    dir: Direction,
    end: CellId,
) -> Option<CellId> {
    loop {
        if !grid.is_walkable(next) {
            return None;
        }
        if next == end || has_forced_neighbor(grid, from, next, dir) {
            return Some(next);
        }
        if dir.is_diagonal() {
            for side in dir.sides() {
                if let Some(first) = grid.neighbor(next, side) {
                    if jump(grid, next, first, side, end).is_some() {
                        return Some(next);
                    }
                }
            }
        }
        from = next;
        next = grid.neighbor(next, dir)?;
    }
}

/// A side cell is forced when it is blocked beside `from` but open beside
/// `next`: the only short way into it runs through `next`.
fn has_forced_neighbor<G: HexGraph + ?Sized>(
    grid: &G,
    from: CellId,
    next: CellId,
    dir: Direction,
) -> bool {
    dir.sides().into_iter().any(|side| {
        let blocked = grid
            .neighbor(from, side)
            .is_none_or(|c| !grid.is_walkable(c));
        let open = grid
            .neighbor(next, side)
            .is_some_and(|c| grid.is_walkable(c));
        blocked && open
    })
}

/// Expand a chain of jump points into single steps.
///
/// Consecutive jump points always lie on a straight hex line.
pub(crate) fn interpolate<G: HexGraph + ?Sized>(grid: &G, jump_points: &[CellId]) -> Vec<CellId> {
    let Some(&first) = jump_points.first() else {
        return Vec::new();
    };
    let mut cells = vec![first];
    for pair in jump_points.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let (ca, cb) = (grid.coords(a), grid.coords(b));
        let steps = hex_distance(ca, cb);
        if steps == 0 {
            continue;
        }
        let delta = cb - ca;
        let dir = Direction::from_offset(CubeCoord::new(delta.x / steps, delta.z / steps));
        debug_assert!(dir.is_some(), "jump points {a} and {b} are not in line");

        let mut current = a;
        if let Some(dir) = dir {
            for _ in 0..steps {
                let Some(step) = grid.neighbor(current, dir) else {
                    break;
                };
                cells.push(step);
                current = step;
            }
        }
        if current != b {
            cells.push(b);
        }
    }
    cells
}
