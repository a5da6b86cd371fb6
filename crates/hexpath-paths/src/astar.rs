use hexpath_core::{CellId, Direction};

use crate::distance::hex_distance;
use crate::heap::CostKey;
use crate::open::Frontier;
use crate::space::{NodeState, SearchSpace};
use crate::traits::HexGraph;

/// Expand `current` one step in every direction.
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
        let there = grid.coords(next);
        let g = current_g + hex_distance(here, there);
        relax(space, frontier, current, next, g, hex_distance(there, goal));
    }
}

/// Offer `id` a route through `parent` with cost `g`.
///
/// New cells are opened and pushed; open cells are only updated when the
/// route is strictly cheaper.
pub(crate) fn relax(
    space: &mut SearchSpace,
    frontier: &mut Frontier,
    parent: CellId,
    id: CellId,
    g: i32,
    h: i32,
) {
    let was_open = space.state(id) == NodeState::Open;
    if was_open && g >= space.g(id) {
        return;
    }
    space.open(id, g, h, Some(parent));
    let key = CostKey::new(g, h);
    if was_open {
        frontier.improve(id, key);
    } else {
        frontier.push(id, key);
    }
}
