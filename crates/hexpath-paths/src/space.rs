use hexpath_core::CellId;

use crate::heap::CostKey;

/// Where a cell stands in the current search.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum NodeState {
    Unvisited,
    Open,
    Closed,
}

#[derive(Clone, Debug)]
struct Node {
    g: i32,
    h: i32,
    parent: Option<CellId>,
    state: NodeState,
    generation: u32,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: 0,
            h: 0,
            parent: None,
            state: NodeState::Unvisited,
            generation: 0,
        }
    }
}

/// Per-search cost state for every cell of a grid.
///
/// Nodes are invalidated lazily: a node whose generation differs from the
/// space's current generation reads as unvisited, so starting a new search
/// costs nothing proportional to the grid size.
#[derive(Clone, Debug, Default)]
pub(crate) struct SearchSpace {
    nodes: Vec<Node>,
    generation: u32,
}

impl SearchSpace {
    pub(crate) fn new(len: usize) -> Self {
        let mut space = Self::default();
        space.reset(len);
        space
    }

    /// Forget the previous search and make room for `len` cells.
    pub(crate) fn reset(&mut self, len: usize) {
        if self.nodes.len() < len {
            self.nodes.resize(len, Node::default());
        }
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            // Wrapped: stale nodes could alias the new generation.
            for node in &mut self.nodes {
                node.generation = 0;
            }
            self.generation = 1;
        }
    }

    #[inline]
    fn node(&self, id: CellId) -> Option<&Node> {
        self.nodes
            .get(id.index())
            .filter(|n| n.generation == self.generation)
    }

    #[inline]
    pub(crate) fn state(&self, id: CellId) -> NodeState {
        self.node(id).map_or(NodeState::Unvisited, |n| n.state)
    }

    /// Cost from the start. Only meaningful for visited cells.
    #[inline]
    pub(crate) fn g(&self, id: CellId) -> i32 {
        self.node(id).map_or(i32::MAX, |n| n.g)
    }

    #[inline]
    pub(crate) fn key(&self, id: CellId) -> CostKey {
        self.node(id)
            .map_or(CostKey { f: i32::MAX, h: i32::MAX }, |n| CostKey::new(n.g, n.h))
    }

    #[inline]
    pub(crate) fn parent(&self, id: CellId) -> Option<CellId> {
        self.node(id).and_then(|n| n.parent)
    }

    /// Record costs and parent for `id` and mark it open.
    pub(crate) fn open(&mut self, id: CellId, g: i32, h: i32, parent: Option<CellId>) {
        let generation = self.generation;
        let node = &mut self.nodes[id.index()];
        *node = Node {
            g,
            h,
            parent,
            state: NodeState::Open,
            generation,
        };
    }

    pub(crate) fn close(&mut self, id: CellId) {
        let generation = self.generation;
        let node = &mut self.nodes[id.index()];
        debug_assert_eq!(node.generation, generation, "closing unvisited cell {id}");
        node.state = NodeState::Closed;
    }

    /// Follow parent links from `end` back to `start`, returning the chain
    /// start first.
    pub(crate) fn retrace(&self, start: CellId, end: CellId) -> Vec<CellId> {
        let mut cells = vec![end];
        let mut current = end;
        while current != start {
            let Some(parent) = self.parent(current) else {
                debug_assert!(false, "broken parent chain at {current}");
                break;
            };
            cells.push(parent);
            current = parent;
            if cells.len() > self.nodes.len() {
                debug_assert!(false, "parent chain from {end} loops");
                break;
            }
        }
        cells.reverse();
        cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(i: usize) -> CellId {
        CellId::new(i)
    }

    #[test]
    fn fresh_space_is_unvisited() {
        let space = SearchSpace::new(4);
        assert_eq!(space.state(id(3)), NodeState::Unvisited);
        assert_eq!(space.parent(id(3)), None);
    }

    #[test]
    fn open_then_close() {
        let mut space = SearchSpace::new(4);
        space.open(id(1), 2, 3, Some(id(0)));
        assert_eq!(space.state(id(1)), NodeState::Open);
        assert_eq!(space.key(id(1)), CostKey { f: 5, h: 3 });
        space.close(id(1));
        assert_eq!(space.state(id(1)), NodeState::Closed);
        assert_eq!(space.g(id(1)), 2);
    }

    #[test]
    fn reset_forgets_previous_search() {
        let mut space = SearchSpace::new(4);
        space.open(id(2), 1, 1, None);
        space.reset(4);
        assert_eq!(space.state(id(2)), NodeState::Unvisited);
        space.reset(10);
        space.open(id(9), 0, 0, None);
        assert_eq!(space.state(id(9)), NodeState::Open);
    }

    #[test]
    fn generation_wrap_clears_stale_nodes() {
        let mut space = SearchSpace::new(2);
        space.generation = u32::MAX;
        space.open(id(0), 0, 0, None);
        space.reset(2);
        assert_eq!(space.generation, 1);
        assert_eq!(space.state(id(0)), NodeState::Unvisited);
    }

    #[test]
    fn retrace_runs_start_to_end() {
        let mut space = SearchSpace::new(5);
        space.open(id(0), 0, 3, None);
        space.open(id(3), 1, 2, Some(id(0)));
        space.open(id(4), 2, 1, Some(id(3)));
        space.open(id(2), 3, 0, Some(id(4)));
        assert_eq!(space.retrace(id(0), id(2)), vec![id(0), id(3), id(4), id(2)]);
        assert_eq!(space.retrace(id(4), id(4)), vec![id(4)]);
    }
}
