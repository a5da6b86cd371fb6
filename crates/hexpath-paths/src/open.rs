//! Open-set containers, one per strategy family.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use hexpath_core::CellId;

use crate::heap::{CostKey, IndexedHeap};
use crate::space::{NodeState, SearchSpace};

/// How a list frontier picks the next cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum TieBreak {
    /// Lowest `(f, h)`, first in insertion order on a full tie.
    Lexicographic,
    /// The historical comparison: candidates with the same `f` as the current
    /// pick are skipped, any other candidate with a lower `h` replaces it.
    /// Can pick a node with a higher `f`; the search still terminates.
    Legacy,
}

/// Entry of the lazy-deletion priority queue.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct QueueEntry {
    key: CostKey,
    id: CellId,
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Lower ids first among equal keys, matching the list frontier.
        self.key.cmp(&other.key).then(other.id.cmp(&self.id))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The open set of a search.
///
/// Membership is tracked by the [`SearchSpace`]; the frontier only decides
/// extraction order.
#[derive(Clone, Debug)]
pub(crate) enum Frontier {
    List { cells: Vec<CellId>, tie_break: TieBreak },
    Heap(IndexedHeap<CostKey>),
    Queue(BinaryHeap<QueueEntry>),
}

/// Which container a strategy uses.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum FrontierKind {
    List(TieBreak),
    Heap,
    Queue,
}

impl Frontier {
    pub(crate) fn new(kind: FrontierKind, capacity: usize) -> Self {
        match kind {
            FrontierKind::List(tie_break) => Frontier::List {
                cells: Vec::new(),
                tie_break,
            },
            FrontierKind::Heap => Frontier::Heap(IndexedHeap::with_capacity(capacity)),
            FrontierKind::Queue => Frontier::Queue(BinaryHeap::new()),
        }
    }

    pub(crate) fn kind(&self) -> FrontierKind {
        match self {
            Frontier::List { tie_break, .. } => FrontierKind::List(*tie_break),
            Frontier::Heap(_) => FrontierKind::Heap,
            Frontier::Queue(_) => FrontierKind::Queue,
        }
    }

    /// Empty the frontier for a grid of `capacity` cells.
    pub(crate) fn reset(&mut self, capacity: usize) {
        match self {
            Frontier::List { cells, .. } => cells.clear(),
            Frontier::Heap(heap) if heap.capacity() == capacity => heap.clear(),
            Frontier::Heap(heap) => *heap = IndexedHeap::with_capacity(capacity),
            Frontier::Queue(queue) => queue.clear(),
        }
    }

    /// Insert a newly opened cell.
    pub(crate) fn push(&mut self, id: CellId, key: CostKey) {
        match self {
            Frontier::List { cells, .. } => cells.push(id),
            Frontier::Heap(heap) => heap.add(id.index(), key),
            Frontier::Queue(queue) => queue.push(QueueEntry { key, id }),
        }
    }

    /// Re-prioritise an open cell whose cost improved.
    pub(crate) fn improve(&mut self, id: CellId, key: CostKey) {
        match self {
            // Keys are read from the search space at extraction time.
            Frontier::List { .. } => {}
            Frontier::Heap(heap) => {
                debug_assert!(heap.contains(id.index()));
                heap.update_item(id.index(), key);
            }
            // The old entry goes stale and is skipped on pop.
            Frontier::Queue(queue) => queue.push(QueueEntry { key, id }),
        }
    }

    /// Remove and return the next cell to expand.
    pub(crate) fn pop(&mut self, space: &SearchSpace) -> Option<CellId> {
        match self {
            Frontier::List { cells, tie_break } => {
                let best = select(cells, space, *tie_break)?;
                Some(cells.remove(best))
            }
            Frontier::Heap(heap) => heap.remove_first().map(|(payload, _)| CellId::new(payload)),
            Frontier::Queue(queue) => {
                while let Some(entry) = queue.pop() {
                    if space.state(entry.id) == NodeState::Open && space.key(entry.id) == entry.key {
                        return Some(entry.id);
                    }
                }
                None
            }
        }
    }
}

fn select(cells: &[CellId], space: &SearchSpace, tie_break: TieBreak) -> Option<usize> {
    if cells.is_empty() {
        return None;
    }
    let mut best = 0;
    let mut best_key = space.key(cells[0]);
    for (i, &id) in cells.iter().enumerate().skip(1) {
        let key = space.key(id);
        let take = match tie_break {
            TieBreak::Lexicographic => key > best_key,
            TieBreak::Legacy => key.f != best_key.f && key.h < best_key.h,
        };
        if take {
            best = i;
            best_key = key;
        }
    }
    Some(best)
}
