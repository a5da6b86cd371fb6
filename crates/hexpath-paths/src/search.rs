use std::fmt;
use std::time::{Duration, Instant};

use hexpath_core::{CellId, WorldPos};

use crate::distance::hex_distance;
use crate::error::PathError;
use crate::heap::CostKey;
use crate::open::{Frontier, FrontierKind, TieBreak};
use crate::path::Path;
use crate::space::SearchSpace;
use crate::traits::HexGraph;
use crate::{astar, jps};

// ---------------------------------------------------------------------------
// Strategy
// ---------------------------------------------------------------------------

/// Search algorithm and open-set container.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Strategy {
    /// A* over a linearly scanned list.
    AStarList,
    /// A* over a list with the historical tie-break, which may expand a node
    /// that is not the cheapest. Paths are not guaranteed optimal.
    AStarListLegacyTieBreak,
    /// A* over an indexed binary heap.
    #[default]
    AStarHeap,
    /// A* over `std`'s `BinaryHeap` with lazy deletion.
    AStarPriorityQueue,
    /// Jump Point Search over a list.
    JpsList,
    /// Jump Point Search over an indexed binary heap.
    JpsHeap,
}

impl Strategy {
    pub const ALL: [Strategy; 6] = [
        Strategy::AStarList,
        Strategy::AStarListLegacyTieBreak,
        Strategy::AStarHeap,
        Strategy::AStarPriorityQueue,
        Strategy::JpsList,
        Strategy::JpsHeap,
    ];

    #[inline]
    pub const fn is_jps(self) -> bool {
        matches!(self, Strategy::JpsList | Strategy::JpsHeap)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Strategy::AStarList => "a_star_list",
            Strategy::AStarListLegacyTieBreak => "a_star_list_legacy_tie_break",
            Strategy::AStarHeap => "a_star_heap",
            Strategy::AStarPriorityQueue => "a_star_priority_queue",
            Strategy::JpsList => "jps_list",
            Strategy::JpsHeap => "jps_heap",
        }
    }

    pub(crate) fn frontier_kind(self) -> FrontierKind {
        match self {
            Strategy::AStarList | Strategy::JpsList => FrontierKind::List(TieBreak::Lexicographic),
            Strategy::AStarListLegacyTieBreak => FrontierKind::List(TieBreak::Legacy),
            Strategy::AStarHeap | Strategy::JpsHeap => FrontierKind::Heap,
            Strategy::AStarPriorityQueue => FrontierKind::Queue,
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Outcome types
// ---------------------------------------------------------------------------

/// Measurements of one search.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStats {
    pub strategy: Strategy,
    /// Cells taken from the open set.
    pub expanded: usize,
    /// Time spent inside the search, excluding time between polls.
    pub elapsed: Duration,
}

/// The result of a finished search.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchOutcome {
    /// Waypoints from start to end; empty unless `success`.
    pub path: Path,
    /// The cells behind each waypoint.
    pub cells: Vec<CellId>,
    pub success: bool,
    /// The search was stopped by [`Search::cancel`].
    pub cancelled: bool,
    pub stats: SearchStats,
}

/// What [`Search::poll`] reports.
#[derive(Clone, Debug, PartialEq)]
pub enum SearchPoll {
    InProgress,
    Done(SearchOutcome),
}

impl SearchPoll {
    #[inline]
    pub fn is_done(&self) -> bool {
        matches!(self, SearchPoll::Done(_))
    }

    pub fn into_outcome(self) -> Option<SearchOutcome> {
        match self {
            SearchPoll::InProgress => None,
            SearchPoll::Done(outcome) => Some(outcome),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Finish {
    Found,
    NoRoute,
    Cancelled,
}

/// Reusable buffers of a search.
#[derive(Clone, Debug)]
struct Scratch {
    space: SearchSpace,
    frontier: Frontier,
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// An in-progress search between two cells.
///
/// Created by [`Pathfinder::start_search`] and advanced with
/// [`poll`](Self::poll). A search borrows nothing: the grid is passed to each
/// poll and must be the one the search was started on.
#[derive(Debug)]
pub struct Search {
    strategy: Strategy,
    start: CellId,
    end: CellId,
    scratch: Scratch,
    expanded: usize,
    elapsed: Duration,
    cancel_requested: bool,
    outcome: Option<SearchOutcome>,
}

impl Search {
    #[inline]
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    #[inline]
    pub fn start(&self) -> CellId {
        self.start
    }

    #[inline]
    pub fn end(&self) -> CellId {
        self.end
    }

    /// Cells expanded so far.
    #[inline]
    pub fn expanded(&self) -> usize {
        self.expanded
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.outcome.is_some()
    }

    /// The outcome, once the search has finished.
    #[inline]
    pub fn outcome(&self) -> Option<&SearchOutcome> {
        self.outcome.as_ref()
    }

    /// Ask the search to stop. The next poll finishes it with
    /// `success == false` and `cancelled == true`. No effect once done.
    pub fn cancel(&mut self) {
        if self.outcome.is_none() {
            self.cancel_requested = true;
        }
    }

    /// Expand at most `budget` cells (at least one).
    ///
    /// Once finished, every further poll returns the same outcome.
    pub fn poll<G: HexGraph + ?Sized>(&mut self, grid: &G, budget: usize) -> SearchPoll {
        if self.outcome.is_none() {
            let started = Instant::now();
            let finished = self.advance(grid, budget.max(1));
            self.elapsed += started.elapsed();
            if let Some(how) = finished {
                self.finish(grid, how);
            }
        }
        match &self.outcome {
            Some(outcome) => SearchPoll::Done(outcome.clone()),
            None => SearchPoll::InProgress,
        }
    }

    fn seed<G: HexGraph + ?Sized>(&mut self, grid: &G) -> Option<Finish> {
        if self.start == self.end {
            return Some(Finish::Found);
        }
        if !grid.is_walkable(self.end) {
            log::debug!("end cell {} is not walkable", self.end);
            return Some(Finish::NoRoute);
        }
        let h = hex_distance(grid.coords(self.start), grid.coords(self.end));
        self.scratch.space.open(self.start, 0, h, None);
        self.scratch.frontier.push(self.start, CostKey::new(0, h));
        None
    }

    fn advance<G: HexGraph + ?Sized>(&mut self, grid: &G, budget: usize) -> Option<Finish> {
        let Scratch { space, frontier } = &mut self.scratch;
        for _ in 0..budget {
            if self.cancel_requested {
                return Some(Finish::Cancelled);
            }
            let Some(current) = frontier.pop(space) else {
                return Some(Finish::NoRoute);
            };
            space.close(current);
            self.expanded += 1;
            if current == self.end {
                return Some(Finish::Found);
            }
            if self.strategy.is_jps() {
                jps::expand(grid, space, frontier, current, self.end);
            } else {
                astar::expand(grid, space, frontier, current, self.end);
            }
        }
        None
    }

    fn finish<G: HexGraph + ?Sized>(&mut self, grid: &G, how: Finish) {
        let success = how == Finish::Found;
        let cells = if success {
            let chain = self.scratch.space.retrace(self.start, self.end);
            if self.strategy.is_jps() {
                jps::interpolate(grid, &chain)
            } else {
                chain
            }
        } else {
            Vec::new()
        };
        let path = Path::new(cells.iter().map(|&c| grid.position(c)).collect());
        let stats = SearchStats {
            strategy: self.strategy,
            expanded: self.expanded,
            elapsed: self.elapsed,
        };

        match how {
            Finish::Found => log::debug!(
                "{} path found in {:?} with {} expansions ({} moves)",
                stats.strategy,
                stats.elapsed,
                stats.expanded,
                path.moves()
            ),
            Finish::NoRoute => log::debug!(
                "{} found no path in {:?} with {} expansions",
                stats.strategy,
                stats.elapsed,
                stats.expanded
            ),
            Finish::Cancelled => log::debug!(
                "{} search cancelled after {} expansions",
                stats.strategy,
                stats.expanded
            ),
        }

        self.outcome = Some(SearchOutcome {
            path,
            cells,
            success,
            cancelled: how == Finish::Cancelled,
            stats,
        });
    }
}

// ---------------------------------------------------------------------------
// Pathfinder
// ---------------------------------------------------------------------------

/// Runs searches with a chosen [`Strategy`], keeping buffers between them so
/// that repeated searches allocate nothing after warm-up.
#[derive(Debug, Default)]
pub struct Pathfinder {
    strategy: Strategy,
    spare: Option<Scratch>,
}

impl Pathfinder {
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            spare: None,
        }
    }

    #[inline]
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Change the strategy for searches started from now on.
    pub fn set_strategy(&mut self, strategy: Strategy) {
        self.strategy = strategy;
    }

    /// Resolve both endpoints and seed a search.
    ///
    /// Returns [`PathError::CellNotFound`] when either position is off the
    /// grid. Trivial searches (same cell, unwalkable end) come back already
    /// finished.
    pub fn start_search<G: HexGraph + ?Sized>(
        &mut self,
        grid: &G,
        start: WorldPos,
        end: WorldPos,
    ) -> Result<Search, PathError> {
        let start_cell = grid
            .cell_from_world(start)
            .ok_or(PathError::CellNotFound { position: start })?;
        let end_cell = grid
            .cell_from_world(end)
            .ok_or(PathError::CellNotFound { position: end })?;

        let mut search = Search {
            strategy: self.strategy,
            start: start_cell,
            end: end_cell,
            scratch: self.take_scratch(grid.cell_count()),
            expanded: 0,
            elapsed: Duration::ZERO,
            cancel_requested: false,
            outcome: None,
        };

        let started = Instant::now();
        let finished = search.seed(grid);
        search.elapsed += started.elapsed();
        if let Some(how) = finished {
            search.finish(grid, how);
        }
        Ok(search)
    }

    /// Run a search to completion.
    pub fn find_path<G: HexGraph + ?Sized>(
        &mut self,
        grid: &G,
        start: WorldPos,
        end: WorldPos,
    ) -> Result<SearchOutcome, PathError> {
        let mut search = self.start_search(grid, start, end)?;
        let outcome = loop {
            if let SearchPoll::Done(outcome) = search.poll(grid, usize::MAX) {
                break outcome;
            }
        };
        self.recycle(search);
        Ok(outcome)
    }

    /// Hand a search's buffers back for the next search.
    pub fn recycle(&mut self, search: Search) {
        self.spare = Some(search.scratch);
    }

    fn take_scratch(&mut self, capacity: usize) -> Scratch {
        let kind = self.strategy.frontier_kind();
        match self.spare.take() {
            Some(mut scratch) if scratch.frontier.kind() == kind => {
                scratch.space.reset(capacity);
                scratch.frontier.reset(capacity);
                scratch
            }
            _ => Scratch {
                space: SearchSpace::new(capacity),
                frontier: Frontier::new(kind, capacity),
            },
        }
    }
}
