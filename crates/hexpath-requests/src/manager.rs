use std::collections::VecDeque;
use std::sync::Arc;

use hexpath_core::{HexGrid, WorldPos};
use hexpath_paths::{Path, Pathfinder, Search, SearchOutcome, SearchPoll, Strategy};

use crate::config::{Dispatch, ManagerConfig};
use crate::request::{PathCallback, PathRequest, PathResult};

/// Whether a search is in flight.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ManagerState {
    Idle,
    Processing,
}

struct InFlight {
    search: Search,
    callback: PathCallback,
}

/// Serialises path requests against one grid.
///
/// Requests are queued first in, first out and searched one at a time;
/// every accepted request gets exactly one callback, in submission order.
pub struct PathRequestManager {
    grid: Arc<HexGrid>,
    finder: Pathfinder,
    dispatch: Dispatch,
    queue: VecDeque<PathRequest>,
    current: Option<InFlight>,
}

impl PathRequestManager {
    pub fn new(grid: Arc<HexGrid>) -> Self {
        Self::with_config(grid, ManagerConfig::default())
    }

    pub fn with_config(grid: Arc<HexGrid>, config: ManagerConfig) -> Self {
        Self {
            grid,
            finder: Pathfinder::new(config.strategy),
            dispatch: config.dispatch,
            queue: VecDeque::new(),
            current: None,
        }
    }

    #[inline]
    pub fn grid(&self) -> &Arc<HexGrid> {
        &self.grid
    }

    #[inline]
    pub fn strategy(&self) -> Strategy {
        self.finder.strategy()
    }

    /// Strategy for searches started from now on.
    pub fn set_strategy(&mut self, strategy: Strategy) {
        self.finder.set_strategy(strategy);
    }

    #[inline]
    pub fn dispatch(&self) -> Dispatch {
        self.dispatch
    }

    #[inline]
    pub fn state(&self) -> ManagerState {
        if self.current.is_some() {
            ManagerState::Processing
        } else {
            ManagerState::Idle
        }
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        self.current.is_none()
    }

    /// Requests waiting behind the in-flight one.
    #[inline]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Queue a request for a route from `start` to `end`.
    pub fn request_path(
        &mut self,
        start: WorldPos,
        end: WorldPos,
        callback: impl FnOnce(Path, bool) + Send + 'static,
    ) {
        self.submit(PathRequest::new(start, end, callback));
    }

    /// Queue a request; start it at once if nothing is in flight.
    pub fn submit(&mut self, request: PathRequest) {
        self.queue.push_back(request);
        if self.is_idle() {
            self.process_next();
        }
    }

    /// Advance the in-flight search by one dispatch budget.
    ///
    /// Returns `true` if a request completed and its callback ran. With
    /// [`Dispatch::Immediate`] there is never anything to advance.
    pub fn tick(&mut self) -> bool {
        let completed = self.poll_current(self.dispatch.budget());
        if completed {
            self.process_next();
        }
        completed
    }

    /// Stop the in-flight search. Its callback receives `(empty, false)` on
    /// the next tick.
    pub fn cancel_current(&mut self) {
        if let Some(flight) = self.current.as_mut() {
            flight.search.cancel();
        }
    }

    fn process_next(&mut self) {
        while self.current.is_none() {
            let Some(request) = self.queue.pop_front() else {
                break;
            };
            let (start, end, callback) = request.into_parts();
            match self.finder.start_search(&*self.grid, start, end) {
                Ok(search) => {
                    self.current = Some(InFlight { search, callback });
                    if self.dispatch == Dispatch::Immediate {
                        self.poll_current(usize::MAX);
                    }
                }
                Err(err) => {
                    log::warn!("path request {start} -> {end} rejected: {err}");
                    PathResult::rejected(err, callback).dispatch();
                }
            }
        }
    }

    fn poll_current(&mut self, budget: usize) -> bool {
        let Some(flight) = self.current.as_mut() else {
            return false;
        };
        match flight.search.poll(&*self.grid, budget) {
            SearchPoll::InProgress => false,
            SearchPoll::Done(outcome) => {
                self.finished_processing_path(outcome);
                true
            }
        }
    }

    fn finished_processing_path(&mut self, outcome: SearchOutcome) {
        let Some(InFlight { search, callback }) = self.current.take() else {
            return;
        };
        self.finder.recycle(search);
        PathResult::from_outcome(outcome, callback).dispatch();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use hexpath_core::GridConfig;

    use super::*;

    type Log = Arc<Mutex<Vec<(usize, bool, usize)>>>;

    fn grid(w: usize, h: usize) -> Arc<HexGrid> {
        Arc::new(HexGrid::open(&GridConfig::new(w, h)).unwrap())
    }

    fn at(grid: &HexGrid, x: i32, z: i32) -> WorldPos {
        grid.metrics().cell_center(x, z)
    }

    /// A callback that records `(tag, success, moves)`.
    fn record(log: &Log, tag: usize) -> impl FnOnce(Path, bool) + Send + 'static {
        let log = Arc::clone(log);
        move |path, ok| log.lock().unwrap().push((tag, ok, path.moves()))
    }

    fn ticked(grid: Arc<HexGrid>, expansions_per_tick: usize) -> PathRequestManager {
        PathRequestManager::with_config(
            grid,
            ManagerConfig {
                strategy: Strategy::AStarHeap,
                dispatch: Dispatch::Ticked {
                    expansions_per_tick,
                },
            },
        )
    }

    #[test]
    fn immediate_dispatch_completes_inside_submit() {
        let g = grid(6, 6);
        let log = Log::default();
        let mut manager = PathRequestManager::new(Arc::clone(&g));
        manager.request_path(at(&g, 0, 0), at(&g, 5, 5), record(&log, 0));
        manager.request_path(at(&g, 5, 0), at(&g, 5, 0), record(&log, 1));

        assert_eq!(*log.lock().unwrap(), vec![(0, true, 8), (1, true, 0)]);
        assert!(manager.is_idle());
        assert_eq!(manager.pending(), 0);
        assert!(!manager.tick());
    }

    #[test]
    fn ticked_requests_complete_in_submission_order() {
        let g = grid(10, 10);
        let log = Log::default();
        let mut manager = ticked(Arc::clone(&g), 3);
        manager.request_path(at(&g, 0, 0), at(&g, 9, 9), record(&log, 0));
        manager.request_path(at(&g, 9, 0), at(&g, 0, 9), record(&log, 1));

        assert_eq!(manager.state(), ManagerState::Processing);
        assert_eq!(manager.pending(), 1);
        assert!(log.lock().unwrap().is_empty());

        let mut ticks = 0;
        while !manager.is_idle() {
            manager.tick();
            ticks += 1;
            assert!(ticks < 1000, "manager never went idle");
        }
        let tags: Vec<_> = log.lock().unwrap().iter().map(|&(tag, ok, _)| (tag, ok)).collect();
        assert_eq!(tags, vec![(0, true), (1, true)]);
    }

    #[test]
    fn ticked_callbacks_never_run_mid_search() {
        let g = grid(8, 8);
        let log = Log::default();
        let mut manager = ticked(Arc::clone(&g), 1);
        manager.request_path(at(&g, 0, 0), at(&g, 7, 7), record(&log, 0));

        assert!(!manager.tick());
        assert!(!manager.tick());
        assert!(log.lock().unwrap().is_empty());
        assert_eq!(manager.state(), ManagerState::Processing);
    }

    #[test]
    fn trivial_ticked_request_completes_on_first_tick() {
        let g = grid(3, 3);
        let log = Log::default();
        let mut manager = ticked(Arc::clone(&g), 1);
        manager.request_path(at(&g, 1, 1), at(&g, 1, 1), record(&log, 7));
        assert!(log.lock().unwrap().is_empty());
        assert!(manager.tick());
        assert_eq!(*log.lock().unwrap(), vec![(7, true, 0)]);
    }

    #[test]
    fn off_grid_request_fails_and_the_queue_moves_on() {
        let g = grid(4, 4);
        let log = Log::default();
        let mut manager = PathRequestManager::new(Arc::clone(&g));
        let far = WorldPos::planar(-999.0, 0.0);
        manager.request_path(far, at(&g, 1, 1), record(&log, 0));
        manager.request_path(at(&g, 0, 0), at(&g, 1, 0), record(&log, 1));
        assert_eq!(*log.lock().unwrap(), vec![(0, false, 0), (1, true, 1)]);
    }

    #[test]
    fn cancelled_request_reports_failure() {
        let g = grid(10, 10);
        let log = Log::default();
        let mut manager = ticked(Arc::clone(&g), 2);
        manager.request_path(at(&g, 0, 0), at(&g, 9, 9), record(&log, 0));
        manager.request_path(at(&g, 0, 0), at(&g, 1, 0), record(&log, 1));
        assert!(!manager.tick());
        manager.cancel_current();
        assert!(manager.tick());
        assert_eq!(*log.lock().unwrap(), vec![(0, false, 0)]);
        assert_eq!(manager.state(), ManagerState::Processing);
        while !manager.is_idle() {
            manager.tick();
        }
        assert_eq!(log.lock().unwrap().len(), 2);
    }

    #[test]
    fn unreachable_end_reports_failure() {
        let cfg = GridConfig::new(5, 1);
        let g = Arc::new(HexGrid::from_walkability(&cfg, &[true, true, false, true, true]).unwrap());
        let log = Log::default();
        let mut manager = PathRequestManager::new(Arc::clone(&g));
        manager.request_path(at(&g, 0, 0), at(&g, 4, 0), record(&log, 0));
        assert_eq!(*log.lock().unwrap(), vec![(0, false, 0)]);
    }
}
