use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, Sender};
use hexpath_core::{HexGrid, WorldPos};
use hexpath_paths::{HexGraph, Path, Pathfinder, Strategy};

use crate::error::RequestError;
use crate::request::{PathRequest, PathResult};

type ResultQueue = Arc<Mutex<VecDeque<PathResult>>>;

/// Runs searches on a background thread.
///
/// Requests travel to a single worker over a channel, so searches against
/// the grid never overlap. Finished results wait in a queue until the owner
/// calls [`update`](Self::update), which runs their callbacks on the
/// owner's thread.
pub struct ThreadedRequestManager {
    sender: Option<Sender<PathRequest>>,
    results: ResultQueue,
    pending: AtomicUsize,
    handle: Option<JoinHandle<()>>,
}

impl ThreadedRequestManager {
    /// Start a worker searching `grid` with `strategy`.
    pub fn spawn(grid: Arc<HexGrid>, strategy: Strategy) -> Result<Self, RequestError> {
        let (sender, receiver) = crossbeam_channel::unbounded();
        let results = ResultQueue::default();

        let worker_results = Arc::clone(&results);
        let handle = thread::Builder::new()
            .name("hexpath-worker".into())
            .spawn(move || run_worker(&*grid, strategy, receiver, worker_results))
            .map_err(RequestError::Spawn)?;

        Ok(Self {
            sender: Some(sender),
            results,
            pending: AtomicUsize::new(0),
            handle: Some(handle),
        })
    }

    pub fn request_path(
        &self,
        start: WorldPos,
        end: WorldPos,
        callback: impl FnOnce(Path, bool) + Send + 'static,
    ) -> Result<(), RequestError> {
        self.submit(PathRequest::new(start, end, callback))
    }

    /// Hand a request to the worker.
    pub fn submit(&self, request: PathRequest) -> Result<(), RequestError> {
        let sender = self.sender.as_ref().ok_or(RequestError::WorkerStopped)?;
        self.pending.fetch_add(1, Ordering::SeqCst);
        if sender.send(request).is_err() {
            self.pending.fetch_sub(1, Ordering::SeqCst);
            return Err(RequestError::WorkerStopped);
        }
        Ok(())
    }

    /// Requests submitted whose callbacks have not run yet.
    #[inline]
    pub fn pending(&self) -> usize {
        self.pending.load(Ordering::SeqCst)
    }

    /// Whether the worker thread is still alive.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Run the callbacks of every finished request. Returns how many ran.
    pub fn update(&self) -> usize {
        let ready: Vec<PathResult> = lock(&self.results).drain(..).collect();
        let count = ready.len();
        for result in ready {
            self.pending.fetch_sub(1, Ordering::SeqCst);
            result.dispatch();
        }
        count
    }

    /// Stop accepting requests, let the worker finish what it has, and join
    /// it. Results already produced can still be collected with
    /// [`update`](Self::update).
    pub fn shutdown(&mut self) {
        self.sender.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("path worker panicked");
            }
        }
    }
}

impl Drop for ThreadedRequestManager {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Search every request until the channel closes. A search that panics is
/// reported as a failed result and the worker carries on with a fresh
/// pathfinder.
fn run_worker<G: HexGraph + ?Sized>(
    grid: &G,
    strategy: Strategy,
    receiver: Receiver<PathRequest>,
    results: ResultQueue,
) {
    log::info!("path worker started ({strategy})");
    let mut finder = Pathfinder::new(strategy);
    for request in receiver {
        let (start, end, callback) = request.into_parts();
        let searched = panic::catch_unwind(AssertUnwindSafe(|| finder.find_path(grid, start, end)));
        let result = match searched {
            Ok(searched) => PathResult::settle(start, end, searched, callback),
            Err(_) => {
                log::error!("search {start} -> {end} panicked");
                finder = Pathfinder::new(strategy);
                PathResult::aborted(callback)
            }
        };
        lock(&results).push_back(result);
    }
    log::info!("path worker stopped");
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
