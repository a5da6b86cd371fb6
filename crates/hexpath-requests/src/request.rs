use std::fmt;

use hexpath_core::WorldPos;
use hexpath_paths::{HexGraph, Path, PathError, Pathfinder, SearchOutcome, SearchStats};

/// Receives the path and whether a route was found.
pub type PathCallback = Box<dyn FnOnce(Path, bool) + Send + 'static>;

/// A request for a route between two world positions.
pub struct PathRequest {
    start: WorldPos,
    end: WorldPos,
    callback: PathCallback,
}

impl PathRequest {
    pub fn new(
        start: WorldPos,
        end: WorldPos,
        callback: impl FnOnce(Path, bool) + Send + 'static,
    ) -> Self {
        Self {
            start,
            end,
            callback: Box::new(callback),
        }
    }

    #[inline]
    pub fn start(&self) -> WorldPos {
        self.start
    }

    #[inline]
    pub fn end(&self) -> WorldPos {
        self.end
    }

    pub(crate) fn into_parts(self) -> (WorldPos, WorldPos, PathCallback) {
        (self.start, self.end, self.callback)
    }
}

impl fmt::Debug for PathRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathRequest")
            .field("start", &self.start)
            .field("end", &self.end)
            .finish_non_exhaustive()
    }
}

/// A finished request waiting to be handed to its callback.
pub struct PathResult {
    pub path: Path,
    pub success: bool,
    /// Set when the request was rejected before searching.
    pub error: Option<PathError>,
    /// Absent when the request was rejected before searching.
    pub stats: Option<SearchStats>,
    callback: PathCallback,
}

impl PathResult {
    pub(crate) fn from_outcome(outcome: SearchOutcome, callback: PathCallback) -> Self {
        Self {
            path: outcome.path,
            success: outcome.success,
            error: None,
            stats: Some(outcome.stats),
            callback,
        }
    }

    pub(crate) fn rejected(error: PathError, callback: PathCallback) -> Self {
        Self {
            path: Path::empty(),
            success: false,
            error: Some(error),
            stats: None,
            callback,
        }
    }

    /// A request whose search did not run to an outcome.
    pub(crate) fn aborted(callback: PathCallback) -> Self {
        Self {
            path: Path::empty(),
            success: false,
            error: None,
            stats: None,
            callback,
        }
    }

    /// Wrap the result of searching `start -> end`.
    pub(crate) fn settle(
        start: WorldPos,
        end: WorldPos,
        searched: Result<SearchOutcome, PathError>,
        callback: PathCallback,
    ) -> Self {
        match searched {
            Ok(outcome) => Self::from_outcome(outcome, callback),
            Err(err) => {
                log::warn!("path request {start} -> {end} rejected: {err}");
                Self::rejected(err, callback)
            }
        }
    }

    /// Invoke the callback with `(path, success)`.
    pub fn dispatch(self) {
        (self.callback)(self.path, self.success);
    }
}

impl fmt::Debug for PathResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathResult")
            .field("path", &self.path)
            .field("success", &self.success)
            .field("error", &self.error)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

/// Run `request` to completion and hand the result to `on_result`.
///
/// Positions off the grid are logged and reported as a failed result with
/// [`PathResult::error`] set.
pub fn find_path<G: HexGraph + ?Sized>(
    finder: &mut Pathfinder,
    grid: &G,
    request: PathRequest,
    on_result: impl FnOnce(PathResult),
) {
    let (start, end, callback) = request.into_parts();
    let searched = finder.find_path(grid, start, end);
    on_result(PathResult::settle(start, end, searched, callback));
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use hexpath_core::{GridConfig, HexGrid};

    use super::*;

    #[test]
    fn find_path_reports_success_through_the_callback() {
        let grid = HexGrid::open(&GridConfig::new(4, 4)).unwrap();
        let end = grid.metrics().cell_center(3, 3);
        let (tx, rx) = mpsc::channel();
        let request = PathRequest::new(WorldPos::ZERO, end, move |path, ok| {
            tx.send((path.moves(), ok)).unwrap();
        });

        let mut finder = Pathfinder::default();
        let mut seen = None;
        find_path(&mut finder, &grid, request, |result| seen = Some(result));
        let result = seen.unwrap();
        assert!(result.success);
        assert!(result.error.is_none());
        assert!(result.stats.is_some());

        result.dispatch();
        assert_eq!(rx.try_recv().unwrap(), (5, true));
    }

    #[test]
    fn off_grid_request_keeps_the_error() {
        let grid = HexGrid::open(&GridConfig::new(2, 2)).unwrap();
        let far = WorldPos::planar(1000.0, 1000.0);
        let (tx, rx) = mpsc::channel();
        let request = PathRequest::new(WorldPos::ZERO, far, move |path, ok| {
            tx.send((path.is_empty(), ok)).unwrap();
        });

        let mut finder = Pathfinder::default();
        let mut seen = None;
        find_path(&mut finder, &grid, request, |result| seen = Some(result));
        let result = seen.unwrap();
        assert_eq!(result.error, Some(PathError::CellNotFound { position: far }));
        assert!(result.stats.is_none());

        result.dispatch();
        assert_eq!(rx.try_recv().unwrap(), (true, false));
    }

    #[test]
    fn request_debug_omits_the_callback() {
        let request = PathRequest::new(WorldPos::ZERO, WorldPos::ZERO, |_, _| {});
        let text = format!("{request:?}");
        assert!(text.starts_with("PathRequest"));
        assert!(text.contains(".."));
    }
}
