use hexpath_core::WorldPos;
use thiserror::Error;

/// Why a search could not be started.
///
/// Failing to find a route is not an error: it is a completed search with
/// `success == false` and an empty path.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PathError {
    /// An endpoint lies outside the grid.
    #[error("no cell at world position {position}")]
    CellNotFound { position: WorldPos },
}
