//! Shortest-path search on hexagonal grids.
//!
//! This crate provides two search families over any [`HexGraph`]:
//!
//! - **A\*** with three interchangeable open sets, plus the historical list
//!   tie-break kept for comparison
//! - **Jump Point Search** adapted to the six-direction hex lattice
//!
//! Searches run through a [`Pathfinder`], which keeps its buffers between
//! searches so that repeated queries incur no allocations after warm-up.
//! [`Pathfinder::find_path`] runs to completion; [`Pathfinder::start_search`]
//! returns a [`Search`] that can be advanced a few expansions at a time.
//!
//! # Strategies
//!
//! | [`Strategy`] | Algorithm | Open set |
//! |---|---|---|
//! | `AStarList` | A* | linear scan |
//! | `AStarListLegacyTieBreak` | A* | linear scan, historical tie-break |
//! | `AStarHeap` | A* | [`IndexedHeap`] |
//! | `AStarPriorityQueue` | A* | `BinaryHeap`, lazy deletion |
//! | `JpsList` | JPS | linear scan |
//! | `JpsHeap` | JPS | [`IndexedHeap`] |

mod astar;
mod distance;
mod error;
mod heap;
mod jps;
mod open;
mod path;
mod search;
mod space;
mod traits;

pub use distance::hex_distance;
pub use error::PathError;
pub use heap::{CostKey, IndexedHeap};
pub use path::Path;
pub use search::{Pathfinder, Search, SearchOutcome, SearchPoll, SearchStats, Strategy};
pub use traits::HexGraph;
