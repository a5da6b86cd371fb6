//! Single-flight path request handling for *hexpath*.
//!
//! Callers submit [`PathRequest`]s carrying a callback. A manager runs one
//! search at a time per grid and hands each result back through its
//! callback, in submission order.
//!
//! - [`PathRequestManager`] runs searches on the caller's thread, either to
//!   completion on submit ([`Dispatch::Immediate`]) or a bounded number of
//!   expansions per [`tick`](PathRequestManager::tick) ([`Dispatch::Ticked`]).
//! - [`ThreadedRequestManager`] runs searches on a worker thread; callbacks
//!   run when the owner calls [`update`](ThreadedRequestManager::update).

mod config;
mod error;
mod manager;
mod request;
mod worker;

pub use config::{Dispatch, ManagerConfig};
pub use error::RequestError;
pub use manager::{ManagerState, PathRequestManager};
pub use request::{PathCallback, PathRequest, PathResult, find_path};
pub use worker::ThreadedRequestManager;
