use thiserror::Error;

/// Errors from submitting to a [`ThreadedRequestManager`](crate::ThreadedRequestManager).
#[derive(Debug, Error)]
pub enum RequestError {
    /// The worker thread has been shut down.
    #[error("path worker has stopped")]
    WorkerStopped,
    /// The worker thread could not be started.
    #[error("failed to spawn path worker")]
    Spawn(#[source] std::io::Error),
}
