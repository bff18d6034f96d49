///----------------------------------------------------------------------------------------------------
/// The author disclaims copyright to this source code. In place of a legal notice, here is a blessing:
///     May you do good and not evil.
///     May you find forgiveness for yourself and forgive others.
///     May you share freely, never taking more than you give.
///----------------------------------------------------------------------------------------------------
/// Error types for streams and comparisons. A "not equal" verdict is never an error; these only
/// cover the plumbing around it.
///----------------------------------------------------------------------------------------------------
use crossbeam::channel::SendError;
use thiserror::Error;

/// Failures surfaced by the streams in `crate::sync`.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamError {
    /// The receiving end was dropped, so nobody will ever read what is sent.
    #[error("receiving end of the stream is gone")]
    Disconnected,

    #[error("deadline passed before the stream was ready")]
    Timeout,
}

// A failed send only ever means the reader hung up; the unsent value is dropped.
impl<T> From<SendError<T>> for StreamError {
    fn from(_: SendError<T>) -> Self {
        StreamError::Disconnected
    }
}

#[derive(Error, Debug)]
pub enum CompareError {
    #[error("failed to build emitter pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
}
