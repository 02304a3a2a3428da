//! Error type shared by every storage strategy.

use thiserror::Error;

/// Errors surfaced by [`StorageStrategy`](crate::store::StorageStrategy)
/// implementations.
///
/// Strategies always report failures explicitly, so "found nothing"
/// (`Ok(None)`) and "the lookup itself failed" (`Err`) stay distinguishable.
/// The absorption policy lives one level up, in
/// [`Collection`](crate::store::Collection), never inside a strategy.
#[derive(Debug, Error)]
pub enum DalError {
    /// Network or database transport failure.
    #[error("transport error: {0}")]
    Transport(String),
    /// The durable local store could not be read or written.
    #[error("local storage error: {0}")]
    Storage(String),
    /// A document or response failed to (de)serialize.
    #[error("malformed document: {0}")]
    Codec(String),
    /// The connectivity probe did not answer in time.
    #[error("backend probe timed out")]
    Timeout,
}

impl From<serde_json::Error> for DalError {
    fn from(err: serde_json::Error) -> Self {
        DalError::Codec(err.to_string())
    }
}

impl From<reqwest::Error> for DalError {
    fn from(err: reqwest::Error) -> Self {
        DalError::Transport(err.to_string())
    }
}

#[cfg(feature = "server")]
impl From<sqlx::Error> for DalError {
    fn from(err: sqlx::Error) -> Self {
        DalError::Transport(err.to_string())
    }
}
