//! Error type shared by the resolver, the catalog fetcher and the downloader.
//!
//! Errors raised while resolving the profile or fetching the catalog end the
//! run. Errors raised while downloading a single track are logged by the
//! downloader and the run moves on to the next track.

use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("cannot find the specified user {handle}: {message}")]
    UserNotFound { handle: String, message: String },

    #[error("unexpected response from {url}: {reason}")]
    UnexpectedResponse { url: String, reason: String },

    #[error("invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("request to {url} failed with status {status}")]
    Status { url: String, status: StatusCode },

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid JSON in API response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to write tags to {path}: {source}")]
    Tag {
        path: PathBuf,
        #[source]
        source: lofty::error::LoftyError,
    },

    #[error("download ended early: expected {expected} bytes, received {received}")]
    Truncated { expected: u64, received: u64 },

    #[error("track has no stream URL")]
    NoStream,

    #[error("no profile handle given")]
    NoHandle,
}

impl Error {
    /// Helper for `map_err` at tag read/write call sites.
    pub fn tag(path: impl Into<PathBuf>) -> impl FnOnce(lofty::error::LoftyError) -> Self {
        let path = path.into();
        move |source| Error::Tag { path, source }
    }
}
