//! Local side of the archive: file naming and deciding what still needs downloading.
//!
//! The destination directory is the only record of past runs. A track counts
//! as downloaded exactly when `<dir>/<sanitized title>.mp3` exists.

mod filter;
mod model;
mod sanitize;

pub use filter::{FilterRules, Partition, partition};
pub use model::Track;
pub use sanitize::sanitize;
