//! SoundCloud API access: resolving a handle to its catalog and paging through it.
//!
//! `SoundCloudClient` is a thin blocking wrapper over `reqwest`. It knows the
//! three endpoints the archiver needs (resolve, profile, track listing) and
//! opens media streams for the downloader.

mod client;
mod model;

pub use client::SoundCloudClient;
pub use model::*;

#[cfg(test)]
mod tests;
