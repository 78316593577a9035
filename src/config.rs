//! Configuration loader and schema types.
//!
//! This module exposes the configuration schema (API credential and endpoints,
//! download layout, filter rules, UI and logging) and helpers to load it from
//! disk and the environment.

mod load;
mod schema;

pub use schema::*;
