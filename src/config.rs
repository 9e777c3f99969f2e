//! Configuration loader and schema types.
//!
//! This module exposes the configuration schema used to drive runtime
//! behavior and helpers to locate the config file and data directory.

mod load;
mod schema;

pub use schema::*;
