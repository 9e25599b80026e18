//! CLI command implementations.

pub mod id;
pub mod migrate;
