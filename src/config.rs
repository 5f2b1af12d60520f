//! Configuration module
//!
//! This module handles loading and managing gh-buddy configuration from TOML files.

pub mod loader;
pub mod schema;

pub use schema::{BranchConfig, Config, GitConfig, PrConfig};
