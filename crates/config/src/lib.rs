//! Configuration management for the tutorial tracker.
//!
//! This crate provides types and a loader for the backend connection settings
//! used by the analytics client, read from `.env` files, environment variables
//! and explicit overrides.

pub mod constants;
mod loader;
pub mod types;

pub use loader::{ConfigError, ConfigLoader, env_var_or_none};
pub use types::{BackendConfig, Config};
