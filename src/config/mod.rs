//! Configuration loading and layering.
//!
//! Handles `report-relay.toml` loading, environment variable resolution,
//! and CLI flag merging with proper priority ordering.

pub mod loader;

pub use loader::{BindingConfig, Config, ConfigError, RemoteSettings};
