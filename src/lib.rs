//! report-relay — fills report templates, signs them and relays them to a
//! reporting API (library crate).
//!
//! Re-exports public modules for integration tests and the binary.

pub mod binder;
pub mod client;
pub mod config;
pub mod constants;
pub mod env;
pub mod logging;
pub mod models;
pub mod normalize;
pub mod reports;
pub mod server;
pub mod signature;
pub mod templates;
