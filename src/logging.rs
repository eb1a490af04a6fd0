//! Structured logging setup.
//!
//! `RUST_LOG` always wins. Without it, the `-v` count picks the level.

use tracing_subscriber::EnvFilter;

/// Default filter for a verbosity level.
pub fn default_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "info,hyper=warn,reqwest=warn",
        1 => "debug,hyper=info,reqwest=info",
        _ => "trace",
    }
}

/// Install the global fmt subscriber. Safe to call once per process.
pub fn init(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
