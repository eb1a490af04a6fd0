//! App-wide constants.
//!
//! Centralises the service name, config paths, environment variable names,
//! and the fixed markers the binder looks for so a rename only requires
//! changing this file.

/// Display name of the service (lowercase).
pub const APP_NAME: &str = "report-relay";

/// Crate version, baked in at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Compilation target triple (set by `build.rs`).
pub const TARGET: &str = env!("TARGET");

/// Local config filename, looked up in the working directory.
pub const CONFIG_FILENAME: &str = "report-relay.toml";

/// Directory name under `~/.config/` for global config.
pub const CONFIG_DIR: &str = "report-relay";

/// Default directory holding `<type>.txt` templates.
pub const DEFAULT_TEMPLATE_DIR: &str = "reports";

/// File extension of template files.
pub const TEMPLATE_EXTENSION: &str = "txt";

/// Default listen port for the HTTP dispatcher.
pub const DEFAULT_PORT: u16 = 3000;

/// Default bind address for the HTTP dispatcher.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Plugin name placed in every outbound envelope.
pub const PLUGIN_NAME: &str = "reports";

/// Default `opName` that marks the client-identifier slot.
pub const DEFAULT_CLIENT_MARKER: &str = "client_id";

/// Default report type that accepts an invoice number.
pub const DEFAULT_INVOICE_REPORT: &str = "invoice";

/// Default label substring identifying the document-number slot.
pub const DEFAULT_DOCUMENT_NUMBER_LABEL: &str = "document number";

/// Display format for dates (zero-padded month/day/year).
pub const DATE_FORMAT: &str = "%m/%d/%Y";

// ── Environment variable names ──────────────────────────────────────

pub const ENV_API_URL: &str = "API_URL";
pub const ENV_TOKEN: &str = "TOKEN";
pub const ENV_STATION: &str = "STATION";
pub const ENV_COMPANY: &str = "COMPANY";
pub const ENV_NET_PASSPORT_ID: &str = "NET_PASSPORT_ID";
pub const ENV_PORT: &str = "PORT";
pub const ENV_HOST: &str = "RELAY_HOST";
pub const ENV_TEMPLATE_DIR: &str = "RELAY_TEMPLATE_DIR";
