//! Config struct and loading logic.
//!
//! Priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables
//! 3. `report-relay.toml` in the working directory (or `--config <FILE>`)
//! 4. `~/.config/report-relay/config.toml` (global defaults)
//! 5. Built-in defaults

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::constants;
use crate::env::Env;
use crate::models::request::string_or_number;

/// Errors during config loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ParseFile {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("missing required configuration: {}", .0.join(", "))]
    Missing(Vec<&'static str>),
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Remote API settings, keyed by their upper-case option names.
    pub configs: ServiceConfig,
    pub server: ServerConfig,
    pub templates: TemplateConfig,
    pub binding: BindingConfig,
}

/// The `[configs]` table: remote API identity plus the listen port.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    #[serde(rename = "API_URL")]
    pub api_url: Option<String>,
    #[serde(rename = "TOKEN")]
    pub token: Option<String>,
    #[serde(rename = "STATION", deserialize_with = "string_or_number")]
    pub station: Option<String>,
    #[serde(rename = "COMPANY", deserialize_with = "string_or_number")]
    pub company: Option<String>,
    #[serde(rename = "NET_PASSPORT_ID", deserialize_with = "string_or_number")]
    pub net_passport_id: Option<String>,
    #[serde(rename = "PORT")]
    pub port: Option<u16>,
}

impl std::fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("api_url", &self.api_url)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("station", &self.station)
            .field("company", &self.company)
            .field("net_passport_id", &self.net_passport_id)
            .field("port", &self.port)
            .finish()
    }
}

/// HTTP dispatcher settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: constants::DEFAULT_HOST.to_string(),
        }
    }
}

/// Template store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    pub dir: PathBuf,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(constants::DEFAULT_TEMPLATE_DIR),
        }
    }
}

/// Markers the parameter binder matches against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BindingConfig {
    /// `opName` of the client-identifier slot.
    pub client_marker: String,
    /// Report type whose document-number slot takes `invoiceNumber`.
    pub invoice_report: String,
    /// Substring of the document-number slot's `name`.
    pub document_number_label: String,
}

impl Default for BindingConfig {
    fn default() -> Self {
        Self {
            client_marker: constants::DEFAULT_CLIENT_MARKER.to_string(),
            invoice_report: constants::DEFAULT_INVOICE_REPORT.to_string(),
            document_number_label: constants::DEFAULT_DOCUMENT_NUMBER_LABEL.to_string(),
        }
    }
}

/// Fully resolved remote settings handed to the report pipeline.
#[derive(Clone)]
pub struct RemoteSettings {
    pub api_url: String,
    pub token: String,
    pub station: String,
    pub company: String,
    pub net_passport_id: String,
}

impl std::fmt::Debug for RemoteSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteSettings")
            .field("api_url", &self.api_url)
            .field("token", &"[REDACTED]")
            .field("station", &self.station)
            .field("company", &self.company)
            .field("net_passport_id", &self.net_passport_id)
            .finish()
    }
}

impl Config {
    /// Load configuration with proper layering.
    ///
    /// `explicit` replaces the working-directory lookup and must exist.
    pub fn load(explicit: Option<&Path>, cwd: &Path, env: &Env) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        // Layer 4: global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                let global = Self::load_file(&global_path)?;
                config.merge(global);
            }
        }

        // Layer 3: explicit or working-directory config
        match explicit {
            Some(path) => config.merge(Self::load_file(path)?),
            None => {
                let local_path = cwd.join(constants::CONFIG_FILENAME);
                if local_path.exists() {
                    config.merge(Self::load_file(&local_path)?);
                }
            }
        }

        // Layer 2: environment variables
        config.apply_env_vars(env);

        Ok(config)
    }

    /// Load a config from a specific file.
    fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseFile {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the global config file path.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(constants::CONFIG_DIR).join("config.toml"))
    }

    /// Merge another config into this one (other takes precedence for set or
    /// non-default values).
    fn merge(&mut self, other: Config) {
        let c = other.configs;
        if c.api_url.is_some() {
            self.configs.api_url = c.api_url;
        }
        if c.token.is_some() {
            self.configs.token = c.token;
        }
        if c.station.is_some() {
            self.configs.station = c.station;
        }
        if c.company.is_some() {
            self.configs.company = c.company;
        }
        if c.net_passport_id.is_some() {
            self.configs.net_passport_id = c.net_passport_id;
        }
        if c.port.is_some() {
            self.configs.port = c.port;
        }

        if other.server.host != ServerConfig::default().host {
            self.server.host = other.server.host;
        }
        if other.templates.dir != TemplateConfig::default().dir {
            self.templates.dir = other.templates.dir;
        }

        let default_binding = BindingConfig::default();
        if other.binding.client_marker != default_binding.client_marker {
            self.binding.client_marker = other.binding.client_marker;
        }
        if other.binding.invoice_report != default_binding.invoice_report {
            self.binding.invoice_report = other.binding.invoice_report;
        }
        if other.binding.document_number_label != default_binding.document_number_label {
            self.binding.document_number_label = other.binding.document_number_label;
        }
    }

    /// Apply environment variable overrides.
    fn apply_env_vars(&mut self, env: &Env) {
        if let Some(val) = env.get(constants::ENV_API_URL) {
            self.configs.api_url = Some(val);
        }
        if let Some(val) = env.get(constants::ENV_TOKEN) {
            self.configs.token = Some(val);
        }
        if let Some(val) = env.get(constants::ENV_STATION) {
            self.configs.station = Some(val);
        }
        if let Some(val) = env.get(constants::ENV_COMPANY) {
            self.configs.company = Some(val);
        }
        if let Some(val) = env.get(constants::ENV_NET_PASSPORT_ID) {
            self.configs.net_passport_id = Some(val);
        }
        match env.parse::<u16>(constants::ENV_PORT) {
            Some(Ok(port)) => self.configs.port = Some(port),
            Some(Err(raw)) => {
                tracing::warn!("ignoring invalid {} value: {raw}", constants::ENV_PORT);
            }
            None => {}
        }
        if let Some(val) = env.get(constants::ENV_HOST) {
            self.server.host = val;
        }
        if let Some(val) = env.get(constants::ENV_TEMPLATE_DIR) {
            self.templates.dir = PathBuf::from(val);
        }
    }

    /// Listen port, falling back to the built-in default.
    pub fn port(&self) -> u16 {
        self.configs.port.unwrap_or(constants::DEFAULT_PORT)
    }

    /// Resolve the remote settings, naming every missing key at once.
    pub fn remote(&self) -> Result<RemoteSettings, ConfigError> {
        let c = &self.configs;
        let required: [(&'static str, &Option<String>); 5] = [
            (constants::ENV_API_URL, &c.api_url),
            (constants::ENV_TOKEN, &c.token),
            (constants::ENV_STATION, &c.station),
            (constants::ENV_COMPANY, &c.company),
            (constants::ENV_NET_PASSPORT_ID, &c.net_passport_id),
        ];
        let missing: Vec<&'static str> = required
            .iter()
            .filter(|(_, v)| v.as_deref().is_none_or(|s| s.trim().is_empty()))
            .map(|(k, _)| *k)
            .collect();
        if !missing.is_empty() {
            return Err(ConfigError::Missing(missing));
        }

        // Every field was checked above.
        let get = |v: &Option<String>| v.clone().unwrap_or_default();
        Ok(RemoteSettings {
            api_url: get(&c.api_url),
            token: get(&c.token),
            station: get(&c.station),
            company: get(&c.company),
            net_passport_id: get(&c.net_passport_id),
        })
    }
}
