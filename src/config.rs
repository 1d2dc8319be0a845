//! Configuration management for boltbench.
//!
//! Configuration is read once at startup from an optional TOML file, then
//! completed from `FIREBOLT_*` environment variables (after loading `.env`),
//! and finally from built-in defaults. The resulting [`Config`] is passed
//! explicitly into the runner.

use crate::error::{BenchError, Result};
use crate::runtime::Runtime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use url::Url;

/// Default Firebolt Core host.
pub const DEFAULT_CORE_HOST: &str = "localhost";

/// Default Firebolt Core HTTP port.
pub const DEFAULT_CORE_PORT: u16 = 3473;

/// Default target database.
pub const DEFAULT_DATABASE: &str = "plg_demo";

/// Default Firebolt Cloud API endpoint.
pub const DEFAULT_API_ENDPOINT: &str = "api.app.firebolt.io";

/// Main configuration structure for boltbench.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Runtime override as written by the user ("cloud" or "core").
    pub runtime: Option<String>,

    /// Target database name.
    pub database: Option<String>,

    /// Firebolt Core (local HTTP endpoint) settings.
    #[serde(default)]
    pub core: CoreConfig,

    /// Firebolt Cloud settings.
    #[serde(default)]
    pub cloud: CloudConfig,
}

/// Firebolt Core connection settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CoreConfig {
    /// Host of the local query endpoint.
    pub host: Option<String>,

    /// Port of the local query endpoint.
    pub port: Option<u16>,

    /// Skip a column-type line directly under the header row.
    pub skip_type_row: Option<bool>,
}

impl CoreConfig {
    /// Returns the configured host or the default.
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_CORE_HOST)
    }

    /// Returns the configured port or the default.
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_CORE_PORT)
    }

    /// Returns true if the type-row heuristic is enabled.
    pub fn skip_type_row(&self) -> bool {
        self.skip_type_row.unwrap_or(false)
    }

    /// Builds the base URL of the local endpoint, e.g. `http://localhost:3473/`.
    pub fn base_url(&self) -> Result<Url> {
        let raw = format!("http://{}:{}/", self.host(), self.port());
        Url::parse(&raw)
            .map_err(|e| BenchError::config(format!("Invalid Firebolt Core address '{raw}': {e}")))
    }
}

/// Firebolt Cloud connection settings.
#[derive(Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CloudConfig {
    /// Service account client id.
    pub client_id: Option<String>,

    /// Service account client secret.
    pub client_secret: Option<String>,

    /// Account name.
    pub account: Option<String>,

    /// Engine name.
    pub engine: Option<String>,

    /// API endpoint host.
    pub api_endpoint: Option<String>,
}

impl CloudConfig {
    /// Returns true if both a client id and a client secret are configured.
    pub fn has_credentials(&self) -> bool {
        let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.is_empty());
        present(&self.client_id) && present(&self.client_secret)
    }

    /// Returns the configured API endpoint or the default.
    pub fn api_endpoint(&self) -> &str {
        self.api_endpoint.as_deref().unwrap_or(DEFAULT_API_ENDPOINT)
    }
}

// Keeps the client secret out of logs.
impl fmt::Debug for CloudConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloudConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &self.client_secret.as_ref().map(|_| "***"))
            .field("account", &self.account)
            .field("engine", &self.engine)
            .field("api_endpoint", &self.api_endpoint)
            .finish()
    }
}

impl Config {
    /// Returns the default config file path for the current platform.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("boltbench")
            .join("config.toml")
    }

    /// Loads the full configuration: config file, `.env`, then process environment.
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = Self::load_from_file(path)?;

        match dotenvy::dotenv() {
            Ok(env_path) => debug!("Loaded environment from {}", env_path.display()),
            Err(e) if e.not_found() => {}
            Err(e) => warn!("Ignoring unreadable .env file: {e}"),
        }

        config.apply_env_defaults();
        Ok(config)
    }

    /// Loads configuration from a TOML file. A missing file yields the defaults.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| BenchError::config(format!("Failed to read config file: {e}")))?;

        Self::parse_toml(&content, path)
    }

    /// Parses configuration from a TOML string.
    pub fn parse_toml(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| {
            BenchError::config(format!(
                "Configuration error in {}:\n  {}",
                path.display(),
                e
            ))
        })
    }

    /// Fills unset fields from the process environment.
    pub fn apply_env_defaults(&mut self) {
        self.apply_defaults_from(|key| std::env::var(key).ok());
    }

    /// Fills unset fields from `lookup`, which maps `FIREBOLT_*` keys to values.
    pub fn apply_defaults_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let fill = |slot: &mut Option<String>, key: &str| {
            if slot.is_none() {
                *slot = lookup(key);
            }
        };

        fill(&mut self.runtime, "FIREBOLT_RUNTIME");
        fill(&mut self.database, "FIREBOLT_DATABASE");
        fill(&mut self.core.host, "FIREBOLT_CORE_HOST");
        fill(&mut self.cloud.client_id, "FIREBOLT_CLIENT_ID");
        fill(&mut self.cloud.client_secret, "FIREBOLT_CLIENT_SECRET");
        fill(&mut self.cloud.account, "FIREBOLT_ACCOUNT");
        fill(&mut self.cloud.engine, "FIREBOLT_ENGINE");
        fill(&mut self.cloud.api_endpoint, "FIREBOLT_API_ENDPOINT");

        if self.core.port.is_none() {
            if let Some(port_str) = lookup("FIREBOLT_CORE_PORT") {
                match port_str.trim().parse() {
                    Ok(port) => self.core.port = Some(port),
                    Err(_) => warn!("Ignoring invalid FIREBOLT_CORE_PORT '{port_str}'"),
                }
            }
        }

        if self.core.skip_type_row.is_none() {
            if let Some(flag) = lookup("FIREBOLT_CORE_TYPE_ROW") {
                self.core.skip_type_row = Some(parse_flag(&flag));
            }
        }
    }

    /// Returns the configured database or the default.
    pub fn database(&self) -> &str {
        self.database.as_deref().unwrap_or(DEFAULT_DATABASE)
    }

    /// Returns the runtime override if it names a recognised runtime.
    pub fn runtime_override(&self) -> Option<Runtime> {
        self.runtime.as_deref().and_then(Runtime::parse)
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
