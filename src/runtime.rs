//! Runtime selection between Firebolt Cloud and Firebolt Core.
//!
//! Resolution order:
//! 1. Explicit caller choice
//! 2. Runtime named in configuration (`cloud` or `core`)
//! 3. A Firebolt Core endpoint answering HTTP 200
//! 4. Cloud credentials present
//! 5. Firebolt Core

use crate::config::{Config, CoreConfig};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::debug;

/// Timeout for the Firebolt Core reachability probe.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// The backend a runner talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Runtime {
    /// Hosted Firebolt Cloud, reached through the cloud connector.
    Cloud,
    /// Local Firebolt Core HTTP endpoint.
    Core,
}

impl Runtime {
    /// Returns the runtime as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cloud => "cloud",
            Self::Core => "core",
        }
    }

    /// Parses a runtime name, ignoring case and surrounding whitespace.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "cloud" => Some(Self::Cloud),
            "core" => Some(Self::Core),
            _ => None,
        }
    }
}

impl fmt::Display for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolves which runtime to use.
pub async fn detect_runtime(requested: Option<Runtime>, config: &Config) -> Runtime {
    if let Some(runtime) = requested {
        debug!("Using requested runtime: {runtime}");
        return runtime;
    }

    if let Some(runtime) = config.runtime_override() {
        debug!("Using configured runtime: {runtime}");
        return runtime;
    }

    if probe_core(&config.core, PROBE_TIMEOUT).await {
        debug!(
            "Firebolt Core reachable at {}:{}",
            config.core.host(),
            config.core.port()
        );
        return Runtime::Core;
    }

    if config.cloud.has_credentials() {
        debug!("Cloud credentials present");
        return Runtime::Cloud;
    }

    Runtime::Core
}

/// Returns true if a Firebolt Core endpoint answers `GET /` with HTTP 200.
///
/// Every failure, including a client that cannot be built, counts as unreachable.
pub async fn probe_core(core: &CoreConfig, timeout: Duration) -> bool {
    let url = match core.base_url() {
        Ok(url) => url,
        Err(e) => {
            debug!("Skipping Firebolt Core probe: {e}");
            return false;
        }
    };

    let client = match Client::builder().timeout(timeout).build() {
        Ok(client) => client,
        Err(e) => {
            debug!("Failed to build probe client: {e}");
            return false;
        }
    };

    match client.get(url).send().await {
        Ok(response) => response.status() == StatusCode::OK,
        Err(e) => {
            debug!("Firebolt Core probe failed: {e}");
            false
        }
    }
}
