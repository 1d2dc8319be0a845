//! Backend abstraction layer for boltbench.
//!
//! Firebolt Core and Firebolt Cloud are two implementations of one
//! [`Backend`] trait. The runner picks one at construction and never
//! branches on the runtime again.

pub mod cloud;
pub mod http;
mod mock;
mod types;

pub use self::cloud::{CloudBackend, CloudConnection, CloudConnector, Cursor, FireboltRestConnector};
pub use self::http::{parse_tsv, CoreBackend};
pub use mock::{MockBackend, RecordedCall};
pub use types::{QueryResult, Row};

use crate::config::Config;
use crate::error::Result;
use crate::runtime::Runtime;
use async_trait::async_trait;

/// Statement that turns off the result cache for the rest of a request.
pub const DISABLE_RESULT_CACHE: &str = "SET enable_result_cache = FALSE";

/// Creates the backend for the given runtime.
///
/// No network traffic happens here; handles are opened on first use.
pub fn connect(runtime: Runtime, config: &Config) -> Result<Box<dyn Backend>> {
    match runtime {
        Runtime::Core => Ok(Box::new(CoreBackend::new(config)?)),
        Runtime::Cloud => {
            let connector = FireboltRestConnector::new(config.cloud.clone(), config.database());
            Ok(Box::new(CloudBackend::new(Box::new(connector))))
        }
    }
}

/// Trait defining the interface for query backends.
#[async_trait]
pub trait Backend: Send {
    /// Returns the runtime this backend talks to.
    fn runtime(&self) -> Runtime;

    /// Executes a SQL statement and returns its rows and dispatch time.
    ///
    /// With `disable_cache`, the result cache is turned off for this execution.
    async fn execute(&mut self, sql: &str, disable_cache: bool) -> Result<QueryResult>;

    /// Releases any open handles. Safe to call when nothing was opened.
    async fn close(&mut self) -> Result<()>;
}
