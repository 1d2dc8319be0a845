//! Firebolt Core backend.
//!
//! Sends raw SQL over HTTP to a local Firebolt Core endpoint and parses the
//! tab-separated response.

use crate::config::Config;
use crate::db::{Backend, QueryResult, Row, DISABLE_RESULT_CACHE};
use crate::error::{BenchError, Result};
use crate::runtime::Runtime;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::debug;
use url::Url;

/// Request timeout for queries against Firebolt Core.
const QUERY_TIMEOUT_SECS: u64 = 300;

/// Firebolt Core HTTP backend.
#[derive(Debug)]
pub struct CoreBackend {
    base_url: Url,
    database: String,
    skip_type_row: bool,
    timeout: Duration,
    client: Option<Client>,
}

impl CoreBackend {
    /// Creates a backend from configuration. The HTTP client is built on first query.
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            base_url: config.core.base_url()?,
            database: config.database().to_string(),
            skip_type_row: config.core.skip_type_row(),
            timeout: Duration::from_secs(QUERY_TIMEOUT_SECS),
            client: None,
        })
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns true once the HTTP client has been created and not yet closed.
    pub fn is_open(&self) -> bool {
        self.client.is_some()
    }

    /// Returns the query URL including the fixed `database` and `advanced_mode` parameters.
    pub fn query_url(&self) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("database", &self.database)
            .append_pair("advanced_mode", "1");
        url
    }

    fn client(&mut self) -> Result<Client> {
        if let Some(client) = &self.client {
            return Ok(client.clone());
        }

        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| BenchError::query(format!("Failed to create HTTP client: {e}")))?;
        debug!("Created Firebolt Core client for {}", self.base_url);
        self.client = Some(client.clone());
        Ok(client)
    }
}

#[async_trait]
impl Backend for CoreBackend {
    fn runtime(&self) -> Runtime {
        Runtime::Core
    }

    async fn execute(&mut self, sql: &str, disable_cache: bool) -> Result<QueryResult> {
        let client = self.client()?;
        let body = request_body(sql, disable_cache);
        let url = self.query_url();

        let start = Instant::now();
        let response = client
            .post(url)
            .header(CONTENT_TYPE, "text/plain")
            .body(body)
            .send()
            .await
            .map_err(|e| BenchError::query(format!("Query execution error: {e}")))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| BenchError::query(format!("Query execution error: {e}")))?;
        let execution_time_ms = start.elapsed().as_secs_f64() * 1000.0;

        if !status.is_success() {
            debug!("Firebolt Core returned {status}");
            return Err(BenchError::query(format!("Query failed: {text}")));
        }

        let (columns, data) = parse_tsv(&text, self.skip_type_row);
        debug!(
            "Firebolt Core returned {} rows in {:.1}ms",
            data.len(),
            execution_time_ms
        );

        Ok(QueryResult::with_data(columns, data).with_execution_time(execution_time_ms))
    }

    async fn close(&mut self) -> Result<()> {
        if self.client.take().is_some() {
            debug!("Closed Firebolt Core client");
        }
        Ok(())
    }
}

/// Builds the request body, prefixing the cache-disable statement when requested.
fn request_body(sql: &str, disable_cache: bool) -> String {
    if disable_cache {
        format!("{DISABLE_RESULT_CACHE};\n{sql}")
    } else {
        sql.to_string()
    }
}

/// Parses a tab-separated response: a header line, then one line per row.
///
/// Blank lines are skipped and every value stays text. With `skip_type_row`,
/// a second line whose first field starts with `text` is treated as a
/// column-type line and dropped.
pub fn parse_tsv(body: &str, skip_type_row: bool) -> (Vec<String>, Vec<Row>) {
    let body = body.trim_matches(|c| c == '\n' || c == '\r');
    if body.trim().is_empty() {
        return (Vec::new(), Vec::new());
    }

    let mut lines = body.lines().map(|line| line.trim_end_matches('\r'));
    let columns: Vec<String> = match lines.next() {
        Some(header) => header.split('\t').map(str::to_string).collect(),
        None => return (Vec::new(), Vec::new()),
    };

    let mut lines = lines.peekable();
    if skip_type_row {
        if let Some(next) = lines.peek() {
            let first = next.split('\t').next().unwrap_or_default();
            if first.trim().to_lowercase().starts_with("text") {
                lines.next();
            }
        }
    }

    let rows = lines
        .filter(|line| !line.trim().is_empty())
        .map(|line| Row::zip(&columns[..], line.split('\t')))
        .collect();

    (columns, rows)
}
