//! Firebolt Cloud backend.
//!
//! The backend holds a [`CloudConnector`] and opens one [`CloudConnection`]
//! on first use, reusing it until [`Backend::close`]. The built-in connector
//! talks to the Firebolt REST API with service account credentials.

use crate::config::CloudConfig;
use crate::db::{Backend, QueryResult, Row, DISABLE_RESULT_CACHE};
use crate::error::{BenchError, Result};
use crate::runtime::Runtime;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::Client;
use serde::Deserialize;
use std::time::{Duration, Instant};
use tracing::{debug, info};
use url::{form_urlencoded, Url};

/// Request timeout for Firebolt Cloud calls.
const REQUEST_TIMEOUT_SECS: u64 = 300;

/// OAuth audience for Firebolt service accounts.
const AUTH_AUDIENCE: &str = "https://api.firebolt.io";

/// Header carrying a new engine endpoint after `USE ENGINE`.
const UPDATE_ENDPOINT_HEADER: &str = "firebolt-update-endpoint";

/// Header carrying session parameters set by `SET` / `USE` statements.
const UPDATE_PARAMETERS_HEADER: &str = "firebolt-update-parameters";

/// Column names and rows fetched by one statement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cursor {
    /// Column names in result order.
    pub description: Vec<String>,

    /// Row values rendered as text.
    pub rows: Vec<Vec<String>>,
}

/// An open connection to Firebolt Cloud.
#[async_trait]
pub trait CloudConnection: Send {
    /// Executes one statement and fetches all of its rows.
    async fn execute(&mut self, sql: &str) -> Result<Cursor>;

    /// Closes the connection.
    async fn close(&mut self) -> Result<()>;
}

/// Opens connections to Firebolt Cloud.
#[async_trait]
pub trait CloudConnector: Send + Sync {
    /// Authenticates and returns a ready connection.
    async fn connect(&self) -> Result<Box<dyn CloudConnection>>;
}

/// Firebolt Cloud backend with a lazily opened, cached connection.
pub struct CloudBackend {
    connector: Box<dyn CloudConnector>,
    connection: Option<Box<dyn CloudConnection>>,
}

impl CloudBackend {
    /// Creates a backend that connects through `connector` on first query.
    pub fn new(connector: Box<dyn CloudConnector>) -> Self {
        Self {
            connector,
            connection: None,
        }
    }

    /// Returns true while a connection is cached.
    pub fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    async fn connection(&mut self) -> Result<&mut Box<dyn CloudConnection>> {
        if self.connection.is_none() {
            let connection = self.connector.connect().await.map_err(|e| {
                BenchError::connection(format!("Failed to connect to Firebolt Cloud: {e}"))
            })?;
            info!("Connected to Firebolt Cloud");
            self.connection = Some(connection);
        }

        self.connection
            .as_mut()
            .ok_or_else(|| BenchError::internal("Firebolt Cloud connection missing after connect"))
    }
}

#[async_trait]
impl Backend for CloudBackend {
    fn runtime(&self) -> Runtime {
        Runtime::Cloud
    }

    async fn execute(&mut self, sql: &str, disable_cache: bool) -> Result<QueryResult> {
        let connection = self.connection().await?;

        if disable_cache {
            connection.execute(DISABLE_RESULT_CACHE).await?;
        }

        let start = Instant::now();
        let cursor = connection.execute(sql).await?;
        let execution_time_ms = start.elapsed().as_secs_f64() * 1000.0;

        let Cursor { description, rows } = cursor;
        let data = rows
            .into_iter()
            .map(|values| Row::zip(&description[..], values))
            .collect();

        // Scan statistics are not reported through this backend.
        Ok(QueryResult::with_data(description, data).with_execution_time(execution_time_ms))
    }

    async fn close(&mut self) -> Result<()> {
        if let Some(mut connection) = self.connection.take() {
            connection.close().await?;
            debug!("Closed Firebolt Cloud connection");
        }
        Ok(())
    }
}

/// Connector for the Firebolt Cloud REST API.
#[derive(Debug, Clone)]
pub struct FireboltRestConnector {
    config: CloudConfig,
    database: String,
    timeout: Duration,
}

impl FireboltRestConnector {
    /// Creates a connector for the given account settings and database.
    pub fn new(config: CloudConfig, database: impl Into<String>) -> Self {
        Self {
            config,
            database: database.into(),
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
        }
    }

    /// Returns the OAuth token URL derived from the API endpoint.
    pub fn token_url(&self) -> String {
        format!("https://{}/oauth/token", auth_host(self.config.api_endpoint()))
    }

    /// Returns the URL that resolves the account's system engine.
    pub fn engine_lookup_url(&self, account: &str) -> String {
        format!(
            "https://{}/web/v3/account/{}/engineUrl",
            self.config.api_endpoint(),
            account
        )
    }

    async fn fetch_token(&self, http: &Client, client_id: &str, secret: &str) -> Result<String> {
        let form = form_urlencoded::Serializer::new(String::new())
            .append_pair("grant_type", "client_credentials")
            .append_pair("audience", AUTH_AUDIENCE)
            .append_pair("client_id", client_id)
            .append_pair("client_secret", secret)
            .finish();

        let response = http
            .post(self.token_url())
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(form)
            .send()
            .await
            .map_err(|e| BenchError::driver(format!("Authentication request failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| BenchError::driver(format!("Failed to read auth response: {e}")))?;

        if !status.is_success() {
            return Err(BenchError::driver(format!(
                "Authentication failed ({status}): {body}"
            )));
        }

        let token: TokenResponse = serde_json::from_str(&body)
            .map_err(|e| BenchError::driver(format!("Failed to parse auth response: {e}")))?;
        Ok(token.access_token)
    }

    async fn fetch_system_engine(&self, http: &Client, token: &str, account: &str) -> Result<Url> {
        let response = http
            .get(self.engine_lookup_url(account))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| BenchError::driver(format!("Engine lookup failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| BenchError::driver(format!("Failed to read engine lookup: {e}")))?;

        if !status.is_success() {
            return Err(BenchError::driver(format!(
                "Engine lookup failed ({status}): {body}"
            )));
        }

        let lookup: EngineUrlResponse = serde_json::from_str(&body)
            .map_err(|e| BenchError::driver(format!("Failed to parse engine lookup: {e}")))?;
        engine_url(&lookup.engine_url)
    }
}

#[async_trait]
impl CloudConnector for FireboltRestConnector {
    async fn connect(&self) -> Result<Box<dyn CloudConnection>> {
        let client_id = required(&self.config.client_id, "FIREBOLT_CLIENT_ID")?;
        let secret = required(&self.config.client_secret, "FIREBOLT_CLIENT_SECRET")?;
        let account = required(&self.config.account, "FIREBOLT_ACCOUNT")?;

        let http = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| BenchError::driver(format!("Failed to create HTTP client: {e}")))?;

        // TODO: refresh the access token when it expires during long benchmark runs
        let token = self.fetch_token(&http, client_id, secret).await?;
        let endpoint = self.fetch_system_engine(&http, &token, account).await?;
        debug!("Resolved system engine endpoint {endpoint}");

        let mut connection = RestConnection {
            http,
            token,
            endpoint,
            params: vec![("database".to_string(), self.database.clone())],
        };

        if let Some(engine) = self.config.engine.as_deref().filter(|e| !e.is_empty()) {
            connection
                .execute(&format!("USE ENGINE \"{}\"", engine.replace('"', "\"\"")))
                .await?;
            debug!("Switched to engine {engine} at {}", connection.endpoint);
        }

        Ok(Box::new(connection))
    }
}

/// A session against a Firebolt Cloud engine endpoint.
struct RestConnection {
    http: Client,
    token: String,
    endpoint: Url,
    params: Vec<(String, String)>,
}

impl RestConnection {
    fn query_url(&self) -> Url {
        let mut url = self.endpoint.clone();
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &self.params {
                pairs.append_pair(key, value);
            }
            pairs.append_pair("output_format", "JSON_Compact");
        }
        url
    }

    fn set_param(&mut self, key: &str, value: &str) {
        match self.params.iter_mut().find(|(k, _)| k == key) {
            Some(slot) => slot.1 = value.to_string(),
            None => self.params.push((key.to_string(), value.to_string())),
        }
    }

    /// Follows session updates the engine sends back in response headers.
    fn apply_session_headers(&mut self, headers: &HeaderMap) -> Result<()> {
        if let Some(raw) = headers.get(UPDATE_ENDPOINT_HEADER).and_then(|v| v.to_str().ok()) {
            let updated = engine_url(raw)?;
            for (key, value) in updated.query_pairs() {
                self.set_param(&key, &value);
            }
            let mut endpoint = updated;
            endpoint.set_query(None);
            self.endpoint = endpoint;
        }

        if let Some(raw) = headers
            .get(UPDATE_PARAMETERS_HEADER)
            .and_then(|v| v.to_str().ok())
        {
            for pair in raw.split(',') {
                if let Some((key, value)) = pair.split_once('=') {
                    self.set_param(key.trim(), value.trim());
                }
            }
        }

        Ok(())
    }
}

#[async_trait]
impl CloudConnection for RestConnection {
    async fn execute(&mut self, sql: &str) -> Result<Cursor> {
        let response = self
            .http
            .post(self.query_url())
            .bearer_auth(&self.token)
            .header(CONTENT_TYPE, "text/plain")
            .body(sql.to_string())
            .send()
            .await
            .map_err(|e| BenchError::driver(format!("Request failed: {e}")))?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .text()
            .await
            .map_err(|e| BenchError::driver(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(BenchError::driver(body));
        }

        self.apply_session_headers(&headers)?;
        parse_compact(&body)
    }

    async fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Parses a `JSON_Compact` response body into a cursor.
fn parse_compact(body: &str) -> Result<Cursor> {
    if body.trim().is_empty() {
        return Ok(Cursor::default());
    }

    let response: CompactResponse = serde_json::from_str(body)
        .map_err(|e| BenchError::driver(format!("Failed to parse response: {e}")))?;

    if let Some(errors) = response.errors.filter(|errors| !errors.is_empty()) {
        let message = errors
            .iter()
            .map(|e| e.description.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        return Err(BenchError::driver(message));
    }

    Ok(Cursor {
        description: response.meta.into_iter().map(|m| m.name).collect(),
        rows: response
            .data
            .into_iter()
            .map(|row| row.iter().map(render_value).collect())
            .collect(),
    })
}

fn render_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => "NULL".to_string(),
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Maps the API host to the identity host, e.g. `api.app.firebolt.io` to `id.app.firebolt.io`.
fn auth_host(api_endpoint: &str) -> String {
    let host = api_endpoint
        .trim_start_matches("https://")
        .trim_end_matches('/');
    match host.strip_prefix("api.") {
        Some(rest) => format!("id.{rest}"),
        None => format!("id.{host}"),
    }
}

/// Parses an engine address that may omit its scheme.
fn engine_url(raw: &str) -> Result<Url> {
    let raw = raw.trim();
    let with_scheme = if raw.starts_with("http://") || raw.starts_with("https://") {
        raw.to_string()
    } else {
        format!("https://{raw}")
    };
    Url::parse(&with_scheme)
        .map_err(|e| BenchError::driver(format!("Invalid engine endpoint '{raw}': {e}")))
}

fn required<'a>(value: &'a Option<String>, key: &str) -> Result<&'a str> {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| BenchError::driver(format!("{key} is not set")))
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct EngineUrlResponse {
    #[serde(rename = "engineUrl")]
    engine_url: String,
}

#[derive(Debug, Deserialize)]
struct CompactResponse {
    #[serde(default)]
    meta: Vec<ColumnMeta>,
    #[serde(default)]
    data: Vec<Vec<serde_json::Value>>,
    #[serde(default)]
    errors: Option<Vec<EngineError>>,
}

#[derive(Debug, Deserialize)]
struct ColumnMeta {
    name: String,
}

#[derive(Debug, Deserialize)]
struct EngineError {
    #[serde(default)]
    description: String,
}
