//! In-process stand-in for a Firebolt Core endpoint.

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::Router;
use boltbench::config::{Config, CoreConfig};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

/// A request the stub received.
#[derive(Debug, Clone)]
pub struct Captured {
    pub params: HashMap<String, String>,
    pub headers: HeaderMap,
    pub body: String,
}

#[derive(Clone)]
struct StubState {
    probe_status: StatusCode,
    status: StatusCode,
    response: String,
    requests: Arc<Mutex<Vec<Captured>>>,
}

/// A running stub server.
pub struct Stub {
    pub addr: SocketAddr,
    requests: Arc<Mutex<Vec<Captured>>>,
}

impl Stub {
    /// Starts a stub that answers every POST with `status` and `response`.
    pub async fn start(status: StatusCode, response: &str) -> Self {
        Self::start_with_probe(StatusCode::OK, status, response).await
    }

    /// Starts a stub whose `GET /` answers with `probe_status`.
    pub async fn start_with_probe(
        probe_status: StatusCode,
        status: StatusCode,
        response: &str,
    ) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = StubState {
            probe_status,
            status,
            response: response.to_string(),
            requests: requests.clone(),
        };

        let app = Router::new()
            .route("/", get(handle_probe).post(handle_query))
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, requests }
    }

    /// Returns a configuration pointing Firebolt Core at this stub.
    pub fn config(&self) -> Config {
        core_config(self.addr.port())
    }

    /// Returns every request received so far.
    pub fn requests(&self) -> Vec<Captured> {
        self.requests.lock().unwrap().clone()
    }
}

/// Returns a configuration pointing Firebolt Core at `127.0.0.1:port`.
pub fn core_config(port: u16) -> Config {
    Config {
        core: CoreConfig {
            host: Some("127.0.0.1".to_string()),
            port: Some(port),
            skip_type_row: None,
        },
        ..Default::default()
    }
}

/// Returns a local port with nothing listening on it.
pub async fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap().port()
}

async fn handle_probe(State(state): State<StubState>) -> StatusCode {
    state.probe_status
}

async fn handle_query(
    State(state): State<StubState>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, String) {
    state.requests.lock().unwrap().push(Captured {
        params,
        headers,
        body,
    });
    (state.status, state.response.clone())
}
