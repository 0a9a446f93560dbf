// system-tests/tests/helpers/hub_stub.rs
// ============================================================================
// Module: Stub Hub
// Description: Minimal hub application exercising the harness contract.
// Purpose: Serve login, spawn, and health endpoints over the mock
// collaborators.
// Dependencies: axum, gatehub-core, gatehub-mocks, reqwest, rusqlite, tokio
// ============================================================================

//! ## Overview
//! The stub hub implements the full `HubApp` lifecycle: a rusqlite user
//! store at the harness-supplied storage URL, an axum server on an ephemeral
//! loopback port, and a readiness probe against its own health endpoint. The
//! login endpoint gates on the mock authenticator; the spawn endpoint runs
//! the configured mock spawner under the spawner's own advertised start
//! bound, which is how the orchestrator-side timeout path is exercised.

use std::net::IpAddr;
use std::net::Ipv4Addr;
use std::net::SocketAddr;
use std::net::TcpListener as StdTcpListener;
use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::time::Duration;

use async_trait::async_trait;
use axum::Form;
use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::header;
use axum::response::IntoResponse;
use axum::response::Json;
use axum::response::Response;
use axum::routing::get;
use axum::routing::post;
use gatehub_core::Authenticator;
use gatehub_core::FormData;
use gatehub_core::HubApp;
use gatehub_core::HubArgs;
use gatehub_core::HubError;
use gatehub_core::HubRoutes;
use gatehub_core::ProxyRoutes;
use gatehub_core::Spawner;
use gatehub_core::app::storage_path_from_url;
use gatehub_mocks::MockAuthenticator;
use gatehub_mocks::MockSpawner;
use serde::Deserialize;
use tokio::sync::Mutex;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tokio::time::timeout;

/// Session cookie name issued by the stub hub.
pub const SESSION_COOKIE: &str = "gatehub-session";

/// Bound on the stub hub's own readiness polling.
const REACHABILITY_BOUND: Duration = Duration::from_secs(5);

/// Shared state behind the stub hub's axum handlers.
#[derive(Clone)]
struct HubState {
    /// Login gate.
    authenticator: Arc<MockAuthenticator>,
    /// Spawner for the seeded user's server.
    spawner: Arc<Mutex<MockSpawner>>,
    /// Monotonic token source for session cookies.
    next_token: Arc<AtomicU64>,
}

/// Handle onto the serving task, consumed on stop.
struct ServeHandle {
    /// Graceful shutdown trigger.
    shutdown: oneshot::Sender<()>,
    /// Serving task join handle.
    task: JoinHandle<()>,
}

/// Minimal hub application driven by the harness in system tests.
pub struct StubHub {
    /// Login gate shared with the handlers.
    authenticator: Arc<MockAuthenticator>,
    /// Spawner shared with the handlers.
    spawner: Arc<Mutex<MockSpawner>>,
    /// Shared subdomain host, when subdomain routing is under test.
    subdomain_host: Option<String>,
    /// User store; open between initialize and cleanup. The mutex exists
    /// only to make the hub `Sync` for the trait's `Send` futures.
    storage: Option<std::sync::Mutex<rusqlite::Connection>>,
    /// Address to bind, taken from the harness arguments.
    bind_ip: IpAddr,
    /// Bound endpoint address once serving.
    bound: Option<SocketAddr>,
    /// Serving task, present while the hub runs.
    serve: Option<ServeHandle>,
    /// Session token source.
    next_token: Arc<AtomicU64>,
    /// Number of completed cleanup passes, observable from tests.
    cleanup_runs: Arc<AtomicUsize>,
}

impl StubHub {
    /// Builds a stub hub over a mock spawner with path-based routing.
    pub fn new(spawner: MockSpawner) -> Self {
        Self::with_subdomain_host(spawner, None)
    }

    /// Builds a stub hub with an explicit routing mode.
    pub fn with_subdomain_host(spawner: MockSpawner, subdomain_host: Option<String>) -> Self {
        Self {
            authenticator: Arc::new(MockAuthenticator::default()),
            spawner: Arc::new(Mutex::new(spawner)),
            subdomain_host,
            storage: None,
            bind_ip: IpAddr::V4(Ipv4Addr::LOCALHOST),
            bound: None,
            serve: None,
            next_token: Arc::new(AtomicU64::new(1)),
            cleanup_runs: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Returns the counter of completed cleanup passes.
    pub fn cleanup_runs(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.cleanup_runs)
    }
}

#[async_trait]
impl HubApp for StubHub {
    async fn initialize(&mut self, args: &HubArgs) -> Result<(), HubError> {
        let path = storage_path_from_url(&args.storage_url)
            .ok_or_else(|| HubError::Storage(format!("opaque storage url: {}", args.storage_url)))?;
        let connection =
            rusqlite::Connection::open(path).map_err(|err| HubError::Storage(err.to_string()))?;
        connection
            .execute("CREATE TABLE IF NOT EXISTS users (name TEXT PRIMARY KEY)", [])
            .map_err(|err| HubError::Storage(err.to_string()))?;
        self.storage = Some(std::sync::Mutex::new(connection));
        self.bind_ip = args.bind_ip;
        Ok(())
    }

    async fn seed_user(&mut self, name: &str) -> Result<(), HubError> {
        let connection = self.storage.as_ref().ok_or(HubError::NotRunning)?;
        let connection =
            connection.lock().map_err(|err| HubError::Storage(err.to_string()))?;
        connection
            .execute("INSERT OR IGNORE INTO users (name) VALUES (?1)", [name])
            .map_err(|err| HubError::Storage(err.to_string()))?;
        Ok(())
    }

    async fn start(&mut self) -> Result<(), HubError> {
        let listener = StdTcpListener::bind((self.bind_ip, 0))
            .map_err(|err| HubError::Network(err.to_string()))?;
        listener.set_nonblocking(true).map_err(|err| HubError::Network(err.to_string()))?;
        let bound = listener.local_addr().map_err(|err| HubError::Network(err.to_string()))?;

        let state = HubState {
            authenticator: Arc::clone(&self.authenticator),
            spawner: Arc::clone(&self.spawner),
            next_token: Arc::clone(&self.next_token),
        };
        let router = Router::new()
            .route("/hub/login", post(login))
            .route("/hub/spawn", post(spawn))
            .route("/hub/health", get(health))
            .with_state(state);

        let listener = tokio::net::TcpListener::from_std(listener)
            .map_err(|err| HubError::Network(err.to_string()))?;
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let server = axum::serve(listener, router).with_graceful_shutdown(async move {
            let _ = shutdown_rx.await;
        });
        let task = tokio::spawn(async move {
            let _ = server.await;
        });

        self.bound = Some(bound);
        self.serve = Some(ServeHandle {
            shutdown: shutdown_tx,
            task,
        });
        Ok(())
    }

    async fn wait_until_reachable(&self) -> Result<(), HubError> {
        let bound = self.bound.ok_or(HubError::NotRunning)?;
        let probe = format!("http://{bound}/hub/health");
        let client = reqwest::Client::new();
        let deadline = tokio::time::Instant::now() + REACHABILITY_BOUND;
        loop {
            match client.get(&probe).send().await {
                Ok(response) if response.status().is_success() => return Ok(()),
                _ if tokio::time::Instant::now() >= deadline => {
                    return Err(HubError::Network(format!("endpoint never answered: {probe}")));
                }
                _ => sleep(Duration::from_millis(25)).await,
            }
        }
    }

    async fn stop(&mut self) -> Result<(), HubError> {
        let handle = self.serve.take().ok_or(HubError::NotRunning)?;
        let _ = handle.shutdown.send(());
        handle.task.await.map_err(|err| HubError::Network(err.to_string()))?;
        Ok(())
    }

    async fn cleanup(&mut self) -> Result<(), HubError> {
        if let Some(connection) = self.storage.take() {
            let connection =
                connection.into_inner().map_err(|err| HubError::Storage(err.to_string()))?;
            connection.close().map_err(|(_, err)| HubError::Storage(err.to_string()))?;
        }
        self.cleanup_runs.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn routes(&self) -> HubRoutes {
        HubRoutes {
            subdomain_host: self.subdomain_host.clone(),
            proxy: ProxyRoutes {
                host: self.bound.map_or_else(|| "127.0.0.1:0".to_string(), |addr| addr.to_string()),
                base_path: "/".to_string(),
            },
        }
    }
}

/// Login form fields.
#[derive(Debug, Deserialize)]
struct LoginForm {
    /// Submitted username.
    username: String,
    /// Submitted password.
    password: String,
}

/// Gates a login on the mock authenticator and sets the session cookie.
async fn login(State(state): State<HubState>, Form(form): Form<LoginForm>) -> Response {
    match state.authenticator.authenticate(&form.username, &form.password).await {
        Ok(user) => {
            let token = state.next_token.fetch_add(1, Ordering::Relaxed);
            let cookie = format!("{SESSION_COOKIE}={}-{token}; Path=/", user.name);
            (
                StatusCode::FOUND,
                [
                    (header::SET_COOKIE, cookie),
                    (header::LOCATION, "/hub/".to_string()),
                ],
            )
                .into_response()
        }
        Err(err) => (StatusCode::FORBIDDEN, err.to_string()).into_response(),
    }
}

/// Starts the seeded user's server under the spawner's advertised bound.
///
/// A timed-out start leaves the spawner pinned in `Starting`; a repeated
/// request re-enters `start` from that state and times out the same way.
async fn spawn(State(state): State<HubState>, Form(fields): Form<Vec<(String, String)>>) -> Response {
    let mut form = FormData::new();
    for (key, value) in fields {
        form.entry(key).or_default().push(value);
    }
    let mut spawner = state.spawner.lock().await;
    let options = spawner.options_from_form(&form);
    let bound = spawner.start_timeout();
    match timeout(bound, spawner.start()).await {
        Ok(Ok(())) => (StatusCode::ACCEPTED, Json(options)).into_response(),
        Ok(Err(err)) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response(),
        Err(_) => (StatusCode::GATEWAY_TIMEOUT, "spawn timed out".to_string()).into_response(),
    }
}

/// Readiness probe target.
async fn health() -> &'static str {
    "ok"
}
