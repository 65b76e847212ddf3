//! Server lifecycle: a non-blocking start and an idempotent stop.
//!
//! [`SearchFakeServer`] is meant to live inside a test. `start` binds the
//! listener and returns once the socket is accepting connections, so the
//! caller can point a client at [`SearchFakeServer::local_addr`] straight
//! away. The serve loop runs on a spawned task.

use std::net::SocketAddr;
use std::sync::Arc;

use searchfake_core::Engine;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::config::ServerConfig;
use crate::router::build_router;
use crate::state::AppState;

/// Errors that can occur when starting the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Failed to bind to the network address.
    #[error("bind error: {0}")]
    Bind(String),

    /// `start` was called while the server was already serving.
    #[error("server already running on {0}")]
    AlreadyRunning(SocketAddr),
}

#[derive(Debug)]
struct Running {
    addr: SocketAddr,
    task: JoinHandle<()>,
}

/// An in-process simulated search backend.
///
/// The [`Engine`] outlives individual start/stop cycles: documents seeded
/// before `start`, or left behind by a previous run, stay visible.
#[derive(Debug)]
pub struct SearchFakeServer {
    config: ServerConfig,
    engine: Arc<Engine>,
    running: Mutex<Option<Running>>,
}

impl SearchFakeServer {
    /// Create a stopped server with an empty engine.
    pub fn new(config: ServerConfig) -> Self {
        Self::with_engine(config, Arc::new(Engine::new()))
    }

    /// Create a stopped server around an existing engine.
    pub fn with_engine(config: ServerConfig, engine: Arc<Engine>) -> Self {
        Self {
            config,
            engine,
            running: Mutex::new(None),
        }
    }

    /// The engine behind this server, for seeding and mock control.
    pub const fn engine(&self) -> &Arc<Engine> {
        &self.engine
    }

    /// The configuration this server was built with.
    pub const fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Bind the listener and start serving in the background.
    ///
    /// Returns the bound address, which differs from the configured one
    /// when the configured port is `0`.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::AlreadyRunning`] if a previous `start` has
    /// not been stopped, or [`ServerError::Bind`] if the address cannot
    /// be bound.
    pub async fn start(&self) -> Result<SocketAddr, ServerError> {
        let mut running = self.running.lock().await;
        if let Some(current) = running.as_ref() {
            return Err(ServerError::AlreadyRunning(current.addr));
        }

        let listener = TcpListener::bind((self.config.host.as_str(), self.config.port))
            .await
            .map_err(|e| ServerError::Bind(format!("bind failed on {}: {e}", self.config.address())))?;
        let addr = listener
            .local_addr()
            .map_err(|e| ServerError::Bind(format!("no local address: {e}")))?;

        let state = Arc::new(AppState::new(
            Arc::clone(&self.engine),
            self.config.service.clone(),
        ));
        let router = build_router(state);

        let task = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                error!(%addr, error = %e, "searchfake server stopped with error");
            }
        });

        info!(%addr, "searchfake server listening");
        *running = Some(Running { addr, task });
        Ok(addr)
    }

    /// Stop serving and release the listening socket.
    ///
    /// Safe to call any number of times, including before `start`.
    /// Returns `true` if a running server was stopped by this call.
    pub async fn stop(&self) -> bool {
        let Some(Running { addr, task }) = self.running.lock().await.take() else {
            debug!("stop called on a server that is not running");
            return false;
        };

        task.abort();
        // The listener is dropped with the task; wait for that to happen.
        if let Err(e) = task.await {
            if !e.is_cancelled() {
                error!(%addr, error = %e, "searchfake server task failed");
            }
        }

        info!(%addr, "searchfake server stopped");
        true
    }

    /// The address currently being served, if running.
    pub async fn local_addr(&self) -> Option<SocketAddr> {
        self.running.lock().await.as_ref().map(|r| r.addr)
    }

    /// Whether the server is currently serving.
    pub async fn is_running(&self) -> bool {
        self.running.lock().await.is_some()
    }

    /// `http://host:port` for the running server, if any.
    pub async fn base_url(&self) -> Option<String> {
        self.local_addr().await.map(|addr| format!("http://{addr}"))
    }
}

impl Drop for SearchFakeServer {
    fn drop(&mut self) {
        if let Some(Running { task, .. }) = self.running.get_mut().take() {
            task.abort();
        }
    }
}
