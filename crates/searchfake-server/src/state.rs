//! Shared application state for the dispatcher.
//!
//! [`AppState`] holds a handle to the engine and the static service
//! descriptor. The engine does its own locking.

use std::sync::Arc;

use searchfake_core::Engine;

use crate::config::ServiceInfo;

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`] and injected via Axum's `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The simulation engine every handler dispatches to.
    pub engine: Arc<Engine>,
    /// Metadata served by `GET /`.
    pub service: ServiceInfo,
}

impl AppState {
    /// Create state around an existing engine.
    pub const fn new(engine: Arc<Engine>, service: ServiceInfo) -> Self {
        Self { engine, service }
    }
}
