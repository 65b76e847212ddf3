//! HTTP front end for the searchfake simulation engine.
//!
//! This crate provides an Axum HTTP server that exposes the simulated
//! administrative and query REST API:
//!
//! - **Index endpoints** (`HEAD`/`PUT`/`DELETE /{index}`,
//!   `GET /_cat/indices/{pattern}`)
//! - **Alias endpoints** (`GET /{index}/_alias`, `GET /_alias/{alias}`,
//!   `PUT`/`DELETE /{index}/_aliases/{alias}`)
//! - **Query endpoints** (`POST /{index}/_search`,
//!   `POST /{index}/_search/template`, `POST /{index}/_count`)
//! - **Service descriptor** (`GET /`)
//!
//! # Architecture
//!
//! The dispatcher is stateless: handlers extract path parameters, parse
//! bodies, call one [`Engine`](searchfake_core::Engine) operation, and
//! render the returned [`Outcome`](searchfake_core::Outcome). All state
//! and all precedence rules (mock override first, then the store) live in
//! `searchfake-core`. [`SearchFakeServer`] owns the listening socket and
//! can be started and stopped from inside a test.

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

// Re-export primary types for convenience.
pub use config::{ConfigError, LoggingConfig, ServerConfig, ServiceInfo};
pub use router::build_router;
pub use server::{SearchFakeServer, ServerError};
pub use state::AppState;
