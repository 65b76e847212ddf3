//! Simulation engine for the searchfake in-memory search backend.
//!
//! This crate holds everything with real state and precedence logic:
//!
//! - **State store** ([`store`]) -- indices, their aliases, and the
//!   documents seeded into each index
//! - **Mock override** ([`outcome::MockOverride`]) -- an optional canned
//!   response that short-circuits every operation
//! - **Operation set** ([`ops`]) -- the simulated index, alias, and query
//!   behavior, written as pure functions over the store
//! - **Engine** ([`Engine`]) -- the lock-guarded entry point that consults
//!   the override, runs an operation, and returns an [`Outcome`]
//!
//! # Architecture
//!
//! The engine owns its store and override behind Tokio read-write locks so
//! a single instance can be shared by every concurrent request handler,
//! and several instances can live side by side in one test process without
//! seeing each other's state. Nothing here touches the network; the
//! `searchfake-server` crate maps HTTP requests onto [`Engine`] calls.

pub mod engine;
pub mod error;
pub mod ops;
pub mod outcome;
pub mod request;
pub mod store;

// Re-export primary types for convenience.
pub use engine::Engine;
pub use error::SimError;
pub use outcome::{MockOverride, Outcome, OutcomeBody};
pub use request::{CountRequest, SearchRequest, SearchTemplateRequest};
pub use store::{Document, IndexRecord, Store};
