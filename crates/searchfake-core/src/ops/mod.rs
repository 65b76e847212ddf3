//! The operation set: simulated backend behavior as pure functions.
//!
//! Every function takes the store (shared or exclusive, depending on
//! whether it mutates) and returns `Ok(Outcome)` on success or a
//! [`SimError`](crate::error::SimError) describing the failure. None of
//! them know about the mock override or about locking; the
//! [`Engine`](crate::engine::Engine) handles both.

pub mod alias;
pub mod index;
pub mod query;

use serde_json::{Value, json};

/// Body returned by mutations that only acknowledge.
pub(crate) fn acknowledged() -> Value {
    json!({ "acknowledged": true })
}
