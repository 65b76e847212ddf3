//! Request bodies for the search-style operations.
//!
//! Bodies are parsed before any operation runs. A body that does not fit
//! the expected shape is a [`SimError::Malformed`] (`400`).

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::SimError;

/// A request body that can be parsed from raw bytes.
pub trait RequestBody: Sized {
    /// Parse the body, rejecting anything that is not the expected shape.
    fn parse(bytes: &[u8]) -> Result<Self, SimError>;
}

/// Body of `POST /{index}/_search`.
///
/// The query expression is free-form and never evaluated. Keys other
/// than the ones named here are kept in `extra` and ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Query expression.
    #[serde(default)]
    pub query: Option<Value>,
    /// Requested page size (number or numeric string).
    #[serde(default)]
    pub size: Option<Value>,
    /// Requested offset (number or numeric string).
    #[serde(default)]
    pub from: Option<Value>,
    /// Remaining top-level keys.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RequestBody for SearchRequest {
    fn parse(bytes: &[u8]) -> Result<Self, SimError> {
        decode_or_default(bytes)
    }
}

/// Body of `POST /{index}/_count`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountRequest {
    /// Query expression.
    #[serde(default)]
    pub query: Option<Value>,
    /// Remaining top-level keys.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RequestBody for CountRequest {
    fn parse(bytes: &[u8]) -> Result<Self, SimError> {
        decode_or_default(bytes)
    }
}

/// Body of `POST /{index}/_search/template`.
///
/// Names either a stored template (`id`) or an inline one (`source`),
/// plus the named parameters to render it with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchTemplateRequest {
    /// Stored template identifier.
    #[serde(default)]
    pub id: Option<String>,
    /// Inline template.
    #[serde(default)]
    pub source: Option<Value>,
    /// Named template parameters.
    #[serde(default)]
    pub params: Map<String, Value>,
}

impl SearchTemplateRequest {
    /// Reference a stored template by id.
    pub fn stored(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    /// Add a named parameter.
    #[must_use]
    pub fn param(mut self, name: impl Into<String>, value: Value) -> Self {
        self.params.insert(name.into(), value);
        self
    }
}

impl RequestBody for SearchTemplateRequest {
    fn parse(bytes: &[u8]) -> Result<Self, SimError> {
        if is_blank(bytes) {
            return Err(SimError::malformed("request body is required"));
        }
        let request: Self = decode(bytes)?;
        if request.id.is_none() && request.source.is_none() {
            return Err(SimError::malformed(
                "search template requires either [id] or [source]",
            ));
        }
        Ok(request)
    }
}

fn is_blank(bytes: &[u8]) -> bool {
    bytes.iter().all(u8::is_ascii_whitespace)
}

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, SimError> {
    serde_json::from_slice(bytes)
        .map_err(|e| SimError::malformed(format!("failed to parse request body: {e}")))
}

fn decode_or_default<T: DeserializeOwned + Default>(bytes: &[u8]) -> Result<T, SimError> {
    if is_blank(bytes) {
        return Ok(T::default());
    }
    decode(bytes)
}
