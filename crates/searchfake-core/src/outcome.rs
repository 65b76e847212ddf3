//! Operation results and the canned mock override.
//!
//! Operations never produce transport types. They return an [`Outcome`]
//! (status code, status text, body) and the dispatcher alone decides how
//! to put it on the wire.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SimError;

/// Body of an [`Outcome`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutcomeBody {
    /// No body (e.g. `HEAD` responses).
    Empty,
    /// A structured body serialized by the dispatcher.
    Json(Value),
    /// A pre-serialized body written verbatim.
    Raw(String),
}

impl OutcomeBody {
    /// Whether there is nothing to write.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Json(_) => false,
            Self::Raw(raw) => raw.is_empty(),
        }
    }
}

/// The result of one simulated operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// HTTP-style status code.
    pub status: u16,
    /// Status text (reason phrase).
    pub status_text: String,
    /// Response body.
    pub body: OutcomeBody,
}

impl Outcome {
    /// `200 OK` with a JSON body.
    pub fn ok(body: Value) -> Self {
        Self::with_status(200, OutcomeBody::Json(body))
    }

    /// `200 OK` with no body.
    pub fn ok_empty() -> Self {
        Self::with_status(200, OutcomeBody::Empty)
    }

    /// Build an outcome with the canonical status text for `status`.
    pub fn with_status(status: u16, body: OutcomeBody) -> Self {
        Self {
            status,
            status_text: canonical_reason(status).to_owned(),
            body,
        }
    }

    /// Whether the status is in the 2xx range.
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

impl From<SimError> for Outcome {
    fn from(err: SimError) -> Self {
        Self::with_status(err.status(), OutcomeBody::Json(err.to_body()))
    }
}

/// A test-installed canned response returned by every operation.
///
/// Field names follow the JSON shape accepted by callers that load
/// overrides from fixtures: `{"status_code": 418, "status": "I'm a teapot", "body": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MockOverride {
    /// Status code to answer with.
    pub status_code: u16,
    /// Status text to answer with.
    #[serde(default)]
    pub status: String,
    /// Literal response body.
    #[serde(default)]
    pub body: String,
}

impl MockOverride {
    /// An override with a status code and its canonical text, and no body.
    pub fn new(status_code: u16) -> Self {
        Self {
            status_code,
            status: canonical_reason(status_code).to_owned(),
            body: String::new(),
        }
    }

    /// Replace the literal body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Replace the status text.
    #[must_use]
    pub fn with_status_text(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }
}

impl From<&MockOverride> for Outcome {
    fn from(mock: &MockOverride) -> Self {
        let body = if mock.body.is_empty() {
            OutcomeBody::Empty
        } else {
            OutcomeBody::Raw(mock.body.clone())
        };
        Self {
            status: mock.status_code,
            status_text: mock.status.clone(),
            body,
        }
    }
}

/// Reason phrase for the status codes the simulation produces.
fn canonical_reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        409 => "Conflict",
        418 => "I'm a teapot",
        500 => "Internal Server Error",
        _ => "",
    }
}
