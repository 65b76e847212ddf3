//! Error taxonomy for simulated operations.
//!
//! [`SimError`] is never fatal: every variant is turned into a structured
//! response ([`Outcome`](crate::outcome::Outcome)) carrying an HTTP-style
//! status and an Elasticsearch-shaped error body.

use serde_json::{Value, json};

/// Exception type reported when an index is missing.
pub const INDEX_NOT_FOUND: &str = "index_not_found_exception";
/// Exception type reported when an index name is already taken.
pub const RESOURCE_ALREADY_EXISTS: &str = "resource_already_exists_exception";
/// Exception type reported when an alias name is already taken.
pub const INVALID_ALIAS_NAME: &str = "invalid_alias_name_exception";
/// Exception type reported when an alias is missing.
pub const ALIASES_NOT_FOUND: &str = "aliases_not_found_exception";
/// Exception type reported when a request body or pattern cannot be parsed.
pub const PARSING: &str = "parsing_exception";
/// Exception type reported when an operation's dependency is missing.
pub const ILLEGAL_ARGUMENT: &str = "illegal_argument_exception";

/// Failures an operation can report.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SimError {
    /// The addressed entity does not exist.
    #[error("{kind}: {reason}")]
    NotFound {
        /// Exception type name.
        kind: &'static str,
        /// Human-readable reason.
        reason: String,
    },

    /// The entity already exists where uniqueness is required.
    #[error("{kind}: {reason}")]
    Conflict {
        /// Exception type name.
        kind: &'static str,
        /// Human-readable reason.
        reason: String,
    },

    /// The request body or a path parameter could not be parsed.
    #[error("{kind}: {reason}")]
    Malformed {
        /// Exception type name.
        kind: &'static str,
        /// Human-readable reason.
        reason: String,
    },

    /// A dependency of the operation, such as the target index, is missing.
    #[error("{kind}: {reason}")]
    Precondition {
        /// Exception type name.
        kind: &'static str,
        /// Human-readable reason.
        reason: String,
    },
}

impl SimError {
    /// `index_not_found_exception` for the named index.
    pub fn index_not_found(index: &str) -> Self {
        Self::NotFound {
            kind: INDEX_NOT_FOUND,
            reason: format!("no such index [{index}]"),
        }
    }

    /// `parsing_exception` with the given reason.
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::Malformed {
            kind: PARSING,
            reason: reason.into(),
        }
    }

    /// HTTP status code for this error.
    pub const fn status(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::Conflict { .. } => 409,
            Self::Malformed { .. } => 400,
            Self::Precondition { .. } => 500,
        }
    }

    /// Exception type name.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::NotFound { kind, .. }
            | Self::Conflict { kind, .. }
            | Self::Malformed { kind, .. }
            | Self::Precondition { kind, .. } => kind,
        }
    }

    /// Human-readable reason.
    pub fn reason(&self) -> &str {
        match self {
            Self::NotFound { reason, .. }
            | Self::Conflict { reason, .. }
            | Self::Malformed { reason, .. }
            | Self::Precondition { reason, .. } => reason,
        }
    }

    /// Elasticsearch-style error body.
    pub fn to_body(&self) -> Value {
        let cause = json!({
            "type": self.kind(),
            "reason": self.reason(),
        });
        json!({
            "error": {
                "root_cause": [cause],
                "type": self.kind(),
                "reason": self.reason(),
            },
            "status": self.status(),
        })
    }
}
