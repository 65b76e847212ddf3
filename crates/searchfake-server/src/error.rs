//! Error types for the request dispatcher.
//!
//! [`DispatchError`] covers the failures that are decided before any
//! engine operation runs. It converts into an Axum response via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation; both
//! variants answer `400`.

use axum::http::{Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use searchfake_core::SimError;

/// Errors raised by the dispatcher itself.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// The request body could not be parsed into the expected shape.
    #[error("malformed request body: {0}")]
    MalformedBody(#[from] SimError),

    /// No route matches the method and path.
    #[error("no handler found for uri [{uri}] and method [{method}]")]
    NoRoute {
        /// Request method.
        method: Method,
        /// Request URI.
        uri: Uri,
    },
}

impl IntoResponse for DispatchError {
    fn into_response(self) -> Response {
        let body = match &self {
            Self::MalformedBody(e) => e.to_body(),
            Self::NoRoute { .. } => serde_json::json!({
                "error": self.to_string(),
                "status": StatusCode::BAD_REQUEST.as_u16(),
            }),
        };

        (StatusCode::BAD_REQUEST, axum::Json(body)).into_response()
    }
}
