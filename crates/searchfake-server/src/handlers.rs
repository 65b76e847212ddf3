//! REST API endpoint handlers for the searchfake server.
//!
//! Each handler extracts its path parameters (and body, where there is
//! one), calls exactly one [`Engine`](searchfake_core::Engine) operation,
//! and renders the resulting [`Outcome`].
//!
//! # Endpoints
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | `GET` | `/` | Service descriptor |
//! | `HEAD` | `/{index}` | Index exists |
//! | `PUT` | `/{index}` | Create index |
//! | `DELETE` | `/{index}` | Delete index |
//! | `GET` | `/_cat/indices/{pattern}` | List indices matching pattern |
//! | `GET` | `/{index}/_alias` | Aliases for index |
//! | `GET` | `/_alias/{alias}` | Index for alias |
//! | `PUT` | `/{index}/_aliases/{alias}` | Bind alias |
//! | `DELETE` | `/{index}/_aliases/{alias}` | Unbind alias |
//! | `POST` | `/{index}/_search` | Search |
//! | `POST` | `/{index}/_search/template` | Search template |
//! | `POST` | `/{index}/_count` | Count |

use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{HeaderValue, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use searchfake_core::request::RequestBody;
use searchfake_core::{CountRequest, Outcome, OutcomeBody, SearchRequest, SearchTemplateRequest};
use tracing::warn;

use crate::error::DispatchError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Write an [`Outcome`] to an HTTP response.
///
/// JSON bodies are serialized here; raw bodies (from a mock override) are
/// written verbatim. Any non-empty body is labelled `application/json`.
/// A status code outside `100..=999` cannot be sent and becomes `500`.
pub fn render(outcome: Outcome) -> Response {
    let status = StatusCode::from_u16(outcome.status).unwrap_or_else(|e| {
        warn!(status = outcome.status, error = %e, "Outcome carries an invalid status code");
        StatusCode::INTERNAL_SERVER_ERROR
    });

    match outcome.body {
        OutcomeBody::Json(value) => (status, Json(value)).into_response(),
        OutcomeBody::Raw(raw) if !raw.is_empty() => (
            status,
            [(
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            )],
            raw,
        )
            .into_response(),
        OutcomeBody::Raw(_) | OutcomeBody::Empty => status.into_response(),
    }
}

fn parse<T: RequestBody>(body: &Bytes) -> Result<T, DispatchError> {
    Ok(T::parse(body)?)
}

// ---------------------------------------------------------------------------
// GET / -- service descriptor
// ---------------------------------------------------------------------------

/// Static name/version/cluster metadata. Not affected by the mock override.
#[allow(clippy::unused_async)]
pub async fn service_info(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.service.descriptor())
}

// ---------------------------------------------------------------------------
// Index lifecycle
// ---------------------------------------------------------------------------

/// `HEAD /{index}`.
pub async fn index_exists(
    State(state): State<Arc<AppState>>,
    Path(index): Path<String>,
) -> Response {
    render(state.engine.index_exists(&index).await)
}

/// `PUT /{index}`.
pub async fn create_index(
    State(state): State<Arc<AppState>>,
    Path(index): Path<String>,
) -> Response {
    render(state.engine.create_index(&index).await)
}

/// `DELETE /{index}`.
pub async fn delete_index(
    State(state): State<Arc<AppState>>,
    Path(index): Path<String>,
) -> Response {
    render(state.engine.delete_index(&index).await)
}

/// `GET /_cat/indices/{pattern}`.
pub async fn cat_indices(
    State(state): State<Arc<AppState>>,
    Path(pattern): Path<String>,
) -> Response {
    render(state.engine.list_indices(&pattern).await)
}

// ---------------------------------------------------------------------------
// Alias lifecycle
// ---------------------------------------------------------------------------

/// `GET /{index}/_alias`.
pub async fn aliases_for_index(
    State(state): State<Arc<AppState>>,
    Path(index): Path<String>,
) -> Response {
    render(state.engine.aliases_for_index(&index).await)
}

/// `GET /_alias/{alias}`.
pub async fn index_for_alias(
    State(state): State<Arc<AppState>>,
    Path(alias): Path<String>,
) -> Response {
    render(state.engine.index_for_alias(&alias).await)
}

/// `PUT /{index}/_aliases/{alias}`.
pub async fn put_alias(
    State(state): State<Arc<AppState>>,
    Path((index, alias)): Path<(String, String)>,
) -> Response {
    render(state.engine.put_alias(&index, &alias).await)
}

/// `DELETE /{index}/_aliases/{alias}`.
pub async fn delete_alias(
    State(state): State<Arc<AppState>>,
    Path((index, alias)): Path<(String, String)>,
) -> Response {
    render(state.engine.delete_alias(&index, &alias).await)
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// `POST /{index}/_search`.
pub async fn search(
    State(state): State<Arc<AppState>>,
    Path(index): Path<String>,
    body: Bytes,
) -> Result<Response, DispatchError> {
    let request: SearchRequest = parse(&body)?;
    Ok(render(state.engine.search(&index, &request).await))
}

/// `POST /{index}/_search/template`.
pub async fn search_template(
    State(state): State<Arc<AppState>>,
    Path(index): Path<String>,
    body: Bytes,
) -> Result<Response, DispatchError> {
    let request: SearchTemplateRequest = parse(&body)?;
    Ok(render(state.engine.search_template(&index, &request).await))
}

/// `POST /{index}/_count`.
pub async fn count(
    State(state): State<Arc<AppState>>,
    Path(index): Path<String>,
    body: Bytes,
) -> Result<Response, DispatchError> {
    let request: CountRequest = parse(&body)?;
    Ok(render(state.engine.count(&index, &request).await))
}

// ---------------------------------------------------------------------------
// Fallback
// ---------------------------------------------------------------------------

/// Any method/path combination outside the route table.
#[allow(clippy::unused_async)]
pub async fn no_route(method: Method, uri: Uri) -> DispatchError {
    DispatchError::NoRoute { method, uri }
}
