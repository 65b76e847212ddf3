//! Axum router construction for the searchfake API.
//!
//! Assembles the route table into a single [`Router`]. Every response,
//! including errors and fallbacks, carries the `X-Elastic-Product` header
//! that official clients check before accepting a reply.

use std::sync::Arc;

use axum::Router;
use axum::http::{HeaderName, HeaderValue};
use axum::routing::{get, head, post, put};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Header name clients use to verify they are talking to the real product.
pub const PRODUCT_HEADER: &str = "x-elastic-product";

/// Value reported in [`PRODUCT_HEADER`].
pub const PRODUCT_NAME: &str = "Elasticsearch";

/// Build the complete Axum router for the searchfake server.
///
/// Unknown paths and known paths with the wrong method both fall through
/// to [`handlers::no_route`], which answers `400`.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::service_info))
        // Index lifecycle
        .route(
            "/{index}",
            head(handlers::index_exists)
                .put(handlers::create_index)
                .delete(handlers::delete_index),
        )
        .route("/_cat/indices/{pattern}", get(handlers::cat_indices))
        // Aliases
        .route("/{index}/_alias", get(handlers::aliases_for_index))
        .route("/_alias/{alias}", get(handlers::index_for_alias))
        .route(
            "/{index}/_aliases/{alias}",
            put(handlers::put_alias).delete(handlers::delete_alias),
        )
        // Queries
        .route("/{index}/_search", post(handlers::search))
        .route("/{index}/_search/template", post(handlers::search_template))
        .route("/{index}/_count", post(handlers::count))
        .fallback(handlers::no_route)
        .method_not_allowed_fallback(handlers::no_route)
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static(PRODUCT_HEADER),
            HeaderValue::from_static(PRODUCT_NAME),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
