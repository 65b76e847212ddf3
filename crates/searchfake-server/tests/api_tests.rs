//! Integration tests for the searchfake API endpoints.
//!
//! Tests drive the Axum `Router` directly via `tower::ServiceExt`
//! without starting a TCP server. Seeding and mock control go through the
//! shared [`Engine`] handle, as a test harness would use it.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use searchfake_core::{Document, Engine, MockOverride};
use searchfake_server::router::{PRODUCT_HEADER, build_router};
use searchfake_server::{AppState, ServiceInfo};
use serde_json::{Value, json};
use tower::ServiceExt;

fn make_app() -> (Router, Arc<Engine>) {
    let engine = Arc::new(Engine::new());
    let state = Arc::new(AppState::new(Arc::clone(&engine), ServiceInfo::default()));
    (build_router(state), engine)
}

fn request(method: Method, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_owned()))
        .unwrap()
}

async fn send(app: &Router, method: Method, uri: &str, body: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(request(method, uri, body))
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn docs(count: usize) -> Vec<Document> {
    (0..count)
        .map(|i| Document::new(format!("doc-{i}"), 1.0, json!({ "n": i })))
        .collect()
}

// ---------------------------------------------------------------------------
// Service descriptor and protocol
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_root_returns_descriptor() {
    let (app, _) = make_app();
    let (status, body) = send(&app, Method::GET, "/", "").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["version"]["number"], "8.0.0");
    assert_eq!(body["tagline"], "You Know, for Search");
}

#[tokio::test]
async fn test_every_response_carries_product_header() {
    let (app, _) = make_app();

    for (method, uri) in [
        (Method::GET, "/"),
        (Method::HEAD, "/missing"),
        (Method::GET, "/no/such/route/here"),
        (Method::PATCH, "/orders"),
    ] {
        let response = app
            .clone()
            .oneshot(request(method, uri, ""))
            .await
            .unwrap();
        assert_eq!(
            response.headers().get(PRODUCT_HEADER).unwrap(),
            "Elasticsearch"
        );
    }
}

#[tokio::test]
async fn test_unknown_route_is_bad_request() {
    let (app, _) = make_app();
    let (status, body) = send(&app, Method::GET, "/a/b/c/d", "").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
}

#[tokio::test]
async fn test_wrong_method_is_bad_request() {
    let (app, _) = make_app();
    let (status, _) = send(&app, Method::GET, "/orders/_search", "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Index lifecycle
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_index_lifecycle() {
    let (app, _) = make_app();

    let (status, body) = send(&app, Method::HEAD, "/orders", "").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, Value::Null);

    let (status, body) = send(&app, Method::PUT, "/orders", "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["acknowledged"], true);

    let (status, _) = send(&app, Method::HEAD, "/orders", "").await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, Method::PUT, "/orders", "").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["type"], "resource_already_exists_exception");

    let (status, _) = send(&app, Method::DELETE, "/orders", "").await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, Method::DELETE, "/orders", "").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], 404);
}

#[tokio::test]
async fn test_cat_indices_matches_pattern() {
    let (app, engine) = make_app();
    engine.seed_documents("logs-2024", docs(3)).await;
    engine.seed_documents("logs-2025", docs(1)).await;
    engine.seed_documents("metrics", docs(0)).await;

    let (status, body) = send(&app, Method::GET, "/_cat/indices/logs-.*", "").await;
    assert_eq!(status, StatusCode::OK);

    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows.first().unwrap()["index"], "logs-2024");
    assert_eq!(rows.first().unwrap()["docs.count"], "3");
}

#[tokio::test]
async fn test_cat_indices_without_match_is_not_found() {
    let (app, engine) = make_app();
    engine.seed_documents("metrics", docs(0)).await;

    let (status, _) = send(&app, Method::GET, "/_cat/indices/logs", "").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Aliases
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_alias_exclusive_binding() {
    let (app, engine) = make_app();
    send(&app, Method::PUT, "/p", "").await;
    send(&app, Method::PUT, "/q", "").await;

    let (status, _) = send(&app, Method::PUT, "/p/_aliases/p-alias", "").await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, Method::PUT, "/q/_aliases/p-alias", "").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(engine.alias_target("p-alias").await.as_deref(), Some("p"));

    let (status, body) = send(&app, Method::GET, "/_alias/p-alias", "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "p": { "aliases": { "p-alias": {} } } }));

    let (status, body) = send(&app, Method::GET, "/p/_alias", "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "p": { "aliases": { "p-alias": {} } } }));

    let (status, _) = send(&app, Method::DELETE, "/p/_aliases/p-alias", "").await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, Method::DELETE, "/p/_aliases/p-alias", "").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_alias_on_missing_index_is_server_error() {
    let (app, _) = make_app();
    let (status, _) = send(&app, Method::PUT, "/ghost/_aliases/a", "").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_search_on_empty_index() {
    let (app, _) = make_app();
    send(&app, Method::PUT, "/orders", "").await;

    let (status, body) = send(&app, Method::POST, "/orders/_search", "{}").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["hits"]["total"]["value"], 0);
    assert_eq!(body["hits"]["hits"], json!([]));

    let (status, body) = send(&app, Method::POST, "/orders/_count", "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn test_search_caps_hits_at_ten() {
    let (app, engine) = make_app();
    engine.seed_documents("products", docs(15)).await;

    let query = r#"{"query":{"match_all":{}}}"#;
    let (status, body) = send(&app, Method::POST, "/products/_search", query).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["hits"]["total"]["value"], 15);
    assert_eq!(body["hits"]["hits"].as_array().unwrap().len(), 10);

    let (_, body) = send(&app, Method::POST, "/products/_count", query).await;
    assert_eq!(body["count"], 15);
}

#[tokio::test]
async fn test_search_template() {
    let (app, engine) = make_app();
    engine.seed_documents("products", docs(2)).await;

    let template = r#"{"id":"templateId","params":{"q":"shoes"}}"#;
    let (status, body) = send(&app, Method::POST, "/products/_search/template", template).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["hits"]["total"]["value"], 2);
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let (app, engine) = make_app();
    engine.seed_documents("products", docs(1)).await;

    let (status, body) = send(&app, Method::POST, "/products/_search", "{badRequest}").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);

    let (status, _) = send(&app, Method::POST, "/products/_search/template", "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_search_missing_index_is_not_found() {
    let (app, _) = make_app();
    let (status, body) = send(&app, Method::POST, "/nope/_search", "{}").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["type"], "index_not_found_exception");
}

// ---------------------------------------------------------------------------
// Mock override
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_mock_override_short_circuits_everything() {
    let (app, engine) = make_app();
    engine
        .set_mock_override(MockOverride::new(418).with_body(r#"{"teapot":true}"#))
        .await;

    let calls = [
        (Method::HEAD, "/orders", ""),
        (Method::PUT, "/orders", ""),
        (Method::DELETE, "/orders", ""),
        (Method::GET, "/_cat/indices/.*", ""),
        (Method::PUT, "/orders/_aliases/a", ""),
        (Method::POST, "/orders/_search", "{}"),
        (Method::POST, "/orders/_count", "{}"),
    ];
    for (method, uri, body) in calls {
        let response = app
            .clone()
            .oneshot(request(method, uri, body))
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 418);
    }

    assert!(engine.index_names().await.is_empty());
    assert!(engine.alias_target("a").await.is_none());

    engine.clear_mock_override().await;
    let (status, _) = send(&app, Method::PUT, "/orders", "").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_mock_override_body_is_verbatim_json() {
    let (app, engine) = make_app();
    engine
        .set_mock_override(MockOverride::new(500).with_body(r#"{"error":"boom"}"#))
        .await;

    let response = app
        .clone()
        .oneshot(request(Method::POST, "/orders/_search", "{}"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/json"
    );
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(bytes.as_ref(), br#"{"error":"boom"}"#.as_slice());
}

#[tokio::test]
async fn test_mock_override_does_not_touch_descriptor() {
    let (app, engine) = make_app();
    engine.set_mock_override(MockOverride::new(503)).await;

    let (status, body) = send(&app, Method::GET, "/", "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["version"]["number"], "8.0.0");
}
