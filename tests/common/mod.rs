// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::{to_bytes, Body};
use axum::http::{Request, Response};
use employee_search::config::Config;
use employee_search::db::ElasticClient;
use employee_search::routes::create_router;
use employee_search::AppState;
use std::sync::Arc;

/// Index name used by tests that talk to a mock search engine.
#[allow(dead_code)]
pub const TEST_INDEX: &str = "employees";

/// Create a test app with an offline search client.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    build_app(ElasticClient::new_mock())
}

/// Create a test app whose search client points at `base_url`
/// (typically an `httpmock::MockServer`).
#[allow(dead_code)]
pub fn create_mock_app(base_url: &str) -> (axum::Router, Arc<AppState>) {
    build_app(ElasticClient::with_base_url(base_url, TEST_INDEX))
}

#[allow(dead_code)]
fn build_app(client: ElasticClient) -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(Config::default(), client));
    (create_router(state.clone()), state)
}

/// Build a request with an empty body.
#[allow(dead_code)]
pub fn request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Build a request with a JSON body.
#[allow(dead_code)]
pub fn json_request(method: &str, uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// A `_search` response with the given `_source` documents as hits.
#[allow(dead_code)]
pub fn search_hits(sources: Vec<serde_json::Value>) -> serde_json::Value {
    let hits: Vec<serde_json::Value> = sources
        .into_iter()
        .enumerate()
        .map(|(i, source)| {
            serde_json::json!({
                "_index": TEST_INDEX,
                "_id": (i + 1).to_string(),
                "_score": 1.0,
                "_source": source
            })
        })
        .collect();

    serde_json::json!({
        "took": 2,
        "timed_out": false,
        "hits": {
            "total": { "value": hits.len(), "relation": "eq" },
            "max_score": 1.0,
            "hits": hits
        }
    })
}
