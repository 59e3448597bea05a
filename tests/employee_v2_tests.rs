// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! `/api/v2/employees` against a mock search engine.

use axum::http::StatusCode;
use httpmock::prelude::*;
use serde_json::json;
use tower::ServiceExt;

mod common;

#[tokio::test]
async fn test_get_all_fails_on_unreadable_document() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/employees/_search");
            then.status(200).json_body(common::search_hits(vec![
                json!({ "name": "Alice" }),
                json!({ "name": "Broken", "dob": "yesterday" }),
            ]));
        })
        .await;

    let (app, _state) = common::create_mock_app(&server.base_url());
    let response = app
        .oneshot(common::request("GET", "/api/v2/employees"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = common::body_json(response).await;
    assert_eq!(body["error"], "internal_error");
}

#[tokio::test]
async fn test_get_by_id_missing() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/employees/_doc/77");
            then.status(404).json_body(json!({ "_id": "77", "found": false }));
        })
        .await;

    let (app, _state) = common::create_mock_app(&server.base_url());
    let response = app
        .oneshot(common::request("GET", "/api/v2/employees/77"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_missing_still_succeeds() {
    let server = MockServer::start_async().await;
    let delete = server
        .mock_async(|when, then| {
            when.method(DELETE).path("/employees/_doc/2");
            then.status(404).json_body(json!({ "_id": "2", "result": "not_found" }));
        })
        .await;

    let (app, _state) = common::create_mock_app(&server.base_url());
    let response = app
        .oneshot(common::request("DELETE", "/api/v2/employees/2"))
        .await
        .unwrap();

    delete.assert_async().await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_search_uses_first_filter_only() {
    let server = MockServer::start_async().await;
    let search = server
        .mock_async(|when, then| {
            when.method(POST).path("/employees/_search").json_body(json!({
                "query": { "term": { "verified": { "value": "true" } } }
            }));
            then.status(200).json_body(common::search_hits(vec![json!({
                "name": "Dave",
                "verified": true
            })]));
        })
        .await;

    let (app, _state) = common::create_mock_app(&server.base_url());
    let response = app
        .oneshot(common::request(
            "POST",
            "/api/v2/employees/search?verified=true&verified=false&name=Dave",
        ))
        .await
        .unwrap();

    search.assert_async().await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    assert_eq!(body[0]["name"], "Dave");
}

#[tokio::test]
async fn test_metric_aggregation_defaults_to_avg() {
    let server = MockServer::start_async().await;
    let search = server
        .mock_async(|when, then| {
            when.method(POST).path("/employees/_search").json_body(json!({
                "size": 0,
                "aggs": {
                    "skills": {
                        "terms": { "field": "skills.keyword" },
                        "aggs": { "rating": { "avg": { "field": "rating" } } }
                    }
                }
            }));
            then.status(200).json_body(json!({
                "hits": { "hits": [] },
                "aggregations": {
                    "skills": {
                        "buckets": [
                            { "key": "Java", "doc_count": 4, "rating": { "value": 4.25 } },
                            { "key": "Rust", "doc_count": 1, "rating": { "value": null } }
                        ]
                    }
                }
            }));
        })
        .await;

    let (app, _state) = common::create_mock_app(&server.base_url());
    let response = app
        .oneshot(common::request(
            "POST",
            "/api/v2/employees/agg?agg_field=skills&metric_field=rating&sort_order=desc",
        ))
        .await
        .unwrap();

    search.assert_async().await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        common::body_json(response).await,
        json!([
            { "key": "Java", "doc_count": 4, "value": 4.25 },
            { "key": "Rust", "doc_count": 1, "value": null }
        ])
    );
}

#[tokio::test]
async fn test_missing_index_is_not_found() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/employees/_search");
            then.status(404).json_body(json!({
                "error": {
                    "root_cause": [],
                    "type": "index_not_found_exception",
                    "reason": "no such index [employees]"
                },
                "status": 404
            }));
        })
        .await;

    let (app, _state) = common::create_mock_app(&server.base_url());
    let response = app
        .oneshot(common::request("POST", "/api/v2/employees/search?name=Dave"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
