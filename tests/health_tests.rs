// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Health probes and documentation routes.

use axum::http::StatusCode;
use httpmock::prelude::*;
use serde_json::json;
use tower::ServiceExt;

mod common;

#[tokio::test]
async fn test_health_check() {
    let (app, _state) = common::create_test_app();

    let response = app
        .oneshot(common::request("GET", "/health"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("X-Content-Type-Options").unwrap(),
        "nosniff"
    );
    let body = common::body_json(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_ready_when_cluster_is_green() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/_cluster/health");
            then.status(200)
                .json_body(json!({ "cluster_name": "es", "status": "green" }));
        })
        .await;

    let (app, _state) = common::create_mock_app(&server.base_url());
    let response = app
        .oneshot(common::request("GET", "/health/ready"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers().get("cache-control").unwrap(), "no-store");
    let body = common::body_json(response).await;
    assert_eq!(body, json!({ "status": "ready", "cluster_status": "green" }));
}

#[tokio::test]
async fn test_not_ready_when_cluster_is_red() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/_cluster/health");
            then.status(200)
                .json_body(json!({ "cluster_name": "es", "status": "red" }));
        })
        .await;

    let (app, _state) = common::create_mock_app(&server.base_url());
    let response = app
        .oneshot(common::request("GET", "/health/ready"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_not_ready_when_offline() {
    let (app, _state) = common::create_test_app();

    let response = app
        .oneshot(common::request("GET", "/health/ready"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = common::body_json(response).await;
    assert_eq!(body, json!({ "status": "unavailable" }));
}

#[tokio::test]
async fn test_openapi_document_served() {
    let (app, _state) = common::create_test_app();

    let response = app
        .oneshot(common::request("GET", "/v3/api-docs"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    assert!(body["paths"]["/api/v1/employees/{id}"].is_object());
    assert!(body["paths"]["/api/v2/employees/agg"]["post"].is_object());
}

#[tokio::test]
async fn test_cors_allows_only_known_origins() {
    let (app, _state) = common::create_test_app();

    for (origin, allowed) in [
        ("http://localhost:3000", true),
        ("http://127.0.0.1:8080", true),
        ("http://localhost.evil.example", false),
        ("https://evil.example", false),
    ] {
        let request = axum::http::Request::builder()
            .uri("/health")
            .header("Origin", origin)
            .body(axum::body::Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();

        let header = response.headers().get("access-control-allow-origin");
        assert_eq!(header.is_some(), allowed, "{}", origin);
        if allowed {
            assert_eq!(header.unwrap(), origin);
        }
    }
}
