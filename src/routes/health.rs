// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Liveness and readiness probes.

use crate::AppState;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/ready", get(ready))
}

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub build_id: String,
}

/// Health check response
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses((status = 200, description = "Server is alive", body = HealthResponse))
)]
pub async fn health_check() -> Json<HealthResponse> {
    let build_id = option_env!("BUILD_ID").unwrap_or("unknown").to_string();
    Json(HealthResponse {
        status: "ok".to_string(),
        build_id,
    })
}

#[derive(Serialize, ToSchema)]
pub struct ReadyResponse {
    pub status: String,
    /// Cluster health colour, absent when the cluster is unreachable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster_status: Option<String>,
}

/// Readiness probe. Returns 503 while the search cluster is unreachable or red.
#[utoipa::path(
    get,
    path = "/health/ready",
    tag = "health",
    responses(
        (status = 200, description = "Search cluster reachable", body = ReadyResponse),
        (status = 503, description = "Search cluster unreachable or red", body = ReadyResponse)
    )
)]
pub async fn ready(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let (status, body) = match state.client.cluster_health().await {
        Ok(health) if health.is_available() => (
            StatusCode::OK,
            ReadyResponse {
                status: "ready".to_string(),
                cluster_status: Some(health.status),
            },
        ),
        Ok(health) => {
            tracing::warn!(cluster = %health.cluster_name, "Search cluster is red");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                ReadyResponse {
                    status: "unavailable".to_string(),
                    cluster_status: Some(health.status),
                },
            )
        }
        Err(e) => {
            tracing::warn!(error = %e, "Search cluster health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                ReadyResponse {
                    status: "unavailable".to_string(),
                    cluster_status: None,
                },
            )
        }
    };

    (status, [(header::CACHE_CONTROL, "no-store")], Json(body))
}
