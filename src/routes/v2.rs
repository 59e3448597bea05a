// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Employee API v2 (typed service).

use crate::error::{ErrorResponse, Result};
use crate::models::{AggregationParams, AggregationResult, Employee, MetricBucket, PageParams};
use crate::routes::employees;
use crate::AppState;
use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    extract::{Json, Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// v2 employee routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/v2/employees", get(get_all))
        .route(
            "/api/v2/employees/{id}",
            get(get_by_id).put(create_with_id).delete(delete_by_id),
        )
        .route("/api/v2/employees/search", post(search))
        .route("/api/v2/employees/agg", post(aggregate))
}

#[utoipa::path(
    get,
    path = "/api/v2/employees",
    tag = "employees-v2",
    params(PageParams),
    responses(
        (status = 200, description = "One page of employees", body = Vec<Employee>),
        (status = 400, description = "Invalid paging parameters", body = ErrorResponse),
        (status = 500, description = "A stored document is not a valid employee", body = ErrorResponse)
    )
)]
pub async fn get_all(
    State(state): State<Arc<AppState>>,
    params: std::result::Result<Query<PageParams>, QueryRejection>,
) -> Result<Json<Vec<Employee>>> {
    employees::list(state.v2.as_ref(), params).await
}

#[utoipa::path(
    get,
    path = "/api/v2/employees/{id}",
    tag = "employees-v2",
    params(("id" = String, Path, description = "Document id")),
    responses(
        (status = 200, description = "Employee found", body = Employee),
        (status = 404, description = "No employee with this id", body = ErrorResponse)
    )
)]
pub async fn get_by_id(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Employee>> {
    employees::fetch(state.v2.as_ref(), &id).await
}

#[utoipa::path(
    put,
    path = "/api/v2/employees/{id}",
    tag = "employees-v2",
    params(("id" = String, Path, description = "Document id")),
    request_body = Employee,
    responses(
        (status = 201, description = "Employee stored"),
        (status = 400, description = "Malformed or invalid employee", body = ErrorResponse)
    )
)]
pub async fn create_with_id(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: std::result::Result<Json<Employee>, JsonRejection>,
) -> Result<StatusCode> {
    employees::store(state.v2.as_ref(), &id, body).await
}

/// Delete an employee. Deleting an absent employee also succeeds.
#[utoipa::path(
    delete,
    path = "/api/v2/employees/{id}",
    tag = "employees-v2",
    params(("id" = String, Path, description = "Document id")),
    responses(
        (status = 204, description = "Employee no longer exists")
    )
)]
pub async fn delete_by_id(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    employees::remove(state.v2.as_ref(), &id).await
}

/// Exact-match search on a single field.
///
/// Only the first query parameter and its first value are used.
#[utoipa::path(
    post,
    path = "/api/v2/employees/search",
    tag = "employees-v2",
    params(
        ("filters" = std::collections::HashMap<String, String>, Query, style = Form, explode,
            description = "Field filter; only the first field and value are used")
    ),
    responses(
        (status = 200, description = "Matching employees", body = Vec<Employee>),
        (status = 400, description = "No filter given", body = ErrorResponse)
    )
)]
pub async fn search(
    State(state): State<Arc<AppState>>,
    params: std::result::Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<Vec<Employee>>> {
    employees::search(state.v2.as_ref(), params).await
}

/// Group employees and compute one metric per group.
///
/// `metric_type` defaults to `avg`; `sort_order` is ignored.
#[utoipa::path(
    post,
    path = "/api/v2/employees/agg",
    tag = "employees-v2",
    params(AggregationParams),
    responses(
        (status = 200, description = "Buckets with metric values", body = Vec<MetricBucket>),
        (status = 400, description = "Missing or invalid parameter", body = ErrorResponse)
    )
)]
pub async fn aggregate(
    State(state): State<Arc<AppState>>,
    params: std::result::Result<Query<AggregationParams>, QueryRejection>,
) -> Result<Json<AggregationResult>> {
    employees::aggregate(state.v2.as_ref(), params).await
}
