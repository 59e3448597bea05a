// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Employee API v1 (raw query DSL service).

use crate::error::{ErrorResponse, Result};
use crate::models::{AggregationParams, AggregationResult, Employee, PageParams, StatsBucket};
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

/// v1 employee routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/v1/employees", get(get_all))
        .route(
            "/api/v1/employees/{id}",
            get(get_by_id).put(create_with_id).delete(delete_by_id),
        )
        .route("/api/v1/employees/search", post(search))
        .route("/api/v1/employees/agg", post(aggregate))
}

/// List employees.
#[utoipa::path(
    get,
    path = "/api/v1/employees",
    tag = "employees-v1",
    params(PageParams),
    responses(
        (status = 200, description = "One page of employees", body = Vec<Employee>),
        (status = 400, description = "Invalid paging parameters", body = ErrorResponse),
        (status = 502, description = "Search engine failure", body = ErrorResponse)
    )
)]
pub async fn get_all(
    State(state): State<Arc<AppState>>,
    params: std::result::Result<Query<PageParams>, QueryRejection>,
) -> Result<Json<Vec<Employee>>> {
    employees::list(state.v1.as_ref(), params).await
}

/// Get an employee by id.
#[utoipa::path(
    get,
    path = "/api/v1/employees/{id}",
    tag = "employees-v1",
    params(("id" = String, Path, description = "Document id")),
    responses(
        (status = 200, description = "Employee found", body = Employee),
        (status = 404, description = "No readable employee with this id", body = ErrorResponse)
    )
)]
pub async fn get_by_id(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Employee>> {
    employees::fetch(state.v1.as_ref(), &id).await
}

/// Create or replace an employee under the given id.
#[utoipa::path(
    put,
    path = "/api/v1/employees/{id}",
    tag = "employees-v1",
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
    employees::store(state.v1.as_ref(), &id, body).await
}

/// Delete an employee.
#[utoipa::path(
    delete,
    path = "/api/v1/employees/{id}",
    tag = "employees-v1",
    params(("id" = String, Path, description = "Document id")),
    responses(
        (status = 204, description = "Employee deleted"),
        (status = 404, description = "No employee with this id", body = ErrorResponse)
    )
)]
pub async fn delete_by_id(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    employees::remove(state.v1.as_ref(), &id).await
}

/// Search employees by field values.
///
/// Every query parameter is a field filter; repeat a parameter to accept
/// several values (`?skills=Rust&skills=Go&verified=true`). Values for one
/// field are alternatives, all fields must match.
#[utoipa::path(
    post,
    path = "/api/v1/employees/search",
    tag = "employees-v1",
    params(
        ("filters" = std::collections::HashMap<String, String>, Query, style = Form, explode,
            description = "Field filters; repeat a field to accept several values")
    ),
    responses(
        (status = 200, description = "Matching employees", body = Vec<Employee>),
        (status = 400, description = "No filters or an empty value", body = ErrorResponse)
    )
)]
pub async fn search(
    State(state): State<Arc<AppState>>,
    params: std::result::Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<Vec<Employee>>> {
    employees::search(state.v1.as_ref(), params).await
}

/// Group employees and report statistics of a metric field per group.
///
/// All four parameters are required. Buckets are ordered by the chosen
/// statistic.
#[utoipa::path(
    post,
    path = "/api/v1/employees/agg",
    tag = "employees-v1",
    params(AggregationParams),
    responses(
        (status = 200, description = "Buckets with statistics", body = Vec<StatsBucket>),
        (status = 400, description = "Missing or invalid parameter", body = ErrorResponse)
    )
)]
pub async fn aggregate(
    State(state): State<Arc<AppState>>,
    params: std::result::Result<Query<AggregationParams>, QueryRejection>,
) -> Result<Json<AggregationResult>> {
    employees::aggregate(state.v1.as_ref(), params).await
}
