// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Request handling shared by the v1 and v2 employee routes.
//!
//! The versioned modules own the paths and OpenAPI docs; the work of
//! validating input and mapping service results to responses lives here.

use crate::error::{AppError, Result};
use crate::models::{
    AggregationParams, AggregationRequest, AggregationResult, Employee, PageParams,
    SearchFilters,
};
use crate::services::{DeleteOutcome, EmployeeService};
use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    extract::{Json, Query},
    http::StatusCode,
};
use validator::Validate;

/// Maximum document id length accepted by the index (bytes).
pub const MAX_ID_BYTES: usize = 512;

pub(crate) fn validate_id(id: &str) -> Result<()> {
    if id.trim().is_empty() {
        return Err(AppError::BadRequest("Id shouldn't be empty".to_string()));
    }
    if id == "." || id == ".." {
        return Err(AppError::BadRequest(format!("Id '{}' is not allowed", id)));
    }
    if id.len() > MAX_ID_BYTES {
        return Err(AppError::BadRequest(format!(
            "Id exceeds {} bytes",
            MAX_ID_BYTES
        )));
    }
    Ok(())
}

fn query_rejection(rejection: QueryRejection) -> AppError {
    AppError::BadRequest(rejection.body_text())
}

pub(crate) async fn list(
    service: &dyn EmployeeService,
    params: std::result::Result<Query<PageParams>, QueryRejection>,
) -> Result<Json<Vec<Employee>>> {
    let Query(page) = params.map_err(query_rejection)?;
    let page = page.validated()?;

    tracing::debug!(from = page.from, size = page.size, "Listing employees");
    Ok(Json(service.get_all(page).await?))
}

pub(crate) async fn fetch(service: &dyn EmployeeService, id: &str) -> Result<Json<Employee>> {
    validate_id(id)?;

    service
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Employee {} not found", id)))
}

pub(crate) async fn store(
    service: &dyn EmployeeService,
    id: &str,
    body: std::result::Result<Json<Employee>, JsonRejection>,
) -> Result<StatusCode> {
    validate_id(id)?;
    let Json(employee) = body.map_err(|e| AppError::BadRequest(e.body_text()))?;
    employee.validate()?;

    service.create_with_id(&employee, id).await?;
    Ok(StatusCode::CREATED)
}

pub(crate) async fn remove(service: &dyn EmployeeService, id: &str) -> Result<StatusCode> {
    validate_id(id)?;

    match service.delete_by_id(id).await? {
        DeleteOutcome::Deleted => Ok(StatusCode::NO_CONTENT),
        DeleteOutcome::NotFound => Err(AppError::NotFound(format!("Employee {} not found", id))),
    }
}

pub(crate) async fn search(
    service: &dyn EmployeeService,
    params: std::result::Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<Vec<Employee>>> {
    let Query(pairs) = params.map_err(query_rejection)?;
    let filters = SearchFilters::from_pairs(pairs)?;

    tracing::debug!(fields = filters.len(), "Searching employees");
    Ok(Json(service.search(&filters).await?))
}

pub(crate) async fn aggregate(
    service: &dyn EmployeeService,
    params: std::result::Result<Query<AggregationParams>, QueryRejection>,
) -> Result<Json<AggregationResult>> {
    let Query(params) = params.map_err(query_rejection)?;
    let request = AggregationRequest::try_from(params)?;

    let result = service.aggregate(&request).await?;
    tracing::debug!(
        agg_field = %request.agg_field,
        metric_field = %request.metric_field,
        buckets = result.len(),
        "Aggregation complete"
    );
    Ok(Json(result))
}
