// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! OpenAPI documentation.
//!
//! [`ApiDoc`] collects every route and schema. The document is served at
//! [`OPENAPI_JSON_PATH`] with Swagger UI at [`SWAGGER_UI_PATH`], and printed
//! by the `openapi-dump` binary.

use crate::error::ErrorResponse;
use crate::models::{
    Address, AggregationResult, Employee, MetricBucket, MetricType, SortOrder, Stats,
    StatsBucket,
};
use crate::routes::health::{HealthResponse, ReadyResponse};
use utoipa::OpenApi;

pub const SWAGGER_UI_PATH: &str = "/swagger-ui";
pub const OPENAPI_JSON_PATH: &str = "/v3/api-docs";

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Employee search API",
        description = "Store, search and aggregate employee records in Elasticsearch."
    ),
    paths(
        crate::routes::v1::get_all,
        crate::routes::v1::get_by_id,
        crate::routes::v1::create_with_id,
        crate::routes::v1::delete_by_id,
        crate::routes::v1::search,
        crate::routes::v1::aggregate,
        crate::routes::v2::get_all,
        crate::routes::v2::get_by_id,
        crate::routes::v2::create_with_id,
        crate::routes::v2::delete_by_id,
        crate::routes::v2::search,
        crate::routes::v2::aggregate,
        crate::routes::health::health_check,
        crate::routes::health::ready,
    ),
    components(schemas(
        Employee,
        Address,
        StatsBucket,
        Stats,
        MetricBucket,
        AggregationResult,
        MetricType,
        SortOrder,
        ErrorResponse,
        HealthResponse,
        ReadyResponse,
    )),
    tags(
        (name = "employees-v1", description = "Multi-value search and ordered stats aggregations"),
        (name = "employees-v2", description = "Single-term search and single-metric aggregations"),
        (name = "health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;
