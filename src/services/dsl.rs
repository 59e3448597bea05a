// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Employee service speaking raw query DSL (API v1).
//!
//! Handles:
//! - Multi-field, multi-value search (`terms` clauses under `bool.must`)
//! - Ordered `stats` aggregations
//! - Lenient document parsing: unreadable documents are logged and skipped

use crate::db::elasticsearch::{Hit, SearchResponse};
use crate::db::{query, ElasticClient};
use crate::error::AppError;
use crate::models::{
    AggregationRequest, AggregationResult, Employee, PageParams, SearchFilters, Stats,
    StatsBucket,
};
use crate::services::employee::{bucket_key, DeleteOutcome, EmployeeService};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

/// v1 employee service.
#[derive(Clone)]
pub struct QueryEmployeeService {
    client: ElasticClient,
}

impl QueryEmployeeService {
    pub fn new(client: ElasticClient) -> Self {
        Self { client }
    }

    fn employees_from_response(response: SearchResponse) -> Vec<Employee> {
        response
            .hits
            .hits
            .into_iter()
            .filter_map(Self::employee_from_hit)
            .collect()
    }

    fn employee_from_hit(hit: Hit) -> Option<Employee> {
        let Some(source) = hit.source else {
            tracing::warn!(id = %hit.id, "Hit has no _source; skipping");
            return None;
        };
        Self::employee_from_source(&hit.id, source)
    }

    fn employee_from_source(id: &str, source: Value) -> Option<Employee> {
        match serde_json::from_value(source) {
            Ok(employee) => Some(employee),
            Err(e) => {
                tracing::error!(id = %id, error = %e, "Document can't be parsed as Employee");
                None
            }
        }
    }
}

/// Terms bucket carrying the `stats` sub-aggregation.
#[derive(Deserialize)]
struct RawStatsBucket {
    key: Value,
    doc_count: u64,
    #[serde(rename = "metric_stats")]
    stats: Stats,
}

#[async_trait]
impl EmployeeService for QueryEmployeeService {
    async fn get_all(&self, page: PageParams) -> Result<Vec<Employee>, AppError> {
        let response = self.client.search(&query::match_all(page)).await?;
        Ok(Self::employees_from_response(response))
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Employee>, AppError> {
        let Some(doc) = self.client.get_document(id).await? else {
            tracing::warn!(id = %id, "Employee not found");
            return Ok(None);
        };

        Ok(doc
            .source
            .and_then(|source| Self::employee_from_source(id, source)))
    }

    async fn create_with_id(&self, employee: &Employee, id: &str) -> Result<(), AppError> {
        self.client.index_document(id, employee).await?;
        tracing::info!(id = %id, "Employee indexed");
        Ok(())
    }

    async fn delete_by_id(&self, id: &str) -> Result<DeleteOutcome, AppError> {
        if self.client.delete_document(id).await? {
            tracing::info!(id = %id, "Employee deleted");
            Ok(DeleteOutcome::Deleted)
        } else {
            tracing::warn!(id = %id, "Employee to delete not found");
            Ok(DeleteOutcome::NotFound)
        }
    }

    async fn search(&self, filters: &SearchFilters) -> Result<Vec<Employee>, AppError> {
        if filters.is_empty() {
            return Err(AppError::BadRequest("Value(s) is empty".to_string()));
        }

        let response = self.client.search(&query::terms_filter(filters)).await?;
        Ok(Self::employees_from_response(response))
    }

    async fn aggregate(
        &self,
        request: &AggregationRequest,
    ) -> Result<AggregationResult, AppError> {
        let (metric_type, sort_order) = request.require_ordering()?;
        let body = query::stats_aggregation(
            &request.agg_field,
            &request.metric_field,
            metric_type,
            sort_order,
        );

        let response = self.client.search(&body).await?;

        let buckets = response
            .buckets(&request.agg_field)?
            .iter()
            .map(|raw| {
                let bucket: RawStatsBucket = serde_json::from_value(raw.clone())
                    .map_err(|e| AppError::Search(format!("Malformed stats bucket: {}", e)))?;
                Ok(StatsBucket {
                    key: bucket_key(&bucket.key),
                    doc_count: bucket.doc_count,
                    stats: bucket.stats,
                })
            })
            .collect::<Result<Vec<_>, AppError>>()?;

        Ok(AggregationResult::Stats(buckets))
    }
}
