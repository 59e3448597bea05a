// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Employee service with strict typed responses (API v2).
//!
//! Every document must parse as an [`Employee`]; a bad document fails the
//! whole request. Search is a single `term` match and aggregations compute
//! one metric per bucket.

use crate::db::{query, ElasticClient};
use crate::error::AppError;
use crate::models::{
    AggregationRequest, AggregationResult, Employee, MetricBucket, MetricType, PageParams,
    SearchFilters,
};
use crate::services::employee::{bucket_key, DeleteOutcome, EmployeeService};
use async_trait::async_trait;
use serde_json::Value;

/// Metric used when the request does not name one.
const DEFAULT_METRIC: MetricType = MetricType::Avg;

/// v2 employee service.
#[derive(Clone)]
pub struct TypedEmployeeService {
    client: ElasticClient,
}

impl TypedEmployeeService {
    pub fn new(client: ElasticClient) -> Self {
        Self { client }
    }

    async fn search_employees(&self, body: &Value) -> Result<Vec<Employee>, AppError> {
        let response = self.client.search(body).await?;

        response
            .hits
            .hits
            .into_iter()
            .map(|hit| {
                let source = hit.source.ok_or_else(|| {
                    AppError::Internal(anyhow::anyhow!("Hit {} has no _source", hit.id))
                })?;
                parse_employee(&hit.id, source)
            })
            .collect()
    }
}

fn parse_employee(id: &str, source: Value) -> Result<Employee, AppError> {
    serde_json::from_value(source).map_err(|e| {
        AppError::Internal(anyhow::anyhow!(
            "Document {} is not a valid employee: {}",
            id,
            e
        ))
    })
}

fn metric_bucket(raw: &Value, metric_field: &str) -> Result<MetricBucket, AppError> {
    let key = raw
        .get("key")
        .map(bucket_key)
        .ok_or_else(|| AppError::Search("Bucket without key".to_string()))?;
    let doc_count = raw
        .get("doc_count")
        .and_then(Value::as_u64)
        .ok_or_else(|| AppError::Search("Bucket without doc_count".to_string()))?;
    let value = raw
        .get(metric_field)
        .and_then(|metric| metric.get("value"))
        .and_then(Value::as_f64);

    Ok(MetricBucket {
        key,
        doc_count,
        value,
    })
}

#[async_trait]
impl EmployeeService for TypedEmployeeService {
    async fn get_all(&self, page: PageParams) -> Result<Vec<Employee>, AppError> {
        self.search_employees(&query::match_all(page)).await
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Employee>, AppError> {
        match self.client.get_document(id).await? {
            Some(doc) => {
                let source = doc.source.ok_or_else(|| {
                    AppError::Internal(anyhow::anyhow!("Document {} has no _source", id))
                })?;
                parse_employee(id, source).map(Some)
            }
            None => Ok(None),
        }
    }

    async fn create_with_id(&self, employee: &Employee, id: &str) -> Result<(), AppError> {
        self.client.index_document(id, employee).await
    }

    async fn delete_by_id(&self, id: &str) -> Result<DeleteOutcome, AppError> {
        // Deleting an absent document is not an error here.
        let existed = self.client.delete_document(id).await?;
        tracing::debug!(id = %id, existed, "Employee delete processed");
        Ok(DeleteOutcome::Deleted)
    }

    async fn search(&self, filters: &SearchFilters) -> Result<Vec<Employee>, AppError> {
        let (field, value) = filters
            .first()
            .ok_or_else(|| AppError::BadRequest("Bad request".to_string()))?;

        if filters.len() > 1 {
            tracing::debug!(
                field = %field,
                ignored = filters.len() - 1,
                "Only the first search field is used"
            );
        }

        self.search_employees(&query::term_filter(field, value))
            .await
    }

    async fn aggregate(
        &self,
        request: &AggregationRequest,
    ) -> Result<AggregationResult, AppError> {
        let metric_type = request.metric_type.unwrap_or(DEFAULT_METRIC);
        let body =
            query::metric_aggregation(&request.agg_field, &request.metric_field, metric_type);

        let response = self.client.search(&body).await?;

        let buckets = response
            .buckets(&request.agg_field)?
            .iter()
            .map(|raw| metric_bucket(raw, &request.metric_field))
            .collect::<Result<Vec<_>, AppError>>()?;

        Ok(AggregationResult::Metric(buckets))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_metric_bucket() {
        let raw = json!({ "key": "Java", "doc_count": 3, "rating": { "value": 4.25 } });
        let bucket = metric_bucket(&raw, "rating").unwrap();
        assert_eq!(
            bucket,
            MetricBucket {
                key: "Java".to_string(),
                doc_count: 3,
                value: Some(4.25)
            }
        );

        let empty = json!({ "key": "Go", "doc_count": 1, "rating": { "value": null } });
        assert_eq!(metric_bucket(&empty, "rating").unwrap().value, None);

        assert!(metric_bucket(&json!({ "doc_count": 1 }), "rating").is_err());
    }

    #[test]
    fn test_parse_employee_is_strict() {
        let err = parse_employee("7", json!({ "experience": "ten" })).unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }
}
