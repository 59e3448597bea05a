// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Employee service contract shared by both API generations.

use crate::error::AppError;
use crate::models::{AggregationRequest, AggregationResult, Employee, PageParams, SearchFilters};
use async_trait::async_trait;
use serde_json::Value;

/// Result of a delete request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
}

/// Employee operations backed by the search index.
#[async_trait]
pub trait EmployeeService: Send + Sync {
    /// One page of all employees.
    async fn get_all(&self, page: PageParams) -> Result<Vec<Employee>, AppError>;

    async fn get_by_id(&self, id: &str) -> Result<Option<Employee>, AppError>;

    /// Create or replace the employee stored under `id`.
    async fn create_with_id(&self, employee: &Employee, id: &str) -> Result<(), AppError>;

    async fn delete_by_id(&self, id: &str) -> Result<DeleteOutcome, AppError>;

    /// Employees matching the given field filters.
    async fn search(&self, filters: &SearchFilters) -> Result<Vec<Employee>, AppError>;

    /// Group employees by a field and compute a metric per group.
    async fn aggregate(&self, request: &AggregationRequest)
        -> Result<AggregationResult, AppError>;
}

/// Render a terms bucket key as text.
///
/// Keyword buckets have string keys; anything else is rendered as JSON.
pub(crate) fn bucket_key(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bucket_key() {
        assert_eq!(bucket_key(&json!("Rust")), "Rust");
        assert_eq!(bucket_key(&json!(42)), "42");
        assert_eq!(bucket_key(&json!(true)), "true");
    }
}
