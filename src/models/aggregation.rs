// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Grouped aggregation requests and bucket results.

use crate::error::AppError;
use crate::models::search::validate_field_name;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::{IntoParams, ToSchema};

/// Metric computed per bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MetricType {
    Min,
    Max,
    Avg,
    Sum,
    Count,
}

impl MetricType {
    /// Key of this metric inside a `stats` aggregation result.
    pub fn stats_key(self) -> &'static str {
        match self {
            MetricType::Min => "min",
            MetricType::Max => "max",
            MetricType::Avg => "avg",
            MetricType::Sum => "sum",
            MetricType::Count => "count",
        }
    }

    /// Name of the single-value metric aggregation.
    pub fn aggregation_kind(self) -> &'static str {
        match self {
            MetricType::Count => "value_count",
            other => other.stats_key(),
        }
    }
}

impl FromStr for MetricType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "min" => Ok(MetricType::Min),
            "max" => Ok(MetricType::Max),
            "avg" => Ok(MetricType::Avg),
            "sum" => Ok(MetricType::Sum),
            "count" => Ok(MetricType::Count),
            other => Err(AppError::BadRequest(format!(
                "Invalid metric_type '{}': expected one of min, max, avg, sum, count",
                other
            ))),
        }
    }
}

/// Bucket ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl FromStr for SortOrder {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(AppError::BadRequest(format!(
                "Invalid sort_order '{}': expected asc or desc",
                other
            ))),
        }
    }
}

/// Raw aggregation query parameters.
///
/// Kept as strings so that bad values produce a JSON `bad_request` body
/// rather than an extractor rejection.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AggregationParams {
    /// Field to group by (its `.keyword` sub-field is used)
    pub agg_field: Option<String>,
    /// Numeric field the metric is computed on
    pub metric_field: Option<String>,
    /// One of min, max, avg, sum, count
    pub metric_type: Option<String>,
    /// Bucket order by metric: asc or desc
    pub sort_order: Option<String>,
}

/// Validated aggregation request.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregationRequest {
    pub agg_field: String,
    pub metric_field: String,
    pub metric_type: Option<MetricType>,
    pub sort_order: Option<SortOrder>,
}

impl TryFrom<AggregationParams> for AggregationRequest {
    type Error = AppError;

    fn try_from(params: AggregationParams) -> Result<Self, Self::Error> {
        let agg_field = required(params.agg_field, "agg_field")?;
        let metric_field = required(params.metric_field, "metric_field")?;
        validate_field_name(&agg_field)?;
        validate_field_name(&metric_field)?;

        let metric_type = params
            .metric_type
            .as_deref()
            .map(MetricType::from_str)
            .transpose()?;
        let sort_order = params
            .sort_order
            .as_deref()
            .map(SortOrder::from_str)
            .transpose()?;

        Ok(Self {
            agg_field,
            metric_field,
            metric_type,
            sort_order,
        })
    }
}

impl AggregationRequest {
    /// Metric and order, both mandatory for ordered stats aggregation.
    pub fn require_ordering(&self) -> Result<(MetricType, SortOrder), AppError> {
        let metric_type = self
            .metric_type
            .ok_or_else(|| AppError::BadRequest("Missing parameter 'metric_type'".to_string()))?;
        let sort_order = self
            .sort_order
            .ok_or_else(|| AppError::BadRequest("Missing parameter 'sort_order'".to_string()))?;
        Ok((metric_type, sort_order))
    }
}

fn required(value: Option<String>, name: &str) -> Result<String, AppError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::BadRequest(format!("Missing parameter '{}'", name)))
}

/// Summary statistics of a bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Stats {
    pub count: u64,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub avg: Option<f64>,
    #[serde(default)]
    pub sum: f64,
}

/// Bucket with full statistics of the metric field.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct StatsBucket {
    pub key: String,
    pub doc_count: u64,
    pub stats: Stats,
}

/// Bucket with a single metric value.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct MetricBucket {
    pub key: String,
    pub doc_count: u64,
    /// Null when the metric is undefined for the bucket
    pub value: Option<f64>,
}

/// Buckets produced by an aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(untagged)]
pub enum AggregationResult {
    Stats(Vec<StatsBucket>),
    Metric(Vec<MetricBucket>),
}

impl AggregationResult {
    pub fn len(&self) -> usize {
        match self {
            AggregationResult::Stats(buckets) => buckets.len(),
            AggregationResult::Metric(buckets) => buckets.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
