// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Query DSL builders.
//!
//! Field names and values are always placed as JSON values, never spliced
//! into raw text.

use crate::models::{MetricType, PageParams, SearchFilters, SortOrder};
use serde_json::{json, Value};

/// Name of the `stats` sub-aggregation used for ordered aggregations.
pub const STATS_AGG: &str = "metric_stats";

/// Terms aggregations group on the exact-value sub-field.
fn keyword_field(field: &str) -> String {
    format!("{}.keyword", field)
}

/// All documents, one page.
pub fn match_all(page: PageParams) -> Value {
    json!({
        "from": page.from,
        "size": page.size,
        "query": { "match_all": {} }
    })
}

/// One `terms` clause per field, all required to match.
///
/// Values for a single field are alternatives; distinct fields must all match.
pub fn terms_filter(filters: &SearchFilters) -> Value {
    let must: Vec<Value> = filters
        .iter()
        .map(|(field, values)| json!({ "terms": { field: values } }))
        .collect();

    json!({
        "query": {
            "bool": { "must": must }
        }
    })
}

/// Exact match on a single field.
pub fn term_filter(field: &str, value: &str) -> Value {
    json!({
        "query": {
            "term": { field: { "value": value } }
        }
    })
}

/// Buckets by `agg_field`, each with full `stats` of `metric_field`,
/// ordered by the chosen statistic.
pub fn stats_aggregation(
    agg_field: &str,
    metric_field: &str,
    metric_type: MetricType,
    sort_order: SortOrder,
) -> Value {
    let order_key = format!("{}.{}", STATS_AGG, metric_type.stats_key());

    json!({
        "size": 0,
        "aggs": {
            agg_field: {
                "terms": {
                    "field": keyword_field(agg_field),
                    "order": { order_key: sort_order.as_str() }
                },
                "aggs": {
                    STATS_AGG: {
                        "stats": { "field": metric_field }
                    }
                }
            }
        }
    })
}

/// Buckets by `agg_field`, each with a single metric of `metric_field`.
///
/// The sub-aggregation is named after `metric_field`.
pub fn metric_aggregation(agg_field: &str, metric_field: &str, metric_type: MetricType) -> Value {
    let kind = metric_type.aggregation_kind();

    json!({
        "size": 0,
        "aggs": {
            agg_field: {
                "terms": { "field": keyword_field(agg_field) },
                "aggs": {
                    metric_field: {
                        kind: { "field": metric_field }
                    }
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_all_page() {
        let body = match_all(PageParams { from: 20, size: 5 });
        assert_eq!(
            body,
            json!({ "from": 20, "size": 5, "query": { "match_all": {} } })
        );
    }

    #[test]
    fn test_terms_filter_combines_fields() {
        let filters = SearchFilters::from_pairs(vec![
            ("skills".to_string(), "Rust".to_string()),
            ("skills".to_string(), "Go".to_string()),
            ("verified".to_string(), "true".to_string()),
        ])
        .unwrap();

        assert_eq!(
            terms_filter(&filters),
            json!({
                "query": {
                    "bool": {
                        "must": [
                            { "terms": { "skills": ["Rust", "Go"] } },
                            { "terms": { "verified": ["true"] } }
                        ]
                    }
                }
            })
        );
    }

    #[test]
    fn test_terms_filter_keeps_values_literal() {
        let filters = SearchFilters::from_pairs(vec![(
            "name".to_string(),
            "\"] }, { \"match_all\": {".to_string(),
        )])
        .unwrap();

        let body = terms_filter(&filters);
        let must = body["query"]["bool"]["must"].as_array().unwrap();
        assert_eq!(must.len(), 1);
        assert_eq!(
            must[0]["terms"]["name"][0],
            "\"] }, { \"match_all\": {"
        );
    }

    #[test]
    fn test_term_filter() {
        assert_eq!(
            term_filter("email", "a@b.com"),
            json!({ "query": { "term": { "email": { "value": "a@b.com" } } } })
        );
    }

    #[test]
    fn test_stats_aggregation() {
        assert_eq!(
            stats_aggregation("skills", "rating", MetricType::Avg, SortOrder::Desc),
            json!({
                "size": 0,
                "aggs": {
                    "skills": {
                        "terms": {
                            "field": "skills.keyword",
                            "order": { "metric_stats.avg": "desc" }
                        },
                        "aggs": {
                            "metric_stats": { "stats": { "field": "rating" } }
                        }
                    }
                }
            })
        );
    }

    #[test]
    fn test_metric_aggregation() {
        assert_eq!(
            metric_aggregation("address.country", "salary", MetricType::Count),
            json!({
                "size": 0,
                "aggs": {
                    "address.country": {
                        "terms": { "field": "address.country.keyword" },
                        "aggs": {
                            "salary": { "value_count": { "field": "salary" } }
                        }
                    }
                }
            })
        );
    }
}
