// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod aggregation;
pub mod employee;
pub mod search;

pub use aggregation::{
    AggregationParams, AggregationRequest, AggregationResult, MetricBucket, MetricType,
    SortOrder, Stats, StatsBucket,
};
pub use employee::{Address, Employee};
pub use search::{PageParams, SearchFilters};
