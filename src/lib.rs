// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Employee Search: a REST API over an Elasticsearch employee index
//!
//! This crate provides CRUD, field search and grouped aggregations over
//! employee documents, in two API generations (`/api/v1`, `/api/v2`), with
//! OpenAPI documentation.

pub mod config;
pub mod db;
pub mod doc;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use db::ElasticClient;
use services::{EmployeeService, QueryEmployeeService, TypedEmployeeService};
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub client: ElasticClient,
    /// Service behind `/api/v1/employees`
    pub v1: Arc<dyn EmployeeService>,
    /// Service behind `/api/v2/employees`
    pub v2: Arc<dyn EmployeeService>,
}

impl AppState {
    /// Wire both API generations to the same search client.
    pub fn new(config: Config, client: ElasticClient) -> Self {
        Self {
            v1: Arc::new(QueryEmployeeService::new(client.clone())),
            v2: Arc::new(TypedEmployeeService::new(client.clone())),
            config,
            client,
        }
    }
}
