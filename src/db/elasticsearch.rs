// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Elasticsearch REST client with typed operations.
//!
//! Provides the document and search calls the services need:
//! - `_search` with a JSON query body
//! - `_doc` get / index / delete by id
//! - `_cluster/health` for readiness probes

use crate::config::{Config, Credentials};
use crate::error::AppError;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// Elasticsearch client.
#[derive(Clone)]
pub struct ElasticClient {
    connection: Option<Connection>,
    index: String,
}

#[derive(Clone)]
struct Connection {
    http: reqwest::Client,
    base_url: String,
    credentials: Option<Credentials>,
    timeout: Duration,
}

impl ElasticClient {
    /// Create a client for the cluster described by `config`.
    ///
    /// No request is made; use [`ElasticClient::cluster_health`] to probe.
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to build HTTP client: {}", e)))?;

        let base_url = config.elasticsearch_url();
        tracing::info!(url = %base_url, index = %config.elasticsearch_index, "Elasticsearch client configured");

        Ok(Self {
            connection: Some(Connection {
                http,
                base_url,
                credentials: config.elasticsearch_credentials.clone(),
                timeout: config.elasticsearch_timeout,
            }),
            index: config.elasticsearch_index.clone(),
        })
    }

    /// Create a client against an explicit base URL without credentials.
    ///
    /// Requests use the default timeout; see [`ElasticClient::with_timeout`].
    pub fn with_base_url(base_url: impl Into<String>, index: impl Into<String>) -> Self {
        Self {
            connection: Some(Connection {
                http: reqwest::Client::new(),
                base_url: base_url.into().trim_end_matches('/').to_string(),
                credentials: None,
                timeout: Config::default().elasticsearch_timeout,
            }),
            index: index.into(),
        }
    }

    /// Override the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        if let Some(conn) = self.connection.as_mut() {
            conn.timeout = timeout;
        }
        self
    }

    /// Create a mock client for testing (offline mode).
    ///
    /// All operations will return an error if called.
    pub fn new_mock() -> Self {
        Self {
            connection: None,
            index: crate::db::indices::EMPLOYEES.to_string(),
        }
    }

    /// Helper to get the connection or return an error if offline.
    fn connection(&self) -> Result<&Connection, AppError> {
        self.connection.as_ref().ok_or_else(|| {
            AppError::Search("Search engine not connected (offline mode)".to_string())
        })
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, AppError> {
        let conn = self.connection()?;
        let url = format!("{}{}", conn.base_url, path);
        let builder = conn.http.request(method, url).timeout(conn.timeout);

        Ok(match &conn.credentials {
            Some(creds) => builder.basic_auth(&creds.username, Some(&creds.password)),
            None => builder,
        })
    }

    /// Document URL path. Dot-segment ids would be resolved away by the
    /// URL parser and address the index itself, so they are refused.
    fn doc_path(&self, id: &str) -> Result<String, AppError> {
        if id.is_empty() || id == "." || id == ".." {
            return Err(AppError::BadRequest(format!("Invalid document id '{}'", id)));
        }
        Ok(format!("/{}/_doc/{}", self.index, urlencoding::encode(id)))
    }

    // ─── Search ──────────────────────────────────────────────────

    /// Run a query body against the index.
    pub async fn search(&self, body: &Value) -> Result<SearchResponse, AppError> {
        tracing::debug!(index = %self.index, query = %body, "Executing search");

        let response = self
            .request(Method::POST, &format!("/{}/_search", self.index))?
            .json(body)
            .send()
            .await
            .map_err(|e| AppError::Search(e.to_string()))?;

        let result: SearchResponse = check_response_json(response).await?;
        tracing::debug!(
            took_ms = result.took,
            total = result.hits.total.as_ref().map(|t| t.value),
            relation = result.hits.total.as_ref().map(|t| t.relation.as_str()),
            returned = result.hits.hits.len(),
            "Search completed"
        );
        Ok(result)
    }

    // ─── Document Operations ─────────────────────────────────────

    /// Get a document by id. Returns `None` when it does not exist.
    pub async fn get_document(&self, id: &str) -> Result<Option<GetResponse>, AppError> {
        let response = self
            .request(Method::GET, &self.doc_path(id)?)?
            .send()
            .await
            .map_err(|e| AppError::Search(e.to_string()))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let doc: GetResponse = check_response_json(response).await?;
        Ok(doc.found.then_some(doc))
    }

    /// Create or replace a document under the given id.
    pub async fn index_document<T: Serialize + ?Sized>(
        &self,
        id: &str,
        document: &T,
    ) -> Result<(), AppError> {
        let response = self
            .request(Method::PUT, &self.doc_path(id)?)?
            .json(document)
            .send()
            .await
            .map_err(|e| AppError::Search(e.to_string()))?;

        check_response(response).await
    }

    /// Delete a document. Returns `false` when it did not exist.
    pub async fn delete_document(&self, id: &str) -> Result<bool, AppError> {
        let response = self
            .request(Method::DELETE, &self.doc_path(id)?)?
            .send()
            .await
            .map_err(|e| AppError::Search(e.to_string()))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(false);
        }

        check_response(response).await?;
        Ok(true)
    }

    // ─── Cluster ─────────────────────────────────────────────────

    pub async fn cluster_health(&self) -> Result<ClusterHealth, AppError> {
        let response = self
            .request(Method::GET, "/_cluster/health")?
            .send()
            .await
            .map_err(|e| AppError::Search(e.to_string()))?;

        check_response_json(response).await
    }
}

/// Check response status and return error if not successful.
async fn check_response(response: reqwest::Response) -> Result<(), AppError> {
    if response.status().is_success() {
        return Ok(());
    }
    Err(error_from_response(response).await)
}

/// Check response and parse JSON body.
async fn check_response_json<T: for<'de> Deserialize<'de>>(
    response: reqwest::Response,
) -> Result<T, AppError> {
    if !response.status().is_success() {
        return Err(error_from_response(response).await);
    }

    response
        .json()
        .await
        .map_err(|e| AppError::Search(format!("JSON parse error: {}", e)))
}

async fn error_from_response(response: reqwest::Response) -> AppError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let cause = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .map(|b| b.error);

    match (status, cause) {
        (StatusCode::BAD_REQUEST, Some(cause)) => AppError::BadRequest(cause.root_reason()),
        (StatusCode::BAD_REQUEST, None) => AppError::BadRequest(body),
        (StatusCode::NOT_FOUND, Some(cause)) if cause.kind == "index_not_found_exception" => {
            tracing::warn!(reason = %cause.reason, "Index does not exist");
            AppError::NotFound(cause.reason)
        }
        _ => AppError::Search(format!("HTTP {}: {}", status, body)),
    }
}

// ─── Response Types ──────────────────────────────────────────────

/// `_search` response.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub took: u64,
    pub hits: Hits,
    #[serde(default)]
    pub aggregations: Option<serde_json::Map<String, Value>>,
}

impl SearchResponse {
    /// Buckets of a named multi-bucket aggregation.
    pub fn buckets(&self, name: &str) -> Result<&[Value], AppError> {
        self.aggregations
            .as_ref()
            .and_then(|aggs| aggs.get(name))
            .and_then(|agg| agg.get("buckets"))
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .ok_or_else(|| {
                AppError::Search(format!("Aggregation '{}' missing from response", name))
            })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Hits {
    #[serde(default)]
    pub total: Option<TotalHits>,
    #[serde(default)]
    pub hits: Vec<Hit>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TotalHits {
    pub value: u64,
    pub relation: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Hit {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_source", default)]
    pub source: Option<Value>,
}

/// `_doc` get response.
#[derive(Debug, Clone, Deserialize)]
pub struct GetResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub found: bool,
    #[serde(rename = "_source", default)]
    pub source: Option<Value>,
}

/// `_cluster/health` response.
#[derive(Debug, Clone, Deserialize)]
pub struct ClusterHealth {
    pub cluster_name: String,
    /// green, yellow or red
    pub status: String,
}

impl ClusterHealth {
    /// A red cluster cannot serve all shards.
    pub fn is_available(&self) -> bool {
        self.status != "red"
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorCause,
}

#[derive(Debug, Deserialize)]
struct ErrorCause {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    reason: String,
    #[serde(default)]
    root_cause: Vec<ErrorCause>,
}

impl ErrorCause {
    fn root_reason(&self) -> String {
        self.root_cause
            .first()
            .filter(|c| !c.reason.is_empty())
            .map(|c| c.reason.clone())
            .unwrap_or_else(|| self.reason.clone())
    }
}
