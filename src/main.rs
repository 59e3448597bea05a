// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Employee Search API Server
//!
//! Serves the employee REST API backed by Elasticsearch, with Swagger UI.

use employee_search::{config::Config, db::ElasticClient, AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging()?;

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting Employee Search API");

    let client = ElasticClient::new(&config)?;

    // The cluster may come up after us; readiness reports it until then.
    match client.cluster_health().await {
        Ok(health) => tracing::info!(
            cluster = %health.cluster_name,
            status = %health.status,
            "Connected to Elasticsearch"
        ),
        Err(e) => tracing::warn!(error = %e, "Elasticsearch not reachable at startup"),
    }

    // Build shared state
    let state = Arc::new(AppState::new(config.clone(), client));

    // Build router
    let app = employee_search::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(
        address = %addr,
        docs = employee_search::doc::SWAGGER_UI_PATH,
        "Server listening"
    );

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("employee_search=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();
    Ok(())
}
