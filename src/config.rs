// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is honored for local development.

use std::env;
use std::time::Duration;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Origin allowed by CORS in addition to localhost
    pub allowed_origin: String,

    // --- Elasticsearch connection ---
    /// Host name of the search cluster
    pub elasticsearch_host: String,
    /// HTTP port of the search cluster
    pub elasticsearch_port: u16,
    /// `http` or `https`
    pub elasticsearch_protocol: String,
    /// Basic auth credentials, if the cluster requires them
    pub elasticsearch_credentials: Option<Credentials>,
    /// Index holding employee documents
    pub elasticsearch_index: String,
    /// Per-request timeout
    pub elasticsearch_timeout: Duration,
}

/// Basic auth credentials for the search cluster.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            port: 8080,
            allowed_origin: "http://localhost:3000".to_string(),
            elasticsearch_host: "localhost".to_string(),
            elasticsearch_port: 9200,
            elasticsearch_protocol: "http".to_string(),
            elasticsearch_credentials: None,
            elasticsearch_index: crate::db::indices::EMPLOYEES.to_string(),
            elasticsearch_timeout: Duration::from_secs(30),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let defaults = Self::default();

        let elasticsearch_protocol = env::var("ELASTICSEARCH_PROTOCOL")
            .map(|v| v.trim().to_ascii_lowercase())
            .unwrap_or(defaults.elasticsearch_protocol);
        if elasticsearch_protocol != "http" && elasticsearch_protocol != "https" {
            return Err(ConfigError::Invalid(
                "ELASTICSEARCH_PROTOCOL",
                elasticsearch_protocol,
            ));
        }

        let elasticsearch_credentials = match (
            env::var("ELASTICSEARCH_USERNAME"),
            env::var("ELASTICSEARCH_PASSWORD"),
        ) {
            (Ok(username), Ok(password)) => Some(Credentials {
                username: username.trim().to_string(),
                password: password.trim().to_string(),
            }),
            (Err(_), Err(_)) => None,
            (Ok(_), Err(_)) => return Err(ConfigError::Missing("ELASTICSEARCH_PASSWORD")),
            (Err(_), Ok(_)) => return Err(ConfigError::Missing("ELASTICSEARCH_USERNAME")),
        };

        Ok(Self {
            port: parse_var("PORT", defaults.port)?,
            allowed_origin: env::var("ALLOWED_ORIGIN").unwrap_or(defaults.allowed_origin),
            elasticsearch_host: env::var("ELASTICSEARCH_HOST")
                .map(|v| v.trim().to_string())
                .unwrap_or(defaults.elasticsearch_host),
            elasticsearch_port: parse_var("ELASTICSEARCH_PORT", defaults.elasticsearch_port)?,
            elasticsearch_protocol,
            elasticsearch_credentials,
            elasticsearch_index: env::var("ELASTICSEARCH_INDEX")
                .map(|v| v.trim().to_string())
                .unwrap_or(defaults.elasticsearch_index),
            elasticsearch_timeout: Duration::from_secs(parse_var(
                "ELASTICSEARCH_TIMEOUT_SECS",
                defaults.elasticsearch_timeout.as_secs(),
            )?),
        })
    }

    /// Base URL of the search cluster, e.g. `http://localhost:9200`.
    pub fn elasticsearch_url(&self) -> String {
        format!(
            "{}://{}:{}",
            self.elasticsearch_protocol, self.elasticsearch_host, self.elasticsearch_port
        )
    }
}

fn parse_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid(name, raw)),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}
