//! Database layer (Elasticsearch).

pub mod elasticsearch;
pub mod query;

pub use elasticsearch::ElasticClient;

/// Index names as constants.
pub mod indices {
    /// Default index for employee documents
    pub const EMPLOYEES: &str = "employees";
}
