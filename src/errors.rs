// Copyright (c) 2025 - Cowboy AI, Inc.

//! Error types for crawler and graph operations

use thiserror::Error;

/// Errors raised by a [`GraphClient`](crate::graph::GraphClient)
#[derive(Debug, Error)]
pub enum GraphError {
    /// Graph store could not be reached
    #[error("Graph connection error: {0}")]
    Connection(String),

    /// A query or write failed
    #[error("Graph query error: {0}")]
    Query(String),

    /// The store answered with data we could not read
    #[error("Invalid graph response: {0}")]
    InvalidResponse(String),
}

#[cfg(feature = "neo4j")]
impl From<neo4rs::Error> for GraphError {
    fn from(err: neo4rs::Error) -> Self {
        GraphError::Query(err.to_string())
    }
}

/// Errors that abort a crawler run
#[derive(Debug, Error)]
pub enum CrawlerError {
    /// Transport-level HTTP failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response from the data source
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    /// Response body was not the expected JSON document
    #[error("Failed to decode IP ranges document: {0}")]
    Decode(#[from] serde_json::Error),

    /// Graph store failure
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// No relationship of the given type was found for this crawler's reference
    #[error("No {0} relationship found for this crawler")]
    RelationNotFound(String),

    /// Filesystem error (log directory, log file)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for crawler operations
pub type CrawlerResult<T> = Result<T, CrawlerError>;

/// Result type for graph client operations
pub type GraphResult<T> = Result<T, GraphError>;
