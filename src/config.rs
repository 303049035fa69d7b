// Copyright (c) 2025 - Cowboy AI, Inc.

//! Crawler and Neo4j connection configuration

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::errors::{CrawlerError, CrawlerResult};

/// Published Google Cloud IP ranges
pub const DEFAULT_DATA_URL: &str = "https://www.gstatic.com/ipranges/cloud.json";

/// Page documenting the data set
pub const DEFAULT_INFO_URL: &str = "https://cloud.google.com/compute/docs/faq#find_ip_range";

/// Organization credited in relationship references
pub const ORGANIZATION: &str = "Google";

/// Crawler name, also used as `reference_name` on relationships
pub const CRAWLER_NAME: &str = "google.gcp_ip_ranges";

/// Neo4j connection configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Neo4jConfig {
    /// Neo4j URI (e.g., "bolt://localhost:7687")
    pub uri: String,

    /// Username for authentication
    pub username: String,

    /// Password for authentication
    pub password: String,
}

impl Default for Neo4jConfig {
    fn default() -> Self {
        Self {
            uri: "bolt://localhost:7687".to_string(),
            username: "neo4j".to_string(),
            password: "password".to_string(),
        }
    }
}

/// Configuration for one crawler run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlerConfig {
    /// URL of the IP ranges document
    pub data_url: String,

    /// Directory receiving the log file
    pub log_dir: PathBuf,

    /// HTTP request timeout in seconds
    pub timeout_secs: u64,

    /// Maximum number of values or links sent to the graph per query
    pub batch_size: usize,

    /// Graph store connection
    pub neo4j: Neo4jConfig,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            data_url: DEFAULT_DATA_URL.to_string(),
            log_dir: PathBuf::from("log"),
            timeout_secs: 30,
            batch_size: 10_000,
            neo4j: Neo4jConfig::default(),
        }
    }
}

impl CrawlerConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> CrawlerResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup, falling back to defaults
    pub fn from_lookup<F>(lookup: F) -> CrawlerResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let batch_size = parse_var(&lookup, "CRAWLER_BATCH_SIZE", defaults.batch_size)?;
        if batch_size == 0 {
            return Err(CrawlerError::Configuration(
                "CRAWLER_BATCH_SIZE must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            data_url: lookup("GCP_IP_RANGES_URL").unwrap_or(defaults.data_url),
            log_dir: lookup("CRAWLER_LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.log_dir),
            timeout_secs: parse_var(&lookup, "CRAWLER_HTTP_TIMEOUT_SECS", defaults.timeout_secs)?,
            batch_size,
            neo4j: Neo4jConfig {
                uri: lookup("NEO4J_URI").unwrap_or(defaults.neo4j.uri),
                username: lookup("NEO4J_USER").unwrap_or(defaults.neo4j.username),
                password: lookup("NEO4J_PASSWORD").unwrap_or(defaults.neo4j.password),
            },
        })
    }

    /// HTTP timeout as a [`Duration`]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Log file path, derived from the crawler name
    pub fn log_file(&self) -> PathBuf {
        self.log_dir.join(format!("{}.log", CRAWLER_NAME.replace('.', "_")))
    }
}

fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> CrawlerResult<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| CrawlerError::Configuration(format!("{key}={raw:?}: {e}"))),
        None => Ok(default),
    }
}
