// Copyright (c) 2025 - Cowboy AI, Inc.

//! Google Cloud IP ranges crawler
//!
//! Downloads the published GCP IP range list, attributes each prefix to a
//! service and (through its region) a country, and writes the result into a
//! graph database as `GeoPrefix`, `Tag` and `Country` nodes linked by
//! `CATEGORIZED` and `COUNTRY` relationships.

pub mod config;
pub mod crawler;
pub mod errors;
pub mod extract;
pub mod graph;
pub mod reference;
pub mod regions;
pub mod source;

// Re-export commonly used types
pub use config::{CrawlerConfig, Neo4jConfig};
pub use crawler::{Crawler, IngestSummary};
pub use errors::{CrawlerError, CrawlerResult, GraphError, GraphResult};
pub use graph::{GraphClient, MemoryGraph};
pub use reference::Reference;
