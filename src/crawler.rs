// Copyright (c) 2025 - Cowboy AI, Inc.

//! GCP IP ranges crawler
//!
//! One linear pass: fetch the document, flatten it into prefix records,
//! resolve regions to countries, then get-or-create nodes and link them.
//!
//! ```text
//! (GeoPrefix:Prefix {prefix})-[:CATEGORIZED]->(Tag {label})
//! (GeoPrefix:Prefix {prefix})-[:COUNTRY]->(Country {country_code})
//! ```

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, info};

use crate::config::CrawlerConfig;
use crate::errors::{CrawlerError, CrawlerResult};
use crate::extract::extract_records;
use crate::graph::{GraphClient, Link, NodeKind, RelationshipType, PREFIX_LABEL};
use crate::reference::Reference;
use crate::source::{fetch_ip_ranges, IpRangesDocument};

/// User-Agent string for data requests
const USER_AGENT: &str = concat!("gcp-ip-ranges/", env!("CARGO_PKG_VERSION"));

/// Relationship types a successful run must leave behind
pub const UNIT_TEST_RELATIONSHIPS: [RelationshipType; 2] =
    [RelationshipType::Categorized, RelationshipType::Country];

/// Counts from one ingestion pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestSummary {
    /// Flattened prefix records
    pub records: usize,
    pub prefix_nodes: usize,
    pub tag_nodes: usize,
    pub country_nodes: usize,
    pub categorized_links: usize,
    pub country_links: usize,
}

/// Crawler writing GCP IP ranges through a [`GraphClient`]
pub struct Crawler<G: GraphClient> {
    client: Client,
    data_url: String,
    graph: G,
    reference: Reference,
}

impl<G: GraphClient> Crawler<G> {
    /// Create a crawler; the reference fetch time is taken now
    pub fn new(config: &CrawlerConfig, graph: G) -> CrawlerResult<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            client,
            data_url: config.data_url.clone(),
            reference: Reference::new(config.data_url.clone()),
            graph,
        })
    }

    pub fn reference(&self) -> &Reference {
        &self.reference
    }

    pub fn graph(&self) -> &G {
        &self.graph
    }

    /// Fetch the published document and push it to the graph
    pub async fn run(&mut self) -> CrawlerResult<IngestSummary> {
        let document = fetch_ip_ranges(&self.client, &self.data_url).await?;
        self.ingest(&document).await
    }

    /// Push an already decoded document to the graph
    pub async fn ingest(&mut self, document: &IpRangesDocument) -> CrawlerResult<IngestSummary> {
        self.reference
            .set_modification_time(document.modification_time());

        let records = extract_records(&document.prefixes);
        info!("Processing {} prefixes", records.len());

        let mut prefixes = BTreeSet::new();
        let mut services = BTreeSet::new();
        let mut countries = BTreeSet::new();

        for record in &records {
            prefixes.insert(record.prefix.clone());
            services.insert(record.service.clone());
            match record.country_code() {
                Some(cc) => {
                    countries.insert(cc.to_string());
                }
                None if !record.scope.is_empty() => {
                    debug!("Unknown GCP region/scope: {}", record.scope);
                }
                None => {}
            }
        }

        info!("Creating {} GeoPrefix nodes", prefixes.len());
        let prefix_id = self
            .graph
            .batch_get_nodes_by_single_prop(NodeKind::GeoPrefix, &prefixes)
            .await?;
        let prefix_node_ids: Vec<_> = prefix_id.values().copied().collect();
        self.graph
            .batch_add_node_label(&prefix_node_ids, PREFIX_LABEL)
            .await?;

        let tag_id = self
            .graph
            .batch_get_nodes_by_single_prop(NodeKind::Tag, &services)
            .await?;

        let country_id = self
            .graph
            .batch_get_nodes_by_single_prop(NodeKind::Country, &countries)
            .await?;

        let mut categorized_links = Vec::new();
        let mut country_links = Vec::new();

        for record in &records {
            let Some(&p_id) = prefix_id.get(&record.prefix) else {
                debug!("No node for prefix {}, skipping links", record.prefix);
                continue;
            };

            if let Some(&t_id) = tag_id.get(&record.service) {
                categorized_links.push(Link::new(p_id, t_id));
            }

            if let Some(&c_id) = record.country_code().and_then(|cc| country_id.get(cc)) {
                country_links.push(Link::new(p_id, c_id));
            }
        }

        info!("Creating {} CATEGORIZED relationships", categorized_links.len());
        self.graph
            .batch_add_links(RelationshipType::Categorized, &categorized_links, &self.reference)
            .await?;

        info!("Creating {} COUNTRY relationships", country_links.len());
        self.graph
            .batch_add_links(RelationshipType::Country, &country_links, &self.reference)
            .await?;

        info!("Finished processing GCP IP ranges: {} prefixes", records.len());

        Ok(IngestSummary {
            records: records.len(),
            prefix_nodes: prefix_id.len(),
            tag_nodes: tag_id.len(),
            country_nodes: country_id.len(),
            categorized_links: categorized_links.len(),
            country_links: country_links.len(),
        })
    }

    /// Check that a previous run left relationships of every expected type
    pub async fn unit_test(&self) -> CrawlerResult<()> {
        for rel_type in UNIT_TEST_RELATIONSHIPS {
            let found = self
                .graph
                .relationship_exists(rel_type, &self.reference.reference_name)
                .await?;
            if !found {
                return Err(CrawlerError::RelationNotFound(
                    rel_type.type_name().to_string(),
                ));
            }
            info!("Found {} relationships for {}", rel_type.type_name(), self.reference.reference_name);
        }
        Ok(())
    }

    /// Release the graph client
    pub fn close(self) {
        info!("Closing graph client {}", self.graph.name());
    }
}
