// Copyright (c) 2025 - Cowboy AI, Inc.

//! Graph client abstraction
//!
//! The crawler writes through a [`GraphClient`], so the same ingestion runs
//! against Neo4j or an in-memory graph.
//!
//! # Graph Model
//!
//! ## Nodes
//! - **GeoPrefix** (also labelled **Prefix**): a CIDR block, keyed by `prefix`
//! - **Tag**: a service name, keyed by `label`
//! - **Country**: an ISO 3166-1 alpha-2 code, keyed by `country_code`
//!
//! ## Relationships
//! - `(GeoPrefix)-[:CATEGORIZED]->(Tag)`
//! - `(GeoPrefix)-[:COUNTRY]->(Country)`
//!
//! Every relationship carries the [`Reference`] properties and is merged on
//! its endpoints, type and `reference_name`.

pub mod memory;
#[cfg(feature = "neo4j")]
pub mod neo4j;

pub use memory::MemoryGraph;
#[cfg(feature = "neo4j")]
pub use neo4j::Neo4jGraphClient;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

use crate::errors::GraphResult;
use crate::reference::Reference;

/// Store-assigned node identifier
pub type NodeId = i64;

/// Extra label carried by every GeoPrefix node
pub const PREFIX_LABEL: &str = "Prefix";

/// Node kinds written by the crawler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NodeKind {
    GeoPrefix,
    Tag,
    Country,
}

impl NodeKind {
    /// Primary label of the node
    pub fn label(&self) -> &'static str {
        match self {
            NodeKind::GeoPrefix => "GeoPrefix",
            NodeKind::Tag => "Tag",
            NodeKind::Country => "Country",
        }
    }

    /// Property holding the natural key
    pub fn key_property(&self) -> &'static str {
        match self {
            NodeKind::GeoPrefix => "prefix",
            NodeKind::Tag => "label",
            NodeKind::Country => "country_code",
        }
    }
}

/// Relationship types written by the crawler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RelationshipType {
    /// Prefix is used by a service
    Categorized,
    /// Prefix is located in a country
    Country,
}

impl RelationshipType {
    pub fn type_name(&self) -> &'static str {
        match self {
            RelationshipType::Categorized => "CATEGORIZED",
            RelationshipType::Country => "COUNTRY",
        }
    }
}

/// Directed link between two existing nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Link {
    pub src_id: NodeId,
    pub dst_id: NodeId,
}

impl Link {
    pub fn new(src_id: NodeId, dst_id: NodeId) -> Self {
        Self { src_id, dst_id }
    }
}

/// Write access to the shared graph
///
/// Implementations must be idempotent: repeating a call with the same input
/// leaves the graph unchanged.
#[async_trait]
pub trait GraphClient: Send + Sync {
    /// Get or create one node per value, keyed by the kind's key property
    ///
    /// Returns the node id of every requested value. Values the store could
    /// not register are absent from the map.
    async fn batch_get_nodes_by_single_prop(
        &mut self,
        kind: NodeKind,
        values: &BTreeSet<String>,
    ) -> GraphResult<HashMap<String, NodeId>>;

    /// Add an extra label to existing nodes
    async fn batch_add_node_label(&mut self, node_ids: &[NodeId], label: &str) -> GraphResult<()>;

    /// Create relationships of one type, all annotated with `reference`
    async fn batch_add_links(
        &mut self,
        rel_type: RelationshipType,
        links: &[Link],
        reference: &Reference,
    ) -> GraphResult<()>;

    /// Whether at least one relationship of `rel_type` carries `reference_name`
    async fn relationship_exists(
        &self,
        rel_type: RelationshipType,
        reference_name: &str,
    ) -> GraphResult<bool>;

    /// Verify the store is reachable
    async fn health_check(&self) -> GraphResult<()>;

    /// Get the name of this graph client
    fn name(&self) -> &str;
}
