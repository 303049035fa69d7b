// Copyright (c) 2025 - Cowboy AI, Inc.

//! Neo4j graph client
//!
//! Writes are batched with `UNWIND` and use `MERGE`, so repeated runs over
//! the same data converge on the same graph.
//!
//! # Example
//!
//! ```rust,no_run
//! use gcp_ip_ranges::config::Neo4jConfig;
//! use gcp_ip_ranges::graph::{GraphClient, Neo4jGraphClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let graph = Neo4jGraphClient::connect(&Neo4jConfig::default(), 10_000).await?;
//!     graph.initialize_schema().await?;
//!     graph.health_check().await?;
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use neo4rs::{Graph, Query};
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use tracing::{debug, info};

use super::{GraphClient, Link, NodeId, NodeKind, RelationshipType};
use crate::config::Neo4jConfig;
use crate::errors::{GraphError, GraphResult};
use crate::reference::Reference;

/// Graph client backed by a Neo4j database
pub struct Neo4jGraphClient {
    graph: Arc<Graph>,
    batch_size: usize,
}

impl Neo4jGraphClient {
    /// Connect to Neo4j
    pub async fn connect(config: &Neo4jConfig, batch_size: usize) -> GraphResult<Self> {
        info!("Connecting to Neo4j at {}", config.uri);

        let graph = Graph::new(&config.uri, &config.username, &config.password)
            .await
            .map_err(|e| GraphError::Connection(format!("Failed to connect to Neo4j: {}", e)))?;

        Ok(Self {
            graph: Arc::new(graph),
            batch_size: batch_size.max(1),
        })
    }

    /// Create uniqueness constraints on node keys and indexes on `reference_name`
    pub async fn initialize_schema(&self) -> GraphResult<()> {
        info!("Initializing Neo4j schema");

        for kind in [NodeKind::GeoPrefix, NodeKind::Tag, NodeKind::Country] {
            let statement = format!(
                "CREATE CONSTRAINT {name} IF NOT EXISTS FOR (n:{label}) REQUIRE n.{prop} IS UNIQUE",
                name = format!("{}_{}", kind.label(), kind.key_property()).to_lowercase(),
                label = kind.label(),
                prop = kind.key_property(),
            );
            self.graph.run(Query::new(statement)).await?;
        }

        for rel_type in [RelationshipType::Categorized, RelationshipType::Country] {
            let statement = format!(
                "CREATE INDEX {name} IF NOT EXISTS FOR ()-[r:{rel}]-() ON (r.reference_name)",
                name = format!("{}_reference_name", rel_type.type_name()).to_lowercase(),
                rel = rel_type.type_name(),
            );
            self.graph.run(Query::new(statement)).await?;
        }

        info!("Schema initialization complete");
        Ok(())
    }
}

fn link_query(rel_type: RelationshipType, with_modification: bool) -> String {
    let mut statement = format!(
        r#"
        UNWIND $links AS link
        MATCH (a) WHERE id(a) = link[0]
        MATCH (b) WHERE id(b) = link[1]
        MERGE (a)-[r:{rel} {{reference_name: $reference_name}}]->(b)
        SET r.reference_org = $reference_org,
            r.reference_url_data = $reference_url_data,
            r.reference_url_info = $reference_url_info,
            r.reference_time_fetch = datetime($reference_time_fetch)"#,
        rel = rel_type.type_name(),
    );
    if with_modification {
        statement.push_str(
            ",\n            r.reference_time_modification = datetime($reference_time_modification)",
        );
    }
    statement
}

#[async_trait]
impl GraphClient for Neo4jGraphClient {
    async fn batch_get_nodes_by_single_prop(
        &mut self,
        kind: NodeKind,
        values: &BTreeSet<String>,
    ) -> GraphResult<HashMap<String, NodeId>> {
        let statement = format!(
            r#"
            UNWIND $values AS value
            MERGE (n:{label} {{{prop}: value}})
            RETURN value, id(n) AS node_id
            "#,
            label = kind.label(),
            prop = kind.key_property(),
        );

        let values: Vec<String> = values.iter().cloned().collect();
        let mut ids = HashMap::with_capacity(values.len());

        for chunk in values.chunks(self.batch_size) {
            let query = Query::new(statement.clone()).param("values", chunk.to_vec());
            let mut result = self.graph.execute(query).await?;

            while let Some(row) = result.next().await? {
                let value: String = row
                    .get("value")
                    .map_err(|e| GraphError::InvalidResponse(e.to_string()))?;
                let node_id: i64 = row
                    .get("node_id")
                    .map_err(|e| GraphError::InvalidResponse(e.to_string()))?;
                ids.insert(value, node_id);
            }
        }

        debug!("Resolved {} {} nodes", ids.len(), kind.label());
        Ok(ids)
    }

    async fn batch_add_node_label(&mut self, node_ids: &[NodeId], label: &str) -> GraphResult<()> {
        let statement = format!(
            r#"
            UNWIND $ids AS node_id
            MATCH (n) WHERE id(n) = node_id
            SET n:{label}
            "#
        );

        for chunk in node_ids.chunks(self.batch_size) {
            let query = Query::new(statement.clone()).param("ids", chunk.to_vec());
            self.graph.run(query).await?;
        }

        debug!("Added label {} to {} nodes", label, node_ids.len());
        Ok(())
    }

    async fn batch_add_links(
        &mut self,
        rel_type: RelationshipType,
        links: &[Link],
        reference: &Reference,
    ) -> GraphResult<()> {
        let modification = reference.modification_time_rfc3339();
        let statement = link_query(rel_type, modification.is_some());

        for chunk in links.chunks(self.batch_size) {
            let pairs: Vec<Vec<i64>> = chunk
                .iter()
                .map(|link| vec![link.src_id, link.dst_id])
                .collect();

            let mut query = Query::new(statement.clone())
                .param("links", pairs)
                .param("reference_name", reference.reference_name.clone())
                .param("reference_org", reference.reference_org.clone())
                .param("reference_url_data", reference.reference_url_data.clone())
                .param("reference_url_info", reference.reference_url_info.clone())
                .param("reference_time_fetch", reference.fetch_time_rfc3339());
            if let Some(modified) = &modification {
                query = query.param("reference_time_modification", modified.clone());
            }

            self.graph.run(query).await?;
        }

        debug!("Merged {} {} relationships", links.len(), rel_type.type_name());
        Ok(())
    }

    async fn relationship_exists(
        &self,
        rel_type: RelationshipType,
        reference_name: &str,
    ) -> GraphResult<bool> {
        let query = Query::new(format!(
            r#"
            MATCH ()-[r:{rel}]->()
            WHERE r.reference_name = $reference_name
            RETURN 0 AS found
            LIMIT 1
            "#,
            rel = rel_type.type_name(),
        ))
        .param("reference_name", reference_name);

        let mut result = self.graph.execute(query).await?;
        Ok(result.next().await?.is_some())
    }

    async fn health_check(&self) -> GraphResult<()> {
        self.graph
            .run(Query::new("RETURN 1".to_string()))
            .await
            .map_err(|e| GraphError::Connection(format!("Neo4j health check failed: {}", e)))?;

        debug!("Neo4j health check passed");
        Ok(())
    }

    fn name(&self) -> &str {
        "neo4j-graph"
    }
}
