// Copyright (c) 2025 - Cowboy AI, Inc.

//! In-memory graph client
//!
//! Same merge semantics as the Neo4j client, with read accessors so callers
//! can inspect what a run wrote.

use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::debug;

use super::{GraphClient, Link, NodeId, NodeKind, RelationshipType};
use crate::errors::{GraphError, GraphResult};
use crate::reference::Reference;

/// Key of a stored relationship
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey {
    pub rel_type: RelationshipType,
    pub src_id: NodeId,
    pub dst_id: NodeId,
    pub reference_name: String,
}

#[derive(Debug, Clone)]
struct StoredNode {
    kind: NodeKind,
    key: String,
    labels: BTreeSet<String>,
}

/// Graph held entirely in memory
#[derive(Debug, Default)]
pub struct MemoryGraph {
    next_id: NodeId,
    index: HashMap<(NodeKind, String), NodeId>,
    nodes: BTreeMap<NodeId, StoredNode>,
    edges: BTreeMap<EdgeKey, Reference>,
}

impl MemoryGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Node id for a natural key, if the node exists
    pub fn node_id(&self, kind: NodeKind, key: &str) -> Option<NodeId> {
        self.index.get(&(kind, key.to_string())).copied()
    }

    /// Natural keys of all nodes of one kind, sorted
    pub fn node_keys(&self, kind: NodeKind) -> Vec<String> {
        let mut keys: Vec<String> = self
            .nodes
            .values()
            .filter(|node| node.kind == kind)
            .map(|node| node.key.clone())
            .collect();
        keys.sort();
        keys
    }

    pub fn node_count(&self, kind: NodeKind) -> usize {
        self.nodes.values().filter(|node| node.kind == kind).count()
    }

    /// Whether a node carries a label
    pub fn has_label(&self, node_id: NodeId, label: &str) -> bool {
        self.nodes
            .get(&node_id)
            .map(|node| node.labels.contains(label))
            .unwrap_or(false)
    }

    /// All relationships of one type, keyed by endpoint ids
    pub fn edges(&self, rel_type: RelationshipType) -> Vec<(&EdgeKey, &Reference)> {
        self.edges
            .iter()
            .filter(|(key, _)| key.rel_type == rel_type)
            .collect()
    }

    pub fn edge_count(&self, rel_type: RelationshipType) -> usize {
        self.edges.keys().filter(|key| key.rel_type == rel_type).count()
    }

    /// Relationships of one type as (source key, destination key) pairs, sorted
    pub fn edge_keys(&self, rel_type: RelationshipType) -> Vec<(String, String)> {
        let mut pairs: Vec<(String, String)> = self
            .edges
            .keys()
            .filter(|key| key.rel_type == rel_type)
            .filter_map(|key| {
                let src = self.nodes.get(&key.src_id)?;
                let dst = self.nodes.get(&key.dst_id)?;
                Some((src.key.clone(), dst.key.clone()))
            })
            .collect();
        pairs.sort();
        pairs
    }
}

#[async_trait]
impl GraphClient for MemoryGraph {
    async fn batch_get_nodes_by_single_prop(
        &mut self,
        kind: NodeKind,
        values: &BTreeSet<String>,
    ) -> GraphResult<HashMap<String, NodeId>> {
        let mut ids = HashMap::with_capacity(values.len());

        for value in values {
            let id = match self.index.get(&(kind, value.clone())).copied() {
                Some(id) => id,
                None => {
                    self.next_id += 1;
                    let id = self.next_id;
                    self.index.insert((kind, value.clone()), id);
                    self.nodes.insert(
                        id,
                        StoredNode {
                            kind,
                            key: value.clone(),
                            labels: BTreeSet::from([kind.label().to_string()]),
                        },
                    );
                    id
                }
            };
            ids.insert(value.clone(), id);
        }

        debug!("Resolved {} {} nodes in memory", ids.len(), kind.label());
        Ok(ids)
    }

    async fn batch_add_node_label(&mut self, node_ids: &[NodeId], label: &str) -> GraphResult<()> {
        for id in node_ids {
            let node = self
                .nodes
                .get_mut(id)
                .ok_or_else(|| GraphError::Query(format!("Node {} does not exist", id)))?;
            node.labels.insert(label.to_string());
        }
        Ok(())
    }

    async fn batch_add_links(
        &mut self,
        rel_type: RelationshipType,
        links: &[Link],
        reference: &Reference,
    ) -> GraphResult<()> {
        for link in links {
            if !self.nodes.contains_key(&link.src_id) || !self.nodes.contains_key(&link.dst_id) {
                return Err(GraphError::Query(format!(
                    "Cannot link missing nodes {} -> {}",
                    link.src_id, link.dst_id
                )));
            }

            let key = EdgeKey {
                rel_type,
                src_id: link.src_id,
                dst_id: link.dst_id,
                reference_name: reference.reference_name.clone(),
            };
            self.edges.insert(key, reference.clone());
        }

        debug!("Merged {} {} links in memory", links.len(), rel_type.type_name());
        Ok(())
    }

    async fn relationship_exists(
        &self,
        rel_type: RelationshipType,
        reference_name: &str,
    ) -> GraphResult<bool> {
        Ok(self
            .edges
            .keys()
            .any(|key| key.rel_type == rel_type && key.reference_name == reference_name))
    }

    async fn health_check(&self) -> GraphResult<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "memory-graph"
    }
}
