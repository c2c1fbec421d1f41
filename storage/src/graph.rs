use carepath_core::error::{CarepathError, ErrorCode};
use carepath_core::model::NodeKind;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("node not found: {0}")]
    NodeNotFound(String),
}

impl CarepathError for GraphError {
    fn error_code(&self) -> ErrorCode {
        match self {
            GraphError::NodeNotFound(_) => ErrorCode::NotFound,
        }
    }
}

/// Edge representation: (target key, relation label)
pub type EdgeData = (String, String);

/// In-memory directed knowledge graph.
///
/// Keys iterate in sorted order (BTreeMap), so anything derived from
/// iteration (notably embedding assignment) is reproducible run to run.
#[derive(Debug)]
pub struct KnowledgeGraph {
    nodes: BTreeMap<String, NodeKind>,
    adjacency: BTreeMap<String, Vec<EdgeData>>,
    edge_count: usize,
}

impl KnowledgeGraph {
    pub fn new() -> Self {
        Self {
            nodes: BTreeMap::new(),
            adjacency: BTreeMap::new(),
            edge_count: 0,
        }
    }

    /// Insert or replace a node.
    pub fn insert_node(&mut self, key: impl Into<String>, kind: NodeKind) {
        self.nodes.insert(key.into(), kind);
    }

    pub fn insert_edge(
        &mut self,
        source: impl Into<String>,
        target: impl Into<String>,
        relation: impl Into<String>,
    ) {
        self.adjacency
            .entry(source.into())
            .or_default()
            .push((target.into(), relation.into()));
        self.edge_count += 1;
    }

    pub fn contains(&self, key: &str) -> bool {
        self.nodes.contains_key(key)
    }

    pub fn kind(&self, key: &str) -> Result<&NodeKind, GraphError> {
        self.nodes
            .get(key)
            .ok_or_else(|| GraphError::NodeNotFound(key.to_string()))
    }

    /// Outgoing neighbors of a node.
    ///
    /// Fails with `NodeNotFound` when the key is absent; a known node with no
    /// outgoing edges yields an empty slice.
    pub fn neighbors(&self, key: &str) -> Result<&[EdgeData], GraphError> {
        if !self.nodes.contains_key(key) {
            return Err(GraphError::NodeNotFound(key.to_string()));
        }
        Ok(self
            .adjacency
            .get(key)
            .map(Vec::as_slice)
            .unwrap_or_default())
    }

    /// Node keys in sorted order.
    pub fn node_keys(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }
}

impl Default for KnowledgeGraph {
    fn default() -> Self {
        Self::new()
    }
}
