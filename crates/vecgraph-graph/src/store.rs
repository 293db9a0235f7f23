use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use uuid::Uuid;

use vecgraph_core::error::{Error, Result};
use vecgraph_core::traits::GraphStore;
use vecgraph_core::types::{
    DocumentContext, GraphNode, Properties, PropertyValue, Relationship, COVERS_REL,
    DOCUMENT_LABEL, PROP_NAME, TOPIC_LABEL,
};

struct EdgeData {
    id: Uuid,
    rel_type: String,
    properties: Properties,
}

struct Inner {
    graph: DiGraph<GraphNode, EdgeData>,
    by_id: HashMap<Uuid, NodeIndex>,
}

/// Process-local property graph. All methods take `&self`; concurrent reads
/// run in parallel, writes serialize on the inner lock.
pub struct MemoryGraphStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
}

impl Default for MemoryGraphStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryGraphStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                graph: DiGraph::new(),
                by_id: HashMap::new(),
            }),
        }
    }

    pub fn stats(&self) -> GraphStats {
        let inner = match self.inner.read() {
            Ok(g) => g,
            Err(_) => {
                return GraphStats {
                    node_count: 0,
                    edge_count: 0,
                }
            }
        };
        GraphStats {
            node_count: inner.graph.node_count(),
            edge_count: inner.graph.edge_count(),
        }
    }

    pub fn count_nodes_with_label(&self, label: &str) -> usize {
        let Ok(inner) = self.inner.read() else { return 0 };
        inner
            .graph
            .node_indices()
            .filter(|&i| inner.graph[i].label == label)
            .count()
    }

    pub fn get_node(&self, id: Uuid) -> Option<GraphNode> {
        let inner = self.inner.read().ok()?;
        let idx = *inner.by_id.get(&id)?;
        Some(inner.graph[idx].clone())
    }

    /// One-hop outgoing neighbors, optionally filtered by relationship type.
    /// Returns each neighbor with the relationship that reached it.
    pub fn related_entities(
        &self,
        id: Uuid,
        rel_type: Option<&str>,
    ) -> Result<Vec<(GraphNode, Relationship)>> {
        let inner = self.read()?;
        let idx = *inner
            .by_id
            .get(&id)
            .ok_or_else(|| Error::NotFound(format!("no node with id {id}")))?;
        let mut out = Vec::new();
        for edge in inner.graph.edges_directed(idx, Direction::Outgoing) {
            if rel_type.is_some_and(|t| edge.weight().rel_type != t) {
                continue;
            }
            let neighbor = inner.graph[edge.target()].clone();
            let data = edge.weight();
            let rel = Relationship {
                id: data.id,
                from: id,
                to: neighbor.id,
                rel_type: data.rel_type.clone(),
                properties: data.properties.clone(),
            };
            out.push((neighbor, rel));
        }
        Ok(out)
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Inner>> {
        self.inner
            .read()
            .map_err(|_| Error::GraphStore("poisoned lock".to_string()))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Inner>> {
        self.inner
            .write()
            .map_err(|_| Error::GraphStore("poisoned lock".to_string()))
    }
}

impl GraphStore for MemoryGraphStore {
    async fn create_node(&self, label: &str, properties: Properties) -> Result<GraphNode> {
        let node = GraphNode {
            id: Uuid::new_v4(),
            label: label.to_string(),
            properties,
        };
        let mut inner = self.write()?;
        let idx = inner.graph.add_node(node.clone());
        inner.by_id.insert(node.id, idx);
        tracing::debug!(node_id = %node.id, label, "created graph node");
        Ok(node)
    }

    async fn create_relationship(
        &self,
        from: Uuid,
        to: Uuid,
        rel_type: &str,
        properties: Properties,
    ) -> Result<Relationship> {
        let mut inner = self.write()?;
        let from_idx = *inner
            .by_id
            .get(&from)
            .ok_or_else(|| Error::GraphStore(format!("no node with id {from}")))?;
        let to_idx = *inner
            .by_id
            .get(&to)
            .ok_or_else(|| Error::GraphStore(format!("no node with id {to}")))?;
        let rel = Relationship {
            id: Uuid::new_v4(),
            from,
            to,
            rel_type: rel_type.to_string(),
            properties: properties.clone(),
        };
        inner.graph.add_edge(
            from_idx,
            to_idx,
            EdgeData {
                id: rel.id,
                rel_type: rel.rel_type.clone(),
                properties,
            },
        );
        Ok(rel)
    }

    async fn find_by_name(&self, label: &str, name: &str) -> Result<Option<GraphNode>> {
        let inner = self.read()?;
        for idx in inner.graph.node_indices() {
            let node = &inner.graph[idx];
            if node.label != label {
                continue;
            }
            let matches = node
                .properties
                .get(PROP_NAME)
                .and_then(PropertyValue::as_str)
                .is_some_and(|n| n == name);
            if matches {
                return Ok(Some(node.clone()));
            }
        }
        Ok(None)
    }

    async fn document_context(&self, contents: &[String]) -> Result<Vec<DocumentContext>> {
        if contents.is_empty() {
            return Ok(Vec::new());
        }
        let wanted: HashSet<&str> = contents.iter().map(String::as_str).collect();
        let inner = self.read()?;
        let mut rows = Vec::new();
        for idx in inner.graph.node_indices() {
            let node = &inner.graph[idx];
            if node.label != DOCUMENT_LABEL {
                continue;
            }
            let Some(content) = node.content() else {
                continue;
            };
            if !wanted.contains(content) {
                continue;
            }
            let mut topics = Vec::new();
            let mut seen_topics = HashSet::new();
            let mut related = Vec::new();
            let mut seen_related = HashSet::new();
            for edge in inner.graph.edges_directed(idx, Direction::Outgoing) {
                if edge.weight().rel_type != COVERS_REL {
                    continue;
                }
                let topic = &inner.graph[edge.target()];
                if topic.label != TOPIC_LABEL {
                    continue;
                }
                if let Some(topic_name) = topic.name() {
                    if seen_topics.insert(topic_name.to_string()) {
                        topics.push(topic_name.to_string());
                    }
                }
                // Second hop: sibling documents covering the same topic,
                // excluding anything already in the hit set (self included).
                for sibling_edge in inner.graph.edges_directed(edge.target(), Direction::Incoming)
                {
                    if sibling_edge.weight().rel_type != COVERS_REL {
                        continue;
                    }
                    let sibling = &inner.graph[sibling_edge.source()];
                    if sibling.label != DOCUMENT_LABEL {
                        continue;
                    }
                    let Some(sibling_content) = sibling.content() else {
                        continue;
                    };
                    if wanted.contains(sibling_content) {
                        continue;
                    }
                    if seen_related.insert(sibling_content.to_string()) {
                        related.push(sibling_content.to_string());
                    }
                }
            }
            rows.push(DocumentContext {
                node_id: node.id,
                document: node.name().unwrap_or_default().to_string(),
                content: content.to_string(),
                topics,
                related_documents: related,
            });
        }
        Ok(rows)
    }
}
