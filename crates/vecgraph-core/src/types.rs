//! Domain types shared by the vector store, graph store and orchestrator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Node label for retrievable documents.
pub const DOCUMENT_LABEL: &str = "Document";
/// Node label for topic/category nodes. Topics have no vector counterpart.
pub const TOPIC_LABEL: &str = "Topic";
/// Default document-to-topic relationship type.
pub const COVERS_REL: &str = "COVERS";

/// Well-known property keys.
pub const PROP_NAME: &str = "name";
pub const PROP_CONTENT: &str = "content";
pub const PROP_VECTOR_ID: &str = "vector_id";

/// Closed set of scalar property values. Documents may carry arbitrary extra
/// properties, but only these shapes; validation happens at the ingestion
/// boundary rather than inside the stores.
///
/// Untagged: variant order matters for deserialization (bool before numbers,
/// timestamps before free text).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Timestamp(DateTime<Utc>),
    Text(String),
}

impl PropertyValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            PropertyValue::Integer(n) => Some(*n),
            _ => None,
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(v: &str) -> Self {
        PropertyValue::Text(v.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(v: String) -> Self {
        PropertyValue::Text(v)
    }
}

impl From<i64> for PropertyValue {
    fn from(v: i64) -> Self {
        PropertyValue::Integer(v)
    }
}

impl From<f64> for PropertyValue {
    fn from(v: f64) -> Self {
        PropertyValue::Float(v)
    }
}

impl From<bool> for PropertyValue {
    fn from(v: bool) -> Self {
        PropertyValue::Bool(v)
    }
}

impl From<DateTime<Utc>> for PropertyValue {
    fn from(v: DateTime<Utc>) -> Self {
        PropertyValue::Timestamp(v)
    }
}

/// Property bag carried by nodes and relationships.
pub type Properties = HashMap<String, PropertyValue>;

/// A node in the property graph. `id` is store-assigned and stable; `name`
/// and `content` live in `properties` like any other attribute.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: Uuid,
    pub label: String,
    pub properties: Properties,
}

impl GraphNode {
    pub fn name(&self) -> Option<&str> {
        self.properties.get(PROP_NAME).and_then(PropertyValue::as_str)
    }

    pub fn content(&self) -> Option<&str> {
        self.properties.get(PROP_CONTENT).and_then(PropertyValue::as_str)
    }
}

/// A typed, directed, property-bearing edge. Duplicate relationships of the
/// same type between the same pair are permitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Relationship {
    pub id: Uuid,
    pub from: Uuid,
    pub to: Uuid,
    pub rel_type: String,
    pub properties: Properties,
}

/// One nearest-neighbor hit. Transient, lives for a single query.
/// `score` is similarity (higher is better), not distance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub vector_id: i64,
    pub score: f32,
    pub text: String,
}

/// One row of the batched graph enrichment query: a matched document plus
/// its one-hop topics and two-hop sibling documents. `topics` and
/// `related_documents` are distinct; order follows the store's traversal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentContext {
    pub node_id: Uuid,
    pub document: String,
    pub content: String,
    pub topics: Vec<String>,
    pub related_documents: Vec<String>,
}

/// Final fused output record. Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichedResult {
    pub document: String,
    pub content: String,
    pub score: f32,
    pub topics: Vec<String>,
    pub related_documents: Vec<String>,
}
