use crate::error::Result;
use crate::types::{DocumentContext, GraphNode, Properties, Relationship, SearchHit};
use uuid::Uuid;

/// Turns text into a fixed-dimension float vector. Deterministic for a fixed
/// configuration. Consumed as a black box by the orchestrator.
pub trait Embedder: Send + Sync {
    fn dim(&self) -> usize;
    fn embed(&self, text: &str) -> Result<Vec<f32>>;
}

/// Nearest-neighbor index over document embeddings. The store assigns
/// monotonically increasing integer ids at insert time.
#[allow(async_fn_in_trait)]
pub trait VectorStore: Send + Sync {
    /// Insert a vector with its text payload; returns the assigned id.
    async fn insert(&self, vector: Vec<f32>, text: &str) -> Result<i64>;

    /// The `k` nearest records by cosine similarity, ordered by descending
    /// score. Ties break in store-native order.
    async fn search(&self, vector: Vec<f32>, k: usize) -> Result<Vec<SearchHit>>;
}

/// Property-graph engine. The query language stays opaque; this trait models
/// only the contracts the orchestrator needs, including the single batched
/// enrichment request of `document_context`.
#[allow(async_fn_in_trait)]
pub trait GraphStore: Send + Sync {
    async fn create_node(&self, label: &str, properties: Properties) -> Result<GraphNode>;

    async fn create_relationship(
        &self,
        from: Uuid,
        to: Uuid,
        rel_type: &str,
        properties: Properties,
    ) -> Result<Relationship>;

    /// First node with the given label whose `name` property matches.
    async fn find_by_name(&self, label: &str, name: &str) -> Result<Option<GraphNode>>;

    /// Every `Document` node whose `content` is in `contents`, with one-hop
    /// `COVERS` topics and two-hop sibling documents whose content is NOT in
    /// `contents`. One row per matched document, answered as a single
    /// batched request.
    async fn document_context(&self, contents: &[String]) -> Result<Vec<DocumentContext>>;
}
