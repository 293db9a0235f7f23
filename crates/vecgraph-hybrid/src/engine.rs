//! The hybrid retrieval engine: ingestion into both stores plus the
//! vector-then-graph search path.

use std::sync::Arc;

use vecgraph_core::error::{Error, Result};
use vecgraph_core::traits::{Embedder, GraphStore, VectorStore};
use vecgraph_core::types::{
    EnrichedResult, GraphNode, Properties, SearchHit, COVERS_REL, DOCUMENT_LABEL, PROP_CONTENT,
    PROP_NAME, PROP_VECTOR_ID, TOPIC_LABEL,
};

use crate::fuse::fuse;
use crate::identity::IdentityMap;
use crate::topics::TopicManager;

pub struct HybridSearchEngine<V, G>
where
    V: VectorStore,
    G: GraphStore,
{
    embedder: Box<dyn Embedder>,
    vector: V,
    graph: Arc<G>,
    topics: TopicManager<G>,
    ids: IdentityMap,
}

impl<V, G> HybridSearchEngine<V, G>
where
    V: VectorStore,
    G: GraphStore,
{
    pub fn new(embedder: Box<dyn Embedder>, vector: V, graph: G) -> Self {
        let graph = Arc::new(graph);
        Self {
            embedder,
            vector,
            graph: Arc::clone(&graph),
            topics: TopicManager::new(graph),
            ids: IdentityMap::new(),
        }
    }

    /// Ingest one document into both stores.
    ///
    /// The vector insert runs first so the assigned id can be written into
    /// the graph node. A graph failure after that point leaves an orphaned
    /// vector record with no mapping; ingestion is not atomic and is not
    /// rolled back here.
    pub async fn add_document(
        &self,
        text: &str,
        properties: Properties,
    ) -> Result<(i64, GraphNode)> {
        if text.trim().is_empty() {
            return Err(Error::InvalidInput("document text is empty".to_string()));
        }
        let embedding = self
            .embedder
            .embed(text)
            .map_err(|e| Error::Embedding(e.to_string()))?;
        let vector_id = self.vector.insert(embedding, text).await?;

        let mut props = properties;
        props.insert(PROP_CONTENT.to_string(), text.into());
        props.insert(PROP_VECTOR_ID.to_string(), vector_id.into());
        if !props.contains_key(PROP_NAME) {
            props.insert(PROP_NAME.to_string(), format!("Document-{vector_id}").into());
        }

        let node = self.graph.create_node(DOCUMENT_LABEL, props).await?;
        self.ids.record(vector_id, node.id)?;
        tracing::debug!(vector_id, node_id = %node.id, "ingested document");
        Ok((vector_id, node))
    }

    /// Create a topic node without dedup. Prefer [`Self::get_or_create_topic`]
    /// unless the caller has already checked existence.
    pub async fn add_topic(&self, name: &str, mut properties: Properties) -> Result<GraphNode> {
        properties.insert(PROP_NAME.to_string(), name.into());
        self.graph.create_node(TOPIC_LABEL, properties).await
    }

    pub async fn get_or_create_topic(&self, name: &str) -> Result<GraphNode> {
        self.topics.get_or_create(name).await
    }

    pub async fn connect_document_to_topic(
        &self,
        doc_name: &str,
        topic_name: &str,
    ) -> Result<bool> {
        self.topics
            .connect_document(doc_name, topic_name, COVERS_REL)
            .await
    }

    pub async fn connect_document_to_topic_with(
        &self,
        doc_name: &str,
        topic_name: &str,
        rel_type: &str,
    ) -> Result<bool> {
        self.topics
            .connect_document(doc_name, topic_name, rel_type)
            .await
    }

    /// Pure-vector search: top-k hits ordered by descending similarity, no
    /// graph involvement.
    pub async fn search_unenriched(&self, query: &str, top_k: usize) -> Result<Vec<SearchHit>> {
        let query_vec = self
            .embedder
            .embed(query)
            .map_err(|e| Error::Embedding(e.to_string()))?;
        self.vector.search(query_vec, top_k).await
    }

    /// Hybrid search: vector top-k, one batched graph enrichment query over
    /// all hit texts, then fusion. Results keep the vector rank order; hits
    /// without a graph counterpart are dropped, not errored.
    pub async fn search(&self, query: &str, top_k: usize) -> Result<Vec<EnrichedResult>> {
        let hits = self.search_unenriched(query, top_k).await?;
        if hits.is_empty() {
            return Ok(Vec::new());
        }
        let texts: Vec<String> = hits.iter().map(|h| h.text.clone()).collect();
        let rows = self.graph.document_context(&texts).await?;
        let outcome = fuse(&hits, &rows, &self.ids);
        if outcome.dropped > 0 {
            tracing::warn!(
                dropped = outcome.dropped,
                query,
                "vector hits had no graph counterpart; results incomplete"
            );
        }
        tracing::info!(
            query,
            hits = hits.len(),
            returned = outcome.results.len(),
            "hybrid search"
        );
        Ok(outcome.results)
    }

    pub fn identity(&self) -> &IdentityMap {
        &self.ids
    }

    pub fn graph(&self) -> &G {
        &self.graph
    }
}
