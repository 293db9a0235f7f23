//! Topic nodes and document-to-topic relationships.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use vecgraph_core::error::Result;
use vecgraph_core::traits::GraphStore;
use vecgraph_core::types::{GraphNode, Properties, DOCUMENT_LABEL, PROP_NAME, TOPIC_LABEL};

pub struct TopicManager<G: GraphStore> {
    graph: Arc<G>,
    // Serializes the lookup-or-create window; without it two concurrent
    // callers can both miss the lookup and create duplicate topic nodes.
    create_lock: Mutex<()>,
}

impl<G: GraphStore> TopicManager<G> {
    pub fn new(graph: Arc<G>) -> Self {
        Self {
            graph,
            create_lock: Mutex::new(()),
        }
    }

    /// Idempotent lookup-or-create by name: at most one `Topic` node per
    /// distinct name, enforced here rather than in the store.
    pub async fn get_or_create(&self, name: &str) -> Result<GraphNode> {
        let _guard = self.create_lock.lock().await;
        if let Some(existing) = self.graph.find_by_name(TOPIC_LABEL, name).await? {
            return Ok(existing);
        }
        let mut props: Properties = HashMap::new();
        props.insert(PROP_NAME.to_string(), name.into());
        let node = self.graph.create_node(TOPIC_LABEL, props).await?;
        tracing::debug!(topic = name, node_id = %node.id, "created topic");
        Ok(node)
    }

    /// Connect a document to a topic by name. Returns `Ok(false)` without
    /// creating anything when either endpoint is missing.
    pub async fn connect_document(
        &self,
        doc_name: &str,
        topic_name: &str,
        rel_type: &str,
    ) -> Result<bool> {
        let doc = self.graph.find_by_name(DOCUMENT_LABEL, doc_name).await?;
        let topic = self.graph.find_by_name(TOPIC_LABEL, topic_name).await?;
        let (Some(doc), Some(topic)) = (doc, topic) else {
            return Ok(false);
        };
        self.graph
            .create_relationship(doc.id, topic.id, rel_type, HashMap::new())
            .await?;
        Ok(true)
    }
}
