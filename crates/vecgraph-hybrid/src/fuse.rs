//! Joins vector hits with graph enrichment rows into the final ranked output.
//!
//! The primary join key is the identity map recorded at ingestion time
//! (vector id -> graph node id), which stays correct when two documents share
//! identical text. Exact content equality is kept as a fallback so graph
//! content ingested outside this engine (no mapping) can still be enriched.
//! Hits with no matching row at all are dropped from the output and counted.

use std::collections::HashMap;
use uuid::Uuid;

use vecgraph_core::types::{DocumentContext, EnrichedResult, SearchHit};

use crate::identity::IdentityMap;

#[derive(Debug, Default)]
pub struct FuseOutcome {
    pub results: Vec<EnrichedResult>,
    /// Hits the vector store returned that have no graph counterpart.
    pub dropped: usize,
}

pub fn fuse(hits: &[SearchHit], rows: &[DocumentContext], ids: &IdentityMap) -> FuseOutcome {
    let by_node: HashMap<Uuid, &DocumentContext> = rows.iter().map(|r| (r.node_id, r)).collect();
    let by_content: HashMap<&str, &DocumentContext> =
        rows.iter().map(|r| (r.content.as_str(), r)).collect();

    let mut outcome = FuseOutcome::default();
    for hit in hits {
        let row = ids
            .node_for(hit.vector_id)
            .and_then(|node_id| by_node.get(&node_id))
            .or_else(|| by_content.get(hit.text.as_str()));
        match row {
            Some(row) => outcome.results.push(EnrichedResult {
                document: row.document.clone(),
                content: row.content.clone(),
                score: hit.score,
                topics: row.topics.clone(),
                related_documents: row.related_documents.clone(),
            }),
            None => outcome.dropped += 1,
        }
    }
    outcome
}
