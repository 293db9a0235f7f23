//! Hybrid retrieval orchestrator.
//!
//! Combines semantic nearest-neighbor search over dense embeddings with
//! property-graph traversal over documents, topics and their relationships.
//! Documents are indexed in both stores at ingestion time; at query time the
//! vector store ranks, the graph store enriches, and fusion joins the two
//! result sets without re-ranking.

pub mod engine;
pub mod fuse;
pub mod identity;
pub mod topics;

pub use engine::HybridSearchEngine;
pub use fuse::{fuse, FuseOutcome};
pub use identity::IdentityMap;
pub use topics::TopicManager;
