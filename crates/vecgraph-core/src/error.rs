use thiserror::Error;
use uuid::Uuid;

/// Error taxonomy shared by every layer. Backend failures are wrapped with
/// their display text; the orchestrator never inspects backend error types.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Embedding failed: {0}")]
    Embedding(String),

    #[error("Vector store: {0}")]
    VectorStore(String),

    #[error("Graph store: {0}")]
    GraphStore(String),

    #[error("Vector id {vector_id} is already mapped to node {existing}; refusing to remap to {attempted}")]
    DuplicateMapping {
        vector_id: i64,
        existing: Uuid,
        attempted: Uuid,
    },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;
