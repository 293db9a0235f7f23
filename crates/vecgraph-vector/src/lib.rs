//! `VectorStore` implementations: a LanceDB-backed store for on-disk use and
//! a brute-force in-memory store for tests and embedded callers. Both assign
//! monotonically increasing integer ids and return hits ordered by
//! descending cosine similarity.

pub mod lance;
pub mod memory;
pub mod schema;

pub use lance::LanceVectorStore;
pub use memory::MemoryVectorStore;
