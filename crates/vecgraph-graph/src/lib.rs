//! In-memory property graph over petgraph.
//!
//! Nodes carry a label and a typed property bag; edges are typed, directed
//! and property-bearing. Node identity is a store-assigned uuid, stable for
//! the lifetime of the store. Implements the `GraphStore` contract including
//! the one batched enrichment query the retrieval orchestrator issues.

pub mod store;

pub use store::{GraphStats, MemoryGraphStore};
