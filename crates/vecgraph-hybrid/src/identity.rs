//! Bidirectional association between vector-store record ids and graph-node
//! ids for the same logical document. Populated once per document at
//! ingestion time, looked up afterward, never mutated or removed.

use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

use vecgraph_core::error::{Error, Result};

#[derive(Default)]
struct Maps {
    forward: HashMap<i64, Uuid>,
    reverse: HashMap<Uuid, i64>,
}

#[derive(Default)]
pub struct IdentityMap {
    maps: RwLock<Maps>,
}

impl IdentityMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pairing. Re-recording the identical pair is a no-op;
    /// binding a vector id to a different node is an ingestion bug and
    /// fails loudly instead of silently overwriting.
    pub fn record(&self, vector_id: i64, node_id: Uuid) -> Result<()> {
        let mut maps = self
            .maps
            .write()
            .map_err(|_| Error::GraphStore("poisoned identity map lock".to_string()))?;
        if let Some(&existing) = maps.forward.get(&vector_id) {
            if existing == node_id {
                return Ok(());
            }
            return Err(Error::DuplicateMapping {
                vector_id,
                existing,
                attempted: node_id,
            });
        }
        maps.forward.insert(vector_id, node_id);
        maps.reverse.insert(node_id, vector_id);
        Ok(())
    }

    pub fn node_for(&self, vector_id: i64) -> Option<Uuid> {
        self.maps.read().ok()?.forward.get(&vector_id).copied()
    }

    pub fn vector_for(&self, node_id: Uuid) -> Option<i64> {
        self.maps.read().ok()?.reverse.get(&node_id).copied()
    }

    pub fn len(&self) -> usize {
        self.maps.read().map(|m| m.forward.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
