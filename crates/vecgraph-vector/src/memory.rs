//! Brute-force in-memory vector store. Exact cosine scan over every row;
//! intended for tests and small embedded corpora, not large indexes.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::RwLock;

use vecgraph_core::error::{Error, Result};
use vecgraph_core::traits::VectorStore;
use vecgraph_core::types::SearchHit;

struct Row {
    id: i64,
    vector: Vec<f32>,
    text: String,
}

pub struct MemoryVectorStore {
    dim: usize,
    rows: RwLock<Vec<Row>>,
    next_id: AtomicI64,
}

impl MemoryVectorStore {
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            rows: RwLock::new(Vec::new()),
            next_id: AtomicI64::new(0),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_dim(&self, vector: &[f32]) -> Result<()> {
        if vector.len() != self.dim {
            return Err(Error::InvalidInput(format!(
                "vector dimension mismatch: expected {}, got {}",
                self.dim,
                vector.len()
            )));
        }
        Ok(())
    }
}

fn cosine(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let na: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let nb: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    dot / (na * nb).max(1e-12)
}

impl VectorStore for MemoryVectorStore {
    async fn insert(&self, vector: Vec<f32>, text: &str) -> Result<i64> {
        self.check_dim(&vector)?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let mut rows = self
            .rows
            .write()
            .map_err(|_| Error::VectorStore("poisoned lock".to_string()))?;
        rows.push(Row {
            id,
            vector,
            text: text.to_string(),
        });
        Ok(id)
    }

    async fn search(&self, vector: Vec<f32>, k: usize) -> Result<Vec<SearchHit>> {
        self.check_dim(&vector)?;
        let rows = self
            .rows
            .read()
            .map_err(|_| Error::VectorStore("poisoned lock".to_string()))?;
        let mut hits: Vec<SearchHit> = rows
            .iter()
            .map(|r| SearchHit {
                vector_id: r.id,
                score: cosine(&vector, &r.vector),
                text: r.text.clone(),
            })
            .collect();
        hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        hits.truncate(k);
        Ok(hits)
    }
}
