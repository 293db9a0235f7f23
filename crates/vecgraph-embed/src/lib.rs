//! Deterministic feature-hashing embedder.
//!
//! The real embedding model is an external collaborator; the engine only
//! needs the `Embedder` contract. This implementation hashes lowercased
//! tokens into a fixed-dimension bucket space and L2-normalizes, which keeps
//! cosine similarity meaningful for token overlap and makes every test run
//! reproducible with no model files.

use std::hash::{Hash, Hasher};
use twox_hash::XxHash64;

use vecgraph_core::error::{Error, Result};
use vecgraph_core::traits::Embedder;

/// Dimension of the reference configuration (MiniLM-class models).
pub const DEFAULT_DIM: usize = 384;

pub struct HashingEmbedder {
    dim: usize,
}

impl HashingEmbedder {
    pub fn new(dim: usize) -> Self {
        Self { dim }
    }
}

impl Embedder for HashingEmbedder {
    fn dim(&self) -> usize {
        self.dim
    }

    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        if text.trim().is_empty() {
            return Err(Error::InvalidInput("cannot embed empty text".to_string()));
        }
        let mut v = vec![0f32; self.dim];
        for token in tokens(text) {
            let mut hasher = XxHash64::with_seed(0);
            token.hash(&mut hasher);
            let h = hasher.finish();
            let idx = (h as usize) % self.dim;
            // Per-token pseudo-random weight derived from the upper hash bits,
            // so distinct tokens contribute distinct magnitudes.
            let weight = (((h >> 32) as u32) as f32) / (u32::MAX as f32) + 0.25;
            v[idx] += weight;
        }
        let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt().max(1e-6);
        for x in &mut v {
            *x /= norm;
        }
        Ok(v)
    }
}

fn tokens(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
}

/// Default embedder for the workspace. Dimension comes from
/// `VECGRAPH_EMBED_DIM` when set, otherwise [`DEFAULT_DIM`].
pub fn get_default_embedder() -> Result<Box<dyn Embedder>> {
    let dim = match std::env::var("VECGRAPH_EMBED_DIM") {
        Ok(raw) => raw
            .parse::<usize>()
            .map_err(|_| Error::InvalidConfig(format!("VECGRAPH_EMBED_DIM is not a number: {raw}")))?,
        Err(_) => DEFAULT_DIM,
    };
    if dim == 0 {
        return Err(Error::InvalidConfig("embedding dimension must be positive".to_string()));
    }
    Ok(Box::new(HashingEmbedder::new(dim)))
}
