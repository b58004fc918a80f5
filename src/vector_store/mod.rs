//! Vector index abstraction for Rosterqa.
//!
//! Provides a trait-based interface over the similarity index. The managed
//! Pinecone index is the production backend; the in-memory index serves
//! local runs and tests.

mod memory;
mod pinecone;

pub use memory::MemoryVectorIndex;
pub use pinecone::PineconeIndex;

use crate::config::{IndexProvider, Settings};
use crate::error::Result;
use crate::http::require_key;
use crate::record::RecordMetadata;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// An entry stored in the index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexedEntry {
    /// Record id. Upserting an existing id overwrites it.
    pub id: String,
    /// Embedding vector.
    pub values: Vec<f32>,
    /// Display fields plus canonical text.
    pub metadata: RecordMetadata,
}

/// A similarity query hit.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryMatch {
    pub id: String,
    /// Cosine similarity (higher is better).
    pub score: f32,
    pub metadata: RecordMetadata,
}

/// Trait for vector index implementations.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Fixed dimension of every vector in the index.
    fn dimension(&self) -> usize;

    /// Insert or overwrite entries by id. Returns the number written.
    async fn upsert(&self, entries: &[IndexedEntry]) -> Result<usize>;

    /// Return up to `top_k` matches ordered by descending score.
    /// An empty index yields an empty list.
    async fn query(&self, vector: &[f32], top_k: usize) -> Result<Vec<QueryMatch>>;
}

/// Open the index selected in settings, creating it if it does not exist.
pub async fn connect(settings: &Settings) -> Result<Arc<dyn VectorIndex>> {
    let dimension = settings.embedding.dimensions;

    match settings.vector_index.provider {
        IndexProvider::Memory => {
            info!("Using in-memory vector index ({} dimensions)", dimension);
            Ok(Arc::new(MemoryVectorIndex::new(dimension)))
        }
        IndexProvider::Pinecone => {
            let key = require_key(settings.vector_index.api_key.as_ref(), "PINECONE_API_KEY")?;
            let index = PineconeIndex::connect(&key, &settings.vector_index, dimension).await?;
            Ok(Arc::new(index))
        }
    }
}

/// Compute cosine similarity between two vectors.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot_product / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_similarity() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![1.0, 0.0, 0.0];
        assert!((cosine_similarity(&a, &b) - 1.0).abs() < 0.001);

        let c = vec![0.0, 1.0, 0.0];
        assert!((cosine_similarity(&a, &c)).abs() < 0.001);

        let d = vec![-1.0, 0.0, 0.0];
        assert!((cosine_similarity(&a, &d) + 1.0).abs() < 0.001);

        assert_eq!(cosine_similarity(&a, &[1.0, 0.0]), 0.0);
        assert_eq!(cosine_similarity(&a, &[0.0, 0.0, 0.0]), 0.0);
    }

    #[tokio::test]
    async fn test_connect_memory() {
        let mut settings = Settings::default();
        settings.vector_index.provider = IndexProvider::Memory;
        settings.embedding.dimensions = 4;

        let index = connect(&settings).await.unwrap();
        assert_eq!(index.dimension(), 4);
        assert!(index.query(&[1.0, 0.0, 0.0, 0.0], 5).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_connect_pinecone_requires_key() {
        let settings = Settings::default();
        let err = connect(&settings).await.err().unwrap();
        assert!(err.to_string().contains("PINECONE_API_KEY"));
    }
}
