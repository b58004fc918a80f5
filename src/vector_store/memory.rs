//! In-memory vector index implementation.
//!
//! Useful for testing and small datasets.

use super::{cosine_similarity, IndexedEntry, QueryMatch, VectorIndex};
use crate::error::{Result, RosterError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory vector index.
pub struct MemoryVectorIndex {
    dimension: usize,
    entries: RwLock<HashMap<String, IndexedEntry>>,
}

impl MemoryVectorIndex {
    /// Create an empty index with a fixed dimension.
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fetch an entry by id.
    pub fn get(&self, id: &str) -> Option<IndexedEntry> {
        self.entries.read().ok()?.get(id).cloned()
    }

    fn check_dimension(&self, len: usize) -> Result<()> {
        if len != self.dimension {
            return Err(RosterError::DimensionMismatch {
                expected: self.dimension,
                actual: len,
            });
        }
        Ok(())
    }
}

fn poisoned<T>(_: T) -> RosterError {
    RosterError::VectorIndex("index lock poisoned".to_string())
}

#[async_trait]
impl VectorIndex for MemoryVectorIndex {
    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn upsert(&self, entries: &[IndexedEntry]) -> Result<usize> {
        for entry in entries {
            self.check_dimension(entry.values.len())?;
        }

        let mut store = self.entries.write().map_err(poisoned)?;
        for entry in entries {
            store.insert(entry.id.clone(), entry.clone());
        }
        Ok(entries.len())
    }

    async fn query(&self, vector: &[f32], top_k: usize) -> Result<Vec<QueryMatch>> {
        self.check_dimension(vector.len())?;

        let store = self.entries.read().map_err(poisoned)?;

        let mut results: Vec<QueryMatch> = store
            .values()
            .map(|entry| QueryMatch {
                id: entry.id.clone(),
                score: cosine_similarity(vector, &entry.values),
                metadata: entry.metadata.clone(),
            })
            .collect();

        results.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.id.cmp(&b.id))
        });
        results.truncate(top_k);

        Ok(results)
    }
}
