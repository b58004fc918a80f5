//! Deterministic fakes for unit tests.

use crate::embedding::Embedder;
use crate::error::{Result, RosterError};
use crate::generation::Generator;
use crate::config::{Prompts, Settings};
use crate::intent::Auxiliary;
use crate::orchestrator::Orchestrator;
use crate::responders::Responder;
use crate::vector_store::{IndexedEntry, MemoryVectorIndex, QueryMatch, VectorIndex};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Embeds text by hashing bytes into a fixed number of buckets.
pub struct HashEmbedder {
    dimensions: usize,
    /// Texts containing this marker come back one entry short.
    short_marker: Option<String>,
    pub calls: AtomicUsize,
}

impl HashEmbedder {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions,
            short_marker: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Return a wrong-length vector for texts containing `marker`.
    pub fn short_for(mut self, marker: &str) -> Self {
        self.short_marker = Some(marker.to_string());
        self
    }
}

#[async_trait]
impl Embedder for HashEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut vector = vec![0.0f32; self.dimensions];
        for (i, byte) in text.bytes().enumerate() {
            vector[(byte as usize + i) % self.dimensions] += 1.0;
        }
        if self
            .short_marker
            .as_deref()
            .is_some_and(|marker| text.contains(marker))
        {
            vector.pop();
        }
        Ok(vector)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

/// Generator that echoes prompts, or always fails.
pub struct ScriptedGenerator {
    fail: bool,
    pub prompts: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    pub fn echo() -> Self {
        Self {
            fail: false,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl Generator for ScriptedGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        if self.fail {
            return Err(RosterError::Generation("quota exceeded".to_string()));
        }
        Ok(format!("generated: {}", prompt))
    }

    fn model(&self) -> &str {
        "scripted"
    }
}

/// Responder that records which auxiliary handler was asked for.
#[derive(Default)]
pub struct RecordingResponder {
    pub calls: Mutex<Vec<Auxiliary>>,
}

#[async_trait]
impl Responder for RecordingResponder {
    async fn respond(&self, kind: Auxiliary, question: &str) -> String {
        self.calls.lock().unwrap().push(kind);
        format!("{:?}: {}", kind, question)
    }
}

/// Memory index that records the size of each upsert call.
pub struct CountingIndex {
    pub inner: MemoryVectorIndex,
    pub upserts: Mutex<Vec<Vec<String>>>,
    pub queries: AtomicUsize,
}

impl CountingIndex {
    pub fn new(dimension: usize) -> Self {
        Self {
            inner: MemoryVectorIndex::new(dimension),
            upserts: Mutex::new(Vec::new()),
            queries: AtomicUsize::new(0),
        }
    }

    pub fn batches(&self) -> Vec<Vec<String>> {
        self.upserts.lock().unwrap().clone()
    }
}

#[async_trait]
impl VectorIndex for CountingIndex {
    fn dimension(&self) -> usize {
        self.inner.dimension()
    }

    async fn upsert(&self, entries: &[IndexedEntry]) -> Result<usize> {
        self.upserts
            .lock()
            .unwrap()
            .push(entries.iter().map(|e| e.id.clone()).collect());
        self.inner.upsert(entries).await
    }

    async fn query(&self, vector: &[f32], top_k: usize) -> Result<Vec<QueryMatch>> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        self.inner.query(vector, top_k).await
    }
}

/// Orchestrator over fakes. A differing `embed_dims` makes every embedding
/// the wrong length for the index.
pub fn fake_orchestrator(
    embed_dims: usize,
    index_dims: usize,
    generator: ScriptedGenerator,
) -> Orchestrator {
    Orchestrator::with_components(
        &Settings::default(),
        Prompts::default(),
        Arc::new(HashEmbedder::new(embed_dims)),
        Arc::new(CountingIndex::new(index_dims)),
        Arc::new(generator),
        Arc::new(RecordingResponder::default()),
    )
}
