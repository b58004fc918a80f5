//! Embedding generation for indexing and retrieval.

mod gemini;
mod openai;

pub use gemini::GeminiEmbedder;
pub use openai::OpenAIEmbedder;

use crate::config::{EmbeddingProvider, Settings};
use crate::error::{Result, RosterError};
use crate::http::require_key;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

/// Trait for embedding generation.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Generate an embedding for a single text.
    ///
    /// Implementations return a vector of exactly [`Embedder::dimensions`]
    /// entries or an error.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Get the embedding dimensions.
    fn dimensions(&self) -> usize;
}

/// Reject a backend vector whose length differs from the target.
///
/// Truncating would keep the call "working" while quietly distorting
/// similarity scores, so a wrong length is always an error.
pub fn ensure_dimensions(embedding: Vec<f32>, expected: usize) -> Result<Vec<f32>> {
    if embedding.len() != expected {
        return Err(RosterError::DimensionMismatch {
            expected,
            actual: embedding.len(),
        });
    }
    Ok(embedding)
}

/// Build the embedder selected in settings.
///
/// Missing credentials fail here, at startup, rather than on the first request.
pub fn create_embedder(settings: &Settings) -> Result<Arc<dyn Embedder>> {
    let model = settings.embedding.model();
    let dimensions = settings.embedding.dimensions;

    info!(
        "Using {} embeddings ({}, {} dimensions)",
        settings.embedding.provider, model, dimensions
    );

    let embedder: Arc<dyn Embedder> = match settings.embedding.provider {
        EmbeddingProvider::Gemini => {
            let key = require_key(settings.credentials.gemini_api_key.as_ref(), "GEMINI_API_KEY")?;
            Arc::new(GeminiEmbedder::new(&key, model, dimensions)?)
        }
        EmbeddingProvider::OpenAI => {
            let key = require_key(settings.credentials.openai_api_key.as_ref(), "OPENAI_API_KEY")?;
            Arc::new(OpenAIEmbedder::new(&key, model, dimensions)?)
        }
    };

    Ok(embedder)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_dimensions() {
        assert_eq!(ensure_dimensions(vec![0.1; 4], 4).unwrap().len(), 4);

        match ensure_dimensions(vec![0.1; 3072], 768) {
            Err(RosterError::DimensionMismatch { expected, actual }) => {
                assert_eq!(expected, 768);
                assert_eq!(actual, 3072);
            }
            other => panic!("expected dimension mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_create_embedder_requires_key() {
        let settings = Settings::default();
        let err = create_embedder(&settings).err().unwrap();
        assert!(matches!(err, RosterError::Config(_)));
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }

    #[test]
    fn test_create_embedder_selects_provider() {
        let mut settings = Settings::default();
        settings.embedding.provider = EmbeddingProvider::OpenAI;
        settings.credentials.openai_api_key = Some("sk-test".to_string());
        settings.embedding.dimensions = 512;

        let embedder = create_embedder(&settings).unwrap();
        assert_eq!(embedder.dimensions(), 512);
    }
}
