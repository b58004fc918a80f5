//! Pre-flight checks before expensive operations.
//!
//! Validates that the credentials each operation needs are configured
//! before any backend is contacted.

use crate::config::{EmbeddingProvider, GenerationProvider, IndexProvider, Settings};
use crate::error::Result;
use crate::http::require_key;

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Serving needs every backend.
    Serve,
    /// Ingestion needs embeddings and the index.
    Ingest,
    /// Asking needs embeddings, the index and generation.
    Ask,
    /// Classification is local.
    Classify,
}

/// Run pre-flight checks for the given operation.
///
/// Returns Ok(()) if all checks pass, or an error naming the missing variable.
pub fn check(operation: Operation, settings: &Settings) -> Result<()> {
    match operation {
        Operation::Serve | Operation::Ask => {
            check_embedding(settings)?;
            check_index(settings)?;
            check_generation(settings)?;
        }
        Operation::Ingest => {
            check_embedding(settings)?;
            check_index(settings)?;
        }
        Operation::Classify => {}
    }
    Ok(())
}

fn check_embedding(settings: &Settings) -> Result<()> {
    let credentials = &settings.credentials;
    let key = match settings.embedding.provider {
        EmbeddingProvider::Gemini => {
            require_key(credentials.gemini_api_key.as_ref(), "GEMINI_API_KEY")
        }
        EmbeddingProvider::OpenAI => {
            require_key(credentials.openai_api_key.as_ref(), "OPENAI_API_KEY")
        }
    };
    key.map(|_| ())
}

fn check_generation(settings: &Settings) -> Result<()> {
    let credentials = &settings.credentials;
    let key = match settings.generation.provider {
        GenerationProvider::Gemini => {
            require_key(credentials.gemini_api_key.as_ref(), "GEMINI_API_KEY")
        }
        GenerationProvider::OpenAI => {
            require_key(credentials.openai_api_key.as_ref(), "OPENAI_API_KEY")
        }
    };
    key.map(|_| ())
}

fn check_index(settings: &Settings) -> Result<()> {
    match settings.vector_index.provider {
        IndexProvider::Pinecone => {
            require_key(settings.vector_index.api_key.as_ref(), "PINECONE_API_KEY").map(|_| ())
        }
        IndexProvider::Memory => Ok(()),
    }
}
