//! Gemini embeddings over the Generative Language REST API.

use super::{ensure_dimensions, Embedder};
use crate::error::{Result, RosterError};
use crate::http::{create_http_client, DEFAULT_TIMEOUT_SECS};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini-based embedder.
pub struct GeminiEmbedder {
    http: reqwest::Client,
    api_key: String,
    model: String,
    dimensions: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EmbedContentRequest<'a> {
    model: String,
    content: Content<'a>,
    output_dimensionality: usize,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct EmbedContentResponse {
    embedding: ContentEmbedding,
}

#[derive(Deserialize)]
struct ContentEmbedding {
    values: Vec<f32>,
}

impl GeminiEmbedder {
    pub fn new(api_key: &str, model: &str, dimensions: usize) -> Result<Self> {
        Ok(Self {
            http: create_http_client(Duration::from_secs(DEFAULT_TIMEOUT_SECS))?,
            api_key: api_key.to_string(),
            model: model.trim_start_matches("models/").to_string(),
            dimensions,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:embedContent", API_BASE, self.model)
    }
}

#[async_trait]
impl Embedder for GeminiEmbedder {
    #[instrument(skip(self, text), fields(model = %self.model))]
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let body = EmbedContentRequest {
            model: format!("models/{}", self.model),
            content: Content {
                parts: [Part { text }],
            },
            output_dimensionality: self.dimensions,
        };

        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| RosterError::Embedding(format!("Gemini request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(RosterError::Embedding(format!(
                "Gemini embedding API returned {}: {}",
                status, detail
            )));
        }

        let parsed: EmbedContentResponse = response
            .json()
            .await
            .map_err(|e| RosterError::Embedding(format!("Invalid Gemini response: {}", e)))?;

        debug!("Received {}-dimensional embedding", parsed.embedding.values.len());
        ensure_dimensions(parsed.embedding.values, self.dimensions)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}
