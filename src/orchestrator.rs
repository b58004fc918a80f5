//! Service orchestrator for rosterqa.
//!
//! Owns the backends built from settings at startup and exposes the two
//! operations every surface needs: ingesting records and answering questions.

use crate::config::{Prompts, Settings};
use crate::embedding::{create_embedder, Embedder};
use crate::error::Result;
use crate::generation::{create_generator, Generator};
use crate::ingest::IngestPipeline;
use crate::rag::{AnswerEngine, ContextBuilder, RagEngine, RagResponse};
use crate::record::Record;
use crate::responders::{LiveResponder, Responder};
use crate::vector_store::{self, VectorIndex};
use std::sync::Arc;
use tracing::{info, instrument};

/// The main orchestrator. Components are built once and never mutated.
pub struct Orchestrator {
    embedder: Arc<dyn Embedder>,
    index: Arc<dyn VectorIndex>,
    rag: RagEngine,
}

impl Orchestrator {
    /// Build every backend named in `settings`.
    ///
    /// Fails when a required credential is missing or the index cannot be
    /// reached or created.
    pub async fn new(settings: Settings) -> Result<Self> {
        let prompts = Prompts::load(
            settings.prompts.custom_dir.as_deref(),
            Some(&settings.prompts.variables),
        )?;

        let embedder = create_embedder(&settings)?;
        let generator = create_generator(&settings)?;
        let responder: Arc<dyn Responder> = Arc::new(LiveResponder::new(&settings.responders)?);

        info!(
            "Connecting to {} index '{}'",
            settings.vector_index.provider, settings.vector_index.name
        );
        let index = vector_store::connect(&settings).await?;

        Ok(Self::with_components(
            &settings, prompts, embedder, index, generator, responder,
        ))
    }

    /// Create an orchestrator with custom components.
    pub fn with_components(
        settings: &Settings,
        prompts: Prompts,
        embedder: Arc<dyn Embedder>,
        index: Arc<dyn VectorIndex>,
        generator: Arc<dyn Generator>,
        responder: Arc<dyn Responder>,
    ) -> Self {
        let rag = RagEngine::new(
            ContextBuilder::new(index.clone(), embedder.clone()).with_top_k(settings.rag.top_k),
            AnswerEngine::new(generator, responder).with_prompts(prompts),
        );

        Self {
            embedder,
            index,
            rag,
        }
    }

    /// Embed and upsert records. Returns the number of records accepted.
    #[instrument(skip_all, fields(records = records.len()))]
    pub async fn ingest(&self, records: &[Record]) -> Result<usize> {
        IngestPipeline::new(self.embedder.clone(), self.index.clone())
            .ingest(records)
            .await
    }

    /// Answer a question.
    pub async fn ask(&self, question: &str) -> Result<RagResponse> {
        self.rag.ask(question).await
    }
}
