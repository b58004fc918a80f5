//! Record ingestion: normalize, embed, and upsert in bounded batches.

use crate::config::Settings;
use crate::embedding::{create_embedder, Embedder};
use crate::error::{Result, RosterError};
use crate::record::Record;
use crate::vector_store::{self, IndexedEntry, VectorIndex};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Number of entries accumulated before each upsert.
pub const DEFAULT_BATCH_SIZE: usize = 50;

/// Pushes records through the embedder into the vector index.
pub struct IngestPipeline {
    embedder: Arc<dyn Embedder>,
    index: Arc<dyn VectorIndex>,
    batch_size: usize,
}

impl IngestPipeline {
    pub fn new(embedder: Arc<dyn Embedder>, index: Arc<dyn VectorIndex>) -> Self {
        Self {
            embedder,
            index,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    /// Build only the embedder and index named in `settings`.
    ///
    /// Generation credentials are not required to ingest.
    pub async fn from_settings(settings: &Settings) -> Result<Self> {
        let embedder = create_embedder(settings)?;
        let index = vector_store::connect(settings).await?;
        Ok(Self::new(embedder, index))
    }

    /// Override the flush threshold.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Ingest records in input order and return how many were written.
    ///
    /// Records without an id get `student_NNNN` from their 1-based position.
    /// The first failure aborts the call. Batches flushed before the failure
    /// stay committed in the index; ingestion is not atomic.
    #[instrument(skip(self, records), fields(count = records.len()))]
    pub async fn ingest(&self, records: &[Record]) -> Result<usize> {
        let expected = self.index.dimension();
        let mut batch: Vec<IndexedEntry> = Vec::with_capacity(self.batch_size);
        let mut flushed = 0;

        for (position, record) in records.iter().enumerate() {
            let id = record.resolved_id(position + 1);
            let metadata = record.metadata();
            let values = self.embedder.embed(&metadata.text).await?;

            if values.len() != expected {
                return Err(RosterError::DimensionMismatch {
                    expected,
                    actual: values.len(),
                });
            }

            batch.push(IndexedEntry { id, values, metadata });

            if batch.len() >= self.batch_size {
                flushed += self.flush(&mut batch).await?;
            }
        }

        if !batch.is_empty() {
            flushed += self.flush(&mut batch).await?;
        }

        info!("Ingested {} records", flushed);
        Ok(records.len())
    }

    async fn flush(&self, batch: &mut Vec<IndexedEntry>) -> Result<usize> {
        debug!("Flushing batch of {} entries", batch.len());
        let count = batch.len();
        self.index.upsert(batch).await?;
        batch.clear();
        Ok(count)
    }
}
