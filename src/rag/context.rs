//! Context building for RAG responses.

use super::MatchSummary;
use crate::embedding::Embedder;
use crate::error::Result;
use crate::vector_store::{QueryMatch, VectorIndex};
use std::sync::Arc;
use tracing::debug;

/// Retrieves the records most similar to a question.
pub struct ContextBuilder {
    index: Arc<dyn VectorIndex>,
    embedder: Arc<dyn Embedder>,
    top_k: usize,
}

impl ContextBuilder {
    /// Create a new context builder.
    pub fn new(index: Arc<dyn VectorIndex>, embedder: Arc<dyn Embedder>) -> Self {
        Self {
            index,
            embedder,
            top_k: 5,
        }
    }

    /// Set the maximum number of matches.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Embed the question and query the index.
    ///
    /// Backend errors propagate; there is no fallback for retrieval.
    pub async fn build(&self, question: &str) -> Result<Vec<QueryMatch>> {
        let query_embedding = self.embedder.embed(question).await?;
        let matches = self.index.query(&query_embedding, self.top_k).await?;
        debug!("Retrieved {} matches", matches.len());
        Ok(matches)
    }
}

/// Format matches as prompt context, one line per record.
pub fn format_context_for_prompt(matches: &[QueryMatch]) -> String {
    matches
        .iter()
        .map(|m| {
            let md = &m.metadata;
            let field = |v: &Option<String>| v.clone().unwrap_or_default();
            format!(
                "- {}, DOB: {}, Address: {}, Hobby: {}, Skill: {}",
                field(&md.name),
                field(&md.dob),
                field(&md.address),
                field(&md.hobby),
                field(&md.skill)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Summaries returned to clients alongside the answer.
pub fn summarize(matches: &[QueryMatch]) -> Vec<MatchSummary> {
    matches.iter().map(MatchSummary::from).collect()
}
