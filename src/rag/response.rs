//! RAG response generation.

use super::context::{format_context_for_prompt, summarize};
use super::{AnswerEngine, ContextBuilder, MatchSummary, NO_INFORMATION_ANSWER};
use crate::error::Result;
use crate::intent::{classify, Intent, Route};
use tracing::{info, instrument};

/// RAG engine for question answering.
pub struct RagEngine {
    context_builder: ContextBuilder,
    answer_engine: AnswerEngine,
}

impl RagEngine {
    /// Create a new RAG engine.
    pub fn new(context_builder: ContextBuilder, answer_engine: AnswerEngine) -> Self {
        Self {
            context_builder,
            answer_engine,
        }
    }

    /// Ask a single question and get a response.
    ///
    /// Auxiliary intents never touch the index. For the LLM path, an empty
    /// retrieval short-circuits with [`NO_INFORMATION_ANSWER`] and the
    /// generator is not called. Retrieval errors are returned to the caller.
    #[instrument(skip(self), fields(question = %question))]
    pub async fn ask(&self, question: &str) -> Result<RagResponse> {
        let intent = classify(question);
        info!("Processing question (intent: {})", intent);

        if let Route::Auxiliary(_) = intent.route() {
            let answer = self.answer_engine.answer_as(intent, question, None).await;
            return Ok(RagResponse {
                intent,
                answer,
                related: Vec::new(),
            });
        }

        let matches = self.context_builder.build(question).await?;

        if matches.is_empty() {
            info!("No matches; skipping generation");
            return Ok(RagResponse {
                intent,
                answer: NO_INFORMATION_ANSWER.to_string(),
                related: Vec::new(),
            });
        }

        let context = format_context_for_prompt(&matches);
        let answer = self
            .answer_engine
            .answer_as(intent, question, Some(&context))
            .await;

        Ok(RagResponse {
            intent,
            answer,
            related: summarize(&matches),
        })
    }
}

/// A RAG response with answer and related records.
#[derive(Debug, Clone)]
pub struct RagResponse {
    /// Intent the question was classified as.
    pub intent: Intent,
    /// The answer text.
    pub answer: String,
    /// Records retrieved for the answer, best first.
    pub related: Vec<MatchSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::IngestPipeline;
    use crate::record::Record;
    use crate::test_support::{CountingIndex, HashEmbedder, RecordingResponder, ScriptedGenerator};
    use std::sync::atomic::Ordering;
    use std::sync::Arc;

    struct Fixture {
        index: Arc<CountingIndex>,
        embedder: Arc<HashEmbedder>,
        generator: Arc<ScriptedGenerator>,
        engine: RagEngine,
    }

    fn fixture(generator: ScriptedGenerator) -> Fixture {
        let index = Arc::new(CountingIndex::new(16));
        let embedder = Arc::new(HashEmbedder::new(16));
        let generator = Arc::new(generator);
        let responder = Arc::new(RecordingResponder::default());

        let engine = RagEngine::new(
            ContextBuilder::new(index.clone(), embedder.clone()).with_top_k(2),
            AnswerEngine::new(generator.clone(), responder),
        );

        Fixture {
            index,
            embedder,
            generator,
            engine,
        }
    }

    async fn seed(fixture: &Fixture) {
        let records: Vec<Record> = ["Nguyen Van A", "Le Van B", "Pham Thi C"]
            .iter()
            .map(|name| Record {
                name: Some(name.to_string()),
                hobby: Some("đá bóng".to_string()),
                ..Default::default()
            })
            .collect();
        IngestPipeline::new(fixture.embedder.clone(), fixture.index.clone())
            .ingest(&records)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_empty_index_returns_no_information() {
        let fixture = fixture(ScriptedGenerator::echo());
        let response = fixture.engine.ask("Ai thích đá bóng?").await.unwrap();

        assert_eq!(response.answer, NO_INFORMATION_ANSWER);
        assert!(response.related.is_empty());
        assert_eq!(fixture.generator.call_count(), 0);
        assert_eq!(fixture.index.queries.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_database_query_uses_retrieved_context() {
        let fixture = fixture(ScriptedGenerator::echo());
        seed(&fixture).await;

        let response = fixture.engine.ask("Ai thích đá bóng?").await.unwrap();
        assert_eq!(response.intent, Intent::DatabaseQuery);
        assert_eq!(response.related.len(), 2);
        assert!(response.related[0].score >= response.related[1].score);

        let prompt = fixture.generator.last_prompt().unwrap();
        assert!(prompt.starts_with("Dựa vào thông tin sau:\n- "));
        assert!(prompt.contains("Hobby: đá bóng"));
    }

    #[tokio::test]
    async fn test_auxiliary_question_skips_retrieval() {
        let fixture = fixture(ScriptedGenerator::echo());
        seed(&fixture).await;
        let embeds_before = fixture.embedder.calls.load(Ordering::SeqCst);

        let response = fixture.engine.ask("xin chào bạn").await.unwrap();
        assert_eq!(response.intent, Intent::Greeting);
        assert!(response.related.is_empty());
        assert_eq!(fixture.index.queries.load(Ordering::SeqCst), 0);
        assert_eq!(fixture.embedder.calls.load(Ordering::SeqCst), embeds_before);
    }

    #[tokio::test]
    async fn test_general_question_with_failing_generator_falls_back() {
        let fixture = fixture(ScriptedGenerator::failing());
        seed(&fixture).await;

        let response = fixture.engine.ask("thủ đô của pháp là gì").await.unwrap();
        assert_eq!(response.intent, Intent::General);
        assert!(!response.answer.is_empty());
        assert_eq!(fixture.generator.call_count(), 1);
        // General questions are answered from the question alone.
        assert_eq!(
            fixture.generator.last_prompt().unwrap(),
            "Hãy trả lời câu hỏi: thủ đô của pháp là gì"
        );
    }
}
