//! Intent dispatch and answer generation.

use crate::config::Prompts;
use crate::generation::{fallback_answer, Generator};
use crate::intent::{classify, Intent, Route};
use crate::responders::Responder;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Returned when retrieval finds nothing; the generator is not called.
pub const NO_INFORMATION_ANSWER: &str = "Không có thông tin.";

/// Turns a question (and optional retrieved context) into answer text.
///
/// Answering never fails: generation errors degrade to a canned answer
/// chosen from the prompt, and auxiliary responders report their own
/// failures as text.
pub struct AnswerEngine {
    generator: Arc<dyn Generator>,
    responder: Arc<dyn Responder>,
    prompts: Prompts,
}

impl AnswerEngine {
    pub fn new(generator: Arc<dyn Generator>, responder: Arc<dyn Responder>) -> Self {
        Self {
            generator,
            responder,
            prompts: Prompts::default(),
        }
    }

    /// Set custom prompts (with user-defined variables).
    pub fn with_prompts(mut self, prompts: Prompts) -> Self {
        self.prompts = prompts;
        self
    }

    /// Classify the question and answer it.
    pub async fn answer(&self, question: &str, context: Option<&str>) -> String {
        let intent = classify(question);
        self.answer_as(intent, question, context).await
    }

    /// Answer a question whose intent is already known.
    #[instrument(skip_all, fields(intent = %intent))]
    pub async fn answer_as(&self, intent: Intent, question: &str, context: Option<&str>) -> String {
        let context = context.filter(|c| !c.trim().is_empty());

        match (intent.route(), context) {
            (Route::Auxiliary(kind), _) => {
                debug!("Delegating to {:?} responder", kind);
                self.responder.respond(kind, question).await
            }
            (Route::Retrieval, Some(context)) => {
                let prompt = self.prompts.context_prompt(context, question);
                self.generate(&prompt).await
            }
            (Route::Retrieval, None) | (Route::Generation, _) => {
                let prompt = self.prompts.question_prompt(question);
                self.generate(&prompt).await
            }
        }
    }

    async fn generate(&self, prompt: &str) -> String {
        match self.generator.generate(prompt).await {
            Ok(text) => text,
            Err(e) => {
                warn!("Generation with {} failed: {}", self.generator.model(), e);
                info!("Using local fallback answer");
                fallback_answer(prompt).to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intent::Auxiliary;
    use crate::test_support::{RecordingResponder, ScriptedGenerator};

    fn engine(
        generator: Arc<ScriptedGenerator>,
        responder: Arc<RecordingResponder>,
    ) -> AnswerEngine {
        AnswerEngine::new(generator, responder)
    }

    #[tokio::test]
    async fn test_database_query_with_context_uses_context_prompt() {
        let generator = Arc::new(ScriptedGenerator::echo());
        let responder = Arc::new(RecordingResponder::default());
        let answer = engine(generator.clone(), responder.clone())
            .answer("Ai có skill Python?", Some("- Nguyen Van A, Skill: Python"))
            .await;

        assert_eq!(
            generator.last_prompt().unwrap(),
            "Dựa vào thông tin sau:\n- Nguyen Van A, Skill: Python\n\nHãy trả lời câu hỏi: Ai có skill Python?"
        );
        assert!(answer.starts_with("generated: "));
        assert!(responder.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_database_query_without_context_uses_question_prompt() {
        let generator = Arc::new(ScriptedGenerator::echo());
        let responder = Arc::new(RecordingResponder::default());
        let engine = engine(generator.clone(), responder);

        engine.answer("tìm người giỏi toán", Some("   ")).await;
        assert_eq!(
            generator.last_prompt().unwrap(),
            "Hãy trả lời câu hỏi: tìm người giỏi toán"
        );

        engine.answer("thủ đô của pháp là gì", Some("- ignored")).await;
        assert_eq!(
            generator.last_prompt().unwrap(),
            "Hãy trả lời câu hỏi: thủ đô của pháp là gì"
        );
    }

    #[tokio::test]
    async fn test_auxiliary_intents_skip_generation() {
        let generator = Arc::new(ScriptedGenerator::echo());
        let responder = Arc::new(RecordingResponder::default());
        let engine = engine(generator.clone(), responder.clone());

        let answer = engine.answer("mấy giờ rồi", None).await;
        assert_eq!(answer, "Time: mấy giờ rồi");
        engine.answer("thời tiết hà nội", None).await;
        engine.answer("1+1 bằng bao nhiêu", None).await;

        assert_eq!(
            *responder.calls.lock().unwrap(),
            vec![Auxiliary::Time, Auxiliary::Weather, Auxiliary::Calculation]
        );
        assert_eq!(generator.call_count(), 0);
    }

    #[tokio::test]
    async fn test_generation_failure_falls_back() {
        let generator = Arc::new(ScriptedGenerator::failing());
        let responder = Arc::new(RecordingResponder::default());
        let engine = engine(generator.clone(), responder);

        let general = engine.answer("thủ đô của pháp là gì", None).await;
        assert_eq!(
            general,
            "Tôi đã tìm thấy thông tin phù hợp. Bạn cần biết thêm chi tiết gì?"
        );
        // Deterministic across calls.
        assert_eq!(engine.answer("thủ đô của pháp là gì", None).await, general);

        let football = engine
            .answer("Ai thích thể thao?", Some("- Pham Thi C, Hobby: đá bóng"))
            .await;
        assert!(football.contains("đá bóng"));
        assert_eq!(generator.call_count(), 3);
    }
}
