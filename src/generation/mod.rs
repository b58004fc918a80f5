//! Answer generation backends.

mod fallback;
mod gemini;
mod openai;

pub use fallback::fallback_answer;
pub use gemini::GeminiGenerator;
pub use openai::OpenAIGenerator;

use crate::config::{GenerationProvider, Settings};
use crate::error::Result;
use crate::http::require_key;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

/// Trait for LLM text generation.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Generate a completion for a fully rendered prompt.
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Model identifier, for logging.
    fn model(&self) -> &str;
}

/// Build the generator selected in settings.
pub fn create_generator(settings: &Settings) -> Result<Arc<dyn Generator>> {
    let generation = &settings.generation;
    info!(
        "Using {} generation ({})",
        generation.provider,
        generation.model()
    );

    let generator: Arc<dyn Generator> = match generation.provider {
        GenerationProvider::Gemini => {
            let key = require_key(settings.credentials.gemini_api_key.as_ref(), "GEMINI_API_KEY")?;
            Arc::new(GeminiGenerator::new(&key, generation)?)
        }
        GenerationProvider::OpenAI => {
            let key = require_key(settings.credentials.openai_api_key.as_ref(), "OPENAI_API_KEY")?;
            Arc::new(OpenAIGenerator::new(&key, generation)?)
        }
    };

    Ok(generator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RosterError;

    #[test]
    fn test_create_generator_requires_key() {
        let mut settings = Settings::default();
        settings.generation.provider = GenerationProvider::OpenAI;
        let err = create_generator(&settings).err().unwrap();
        assert!(matches!(err, RosterError::Config(_)));
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }

    #[test]
    fn test_create_generator_uses_default_model() {
        let mut settings = Settings::default();
        settings.credentials.gemini_api_key = Some("g-key".to_string());
        let generator = create_generator(&settings).unwrap();
        assert_eq!(generator.model(), "gemini-1.5-flash");
    }
}
