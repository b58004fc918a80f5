//! Configuration module for Rosterqa.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{AnswerPrompts, Prompts};
pub use settings::{
    CredentialSettings, EmbeddingProvider, EmbeddingSettings, GenerationProvider,
    GenerationSettings, IndexProvider, PromptSettings, RagSettings, ResponderSettings,
    ServerSettings, Settings, VectorIndexSettings,
};
