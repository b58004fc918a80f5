//! Configuration settings for Rosterqa.

use crate::error::{Result, RosterError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub embedding: EmbeddingSettings,
    pub generation: GenerationSettings,
    pub vector_index: VectorIndexSettings,
    pub rag: RagSettings,
    pub responders: ResponderSettings,
    pub server: ServerSettings,
    pub credentials: CredentialSettings,
    pub prompts: PromptSettings,
}

/// Embedding backend selector.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingProvider {
    /// Google Gemini embeddings (default).
    #[default]
    Gemini,
    /// OpenAI embeddings.
    OpenAI,
}

impl std::str::FromStr for EmbeddingProvider {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gemini" | "google" => Ok(EmbeddingProvider::Gemini),
            "openai" => Ok(EmbeddingProvider::OpenAI),
            _ => Err(format!("Unknown embedding provider: {}", s)),
        }
    }
}

impl std::fmt::Display for EmbeddingProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmbeddingProvider::Gemini => write!(f, "gemini"),
            EmbeddingProvider::OpenAI => write!(f, "openai"),
        }
    }
}

/// Generation (LLM) backend selector.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GenerationProvider {
    #[default]
    Gemini,
    OpenAI,
}

impl std::str::FromStr for GenerationProvider {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gemini" | "google" => Ok(GenerationProvider::Gemini),
            "openai" => Ok(GenerationProvider::OpenAI),
            _ => Err(format!("Unknown generation provider: {}", s)),
        }
    }
}

impl std::fmt::Display for GenerationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerationProvider::Gemini => write!(f, "gemini"),
            GenerationProvider::OpenAI => write!(f, "openai"),
        }
    }
}

/// Vector index backend selector.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum IndexProvider {
    /// Managed Pinecone serverless index (default).
    #[default]
    Pinecone,
    /// Process-local index, lost on shutdown.
    Memory,
}

impl std::str::FromStr for IndexProvider {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pinecone" => Ok(IndexProvider::Pinecone),
            "memory" => Ok(IndexProvider::Memory),
            _ => Err(format!("Unknown vector index provider: {}", s)),
        }
    }
}

impl std::fmt::Display for IndexProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IndexProvider::Pinecone => write!(f, "pinecone"),
            IndexProvider::Memory => write!(f, "memory"),
        }
    }
}

/// Embedding generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingSettings {
    /// Embedding provider (gemini, openai).
    pub provider: EmbeddingProvider,
    /// Model override. Empty selects the provider's default model.
    pub model: String,
    /// Target embedding dimension. Every stored vector must have exactly this length.
    pub dimensions: usize,
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            provider: EmbeddingProvider::Gemini,
            model: String::new(),
            dimensions: 768,
        }
    }
}

impl EmbeddingSettings {
    /// Model name, falling back to the provider default.
    pub fn model(&self) -> &str {
        if !self.model.is_empty() {
            return &self.model;
        }
        match self.provider {
            EmbeddingProvider::Gemini => "gemini-embedding-001",
            EmbeddingProvider::OpenAI => "text-embedding-3-small",
        }
    }
}

/// Answer generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    /// Generation provider (gemini, openai).
    pub provider: GenerationProvider,
    /// Model override. Empty selects the provider's default model.
    pub model: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            provider: GenerationProvider::Gemini,
            model: String::new(),
            temperature: 0.7,
            max_output_tokens: 200,
        }
    }
}

impl GenerationSettings {
    /// Model name, falling back to the provider default.
    pub fn model(&self) -> &str {
        if !self.model.is_empty() {
            return &self.model;
        }
        match self.provider {
            GenerationProvider::Gemini => "gemini-1.5-flash",
            GenerationProvider::OpenAI => "gpt-4o-mini",
        }
    }
}

/// Vector index settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorIndexSettings {
    /// Index provider (pinecone, memory).
    pub provider: IndexProvider,
    /// Index name.
    pub name: String,
    /// Serverless cloud.
    pub cloud: String,
    /// Serverless region.
    pub region: String,
    /// Pinecone API key.
    pub api_key: Option<String>,
}

impl Default for VectorIndexSettings {
    fn default() -> Self {
        Self {
            provider: IndexProvider::Pinecone,
            name: "students-index".to_string(),
            cloud: "aws".to_string(),
            region: "us-east-1".to_string(),
            api_key: None,
        }
    }
}

/// Retrieval settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RagSettings {
    /// Maximum number of matches retrieved per question.
    pub top_k: usize,
}

impl Default for RagSettings {
    fn default() -> Self {
        Self { top_k: 5 }
    }
}

/// Auxiliary responder settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponderSettings {
    /// WeatherAPI.com key.
    pub weather_api_key: Option<String>,
    /// NewsAPI.org key.
    pub news_api_key: Option<String>,
    /// Timeout for each outbound responder call.
    pub timeout_seconds: u64,
}

impl Default for ResponderSettings {
    fn default() -> Self {
        Self {
            weather_api_key: None,
            news_api_key: None,
            timeout_seconds: 10,
        }
    }
}

/// HTTP server bind settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

/// API credentials shared by the embedding and generation backends.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CredentialSettings {
    pub gemini_api_key: Option<String>,
    pub openai_api_key: Option<String>,
}

/// Prompt customization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct PromptSettings {
    /// Directory for custom prompts (overrides defaults).
    pub custom_dir: Option<String>,
    /// Custom variables available in all prompts as {{variable_name}}.
    pub variables: std::collections::HashMap<String, String>,
}

impl Settings {
    /// Load settings from the default configuration file, then apply
    /// environment overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> Result<Self> {
        let mut settings = Self::load_file(path)?;
        settings.apply_env(|key| std::env::var(key).ok())?;
        Ok(settings)
    }

    /// Load only the configuration file, without environment overrides.
    pub fn load_file(path: Option<&PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Apply environment overrides using `lookup` to resolve variables.
    ///
    /// Empty values are ignored. Values that fail to parse are configuration
    /// errors rather than silently falling back to defaults.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get("EMBEDDING_PROVIDER") {
            self.embedding.provider = v.parse().map_err(RosterError::Config)?;
        }
        if let Some(v) = get("LLM_PROVIDER") {
            self.generation.provider = v.parse().map_err(RosterError::Config)?;
        }
        if let Some(v) = get("VECTOR_INDEX_PROVIDER") {
            self.vector_index.provider = v.parse().map_err(RosterError::Config)?;
        }
        if let Some(v) = get("GEMINI_API_KEY") {
            self.credentials.gemini_api_key = Some(v);
        }
        if let Some(v) = get("OPENAI_API_KEY") {
            self.credentials.openai_api_key = Some(v);
        }
        if let Some(v) = get("PINECONE_API_KEY") {
            self.vector_index.api_key = Some(v);
        }
        if let Some(v) = get("PINECONE_INDEX") {
            self.vector_index.name = v;
        }
        if let Some(v) = get("PINECONE_ENV") {
            self.vector_index.region = v;
        }
        if let Some(v) = get("PINECONE_CLOUD") {
            self.vector_index.cloud = v;
        }
        if let Some(v) = get("EMBEDDING_DIM") {
            self.embedding.dimensions = parse_number("EMBEDDING_DIM", &v)?;
        }
        if let Some(v) = get("TOP_K") {
            self.rag.top_k = parse_number("TOP_K", &v)?;
        }
        if let Some(v) = get("WEATHER_API_KEY") {
            self.responders.weather_api_key = Some(v);
        }
        if let Some(v) = get("NEWS_API_KEY") {
            self.responders.news_api_key = Some(v);
        }
        if let Some(v) = get("SERVER_HOST") {
            self.server.host = v;
        }
        if let Some(v) = get("SERVER_PORT") {
            self.server.port = parse_number("SERVER_PORT", &v)?;
        }

        self.validate()
    }

    /// Reject settings that can never work.
    pub fn validate(&self) -> Result<()> {
        if self.embedding.dimensions == 0 {
            return Err(RosterError::Config(
                "embedding dimension must be greater than zero".to_string(),
            ));
        }
        if self.rag.top_k == 0 {
            return Err(RosterError::Config(
                "top_k must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| RosterError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("rosterqa")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| RosterError::Config(format!("{} must be a number, got '{}'", key, value)))
}
