//! Outbound HTTP clients with bounded timeouts.

use crate::error::{Result, RosterError};
use async_openai::{config::OpenAIConfig, Client};
use std::time::Duration;

/// Default timeout for embedding, index and generation calls.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Create a plain HTTP client with the given timeout.
pub fn create_http_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| RosterError::Config(format!("Failed to create HTTP client: {}", e)))
}

/// Create an OpenAI client bound to an explicit API key.
///
/// The key is passed in rather than read from the environment so that the
/// settings object stays the single source of credentials.
pub fn create_openai_client(api_key: &str, timeout: Duration) -> Result<Client<OpenAIConfig>> {
    let http_client = create_http_client(timeout)?;
    let config = OpenAIConfig::new().with_api_key(api_key);
    Ok(Client::with_config(config).with_http_client(http_client))
}

/// Require a non-empty credential, naming the variable that supplies it.
pub fn require_key(value: Option<&String>, name: &str) -> Result<String> {
    match value {
        Some(key) if !key.trim().is_empty() => Ok(key.clone()),
        _ => Err(RosterError::Config(format!(
            "{} not set. Set it with: export {}='...'",
            name, name
        ))),
    }
}
