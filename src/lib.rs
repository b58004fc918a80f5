//! Rosterqa - question answering over a student roster
//!
//! Student records are embedded and stored in a vector index. Questions are
//! classified by keyword into an intent; questions about students retrieve
//! the closest records and hand them to an LLM, while small-talk, clock,
//! weather, news and arithmetic questions go to dedicated responders.
//!
//! # Architecture
//!
//! - `config` - Settings (TOML + environment) and prompt templates
//! - `record` - Student records and their canonical text
//! - `embedding` - Embedding backends (Gemini, OpenAI)
//! - `vector_store` - Vector index abstraction (Pinecone, in-memory)
//! - `ingest` - Batched embed-and-upsert pipeline
//! - `intent` - Keyword intent classification
//! - `generation` - LLM backends and the local fallback table
//! - `responders` - Auxiliary responders
//! - `rag` - Retrieval and answer dispatch
//! - `orchestrator` - Component wiring
//! - `server` - HTTP API
//!
//! # Example
//!
//! ```rust,no_run
//! use rosterqa::config::Settings;
//! use rosterqa::orchestrator::Orchestrator;
//! use rosterqa::record::Record;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let orchestrator = Orchestrator::new(settings).await?;
//!
//!     let students = vec![Record {
//!         name: Some("Nguyen Van A".to_string()),
//!         skill: Some("Python".to_string()),
//!         ..Default::default()
//!     }];
//!     orchestrator.ingest(&students).await?;
//!
//!     let response = orchestrator.ask("Ai có skill Python?").await?;
//!     println!("{}", response.answer);
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod embedding;
pub mod error;
pub mod generation;
pub mod http;
pub mod ingest;
pub mod intent;
pub mod orchestrator;
pub mod rag;
pub mod record;
pub mod responders;
pub mod server;
pub mod vector_store;

#[cfg(test)]
mod test_support;

pub use error::{Result, RosterError};
