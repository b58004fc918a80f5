//! CLI command implementations.

mod ask;
mod classify;
mod config;
mod ingest;
mod serve;

pub use ask::run_ask;
pub use classify::run_classify;
pub use config::run_config;
pub use ingest::run_ingest;
pub use serve::run_serve;
