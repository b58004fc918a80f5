//! CLI module for Rosterqa.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Rosterqa - question answering over a student roster
///
/// Index student records in a vector database and answer questions about
/// them, with small-talk, weather, news, clock and arithmetic helpers.
#[derive(Parser, Debug)]
#[command(name = "rosterqa")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Host to bind to (default: SERVER_HOST or 0.0.0.0)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (default: SERVER_PORT or 5000)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Embed and index students from a JSON file
    Ingest {
        /// JSON file holding a list of students or {"students": [...]}
        file: String,
    },

    /// Ask a question about the indexed students
    Ask {
        /// The question to ask
        question: String,
    },

    /// Show which intent a question is classified as
    Classify {
        /// The question to classify
        question: String,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration (credentials masked)
    Show,

    /// Write a default configuration file if none exists
    Init,

    /// Show configuration file path
    Path,
}
