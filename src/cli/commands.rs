use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "remedy-finder", about = "Symptom-to-remedy recommendation service")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the HTTP API
    Serve {
        /// Address to bind (overrides REMEDY_BIND)
        #[arg(long)]
        bind: Option<String>,
    },
    /// Load a disease dataset (JSON array) into the vector index
    Ingest {
        /// Path to the dataset file
        file: PathBuf,
    },
    /// Run one query through the pipeline and print the response
    Ask {
        /// Free-text symptom description
        query: String,
    },
    /// Show index and interaction log statistics
    Stats,
    /// Show recent interactions
    History {
        #[arg(long, default_value = "20")]
        limit: usize,
    },
    /// List symptom suggestions
    Suggestions,
}
