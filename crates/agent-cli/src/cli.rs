//! Command-line arguments

use clap::{Parser, Subcommand};

/// Multi-agent pipelines over an OpenAI-compatible chat backend
#[derive(Parser, Debug)]
#[command(name = "agent-cli", version, about, long_about = None)]
pub struct Cli {
    /// Model identifier (overrides OPENROUTER_MODEL)
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Sampling temperature in [0, 1] (overrides OPENROUTER_TEMPERATURE)
    #[arg(long, global = true)]
    pub temperature: Option<f32>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Pipelines
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Market research: stock data and news analysts hand off to a report writer
    Research {
        /// Research task (defaults to TSLA market research, answered in Chinese)
        #[arg(long)]
        task: Option<String>,
    },
    /// Code review: a programmer writes code, a reviewer reviews it once
    Review {
        /// Programming task (defaults to the FileProcessor requirements)
        #[arg(long)]
        task: Option<String>,
    },
}
