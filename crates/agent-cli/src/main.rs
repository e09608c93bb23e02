//! Command-line interface for agent-rs
//!
//! ```bash
//! export OPENROUTER_API_KEY="sk-or-..."
//! export SERPAPI_API_KEY="..."   # research only
//!
//! agent-cli research
//! agent-cli review --task "实现一个线程安全的LRU缓存"
//! ```

mod cli;
mod commands;

use agent_utils::{LogFormat, Settings, init_tracing};
use clap::Parser;
use cli::{Cli, Command};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    init_tracing(if args.log_json {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    });

    let mut settings = Settings::from_env()?;
    if let Some(model) = args.model {
        settings = settings.with_model(model);
    }
    if let Some(temperature) = args.temperature {
        settings = settings.with_temperature(temperature)?;
    }

    info!(settings = ?settings, "Starting agent-cli");

    match args.command {
        Command::Research { task } => commands::research(&settings, task).await,
        Command::Review { task } => commands::review(&settings, task).await,
    }
}
