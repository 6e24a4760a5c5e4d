//! CLI entry point for gemipy

use anyhow::{Context, Result};
use clap::Parser;
use gemipy_agent::QueryDispatcher;
use gemipy_core::logging::init_logging;
use gemipy_core::{ConfigManager, JsonStore, LoggingConfig, SessionManager, StorePaths};
use gemipy_providers::GeminiClient;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

mod commands;
mod render;
mod shell;
mod spinner;

use shell::Shell;

#[derive(Parser)]
#[command(name = "gemipy")]
#[command(about = "Terminal chat client for Gemini with persistent history")]
#[command(version)]
struct Cli {
    /// Prompt to send once, without starting the interactive shell
    prompt: Option<String>,

    /// Directory for history, configuration and logs (default: home directory)
    #[arg(short, long)]
    data_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = match &cli.data_dir {
        Some(dir) => StorePaths::in_dir(dir),
        None => StorePaths::from_home(),
    };

    std::fs::create_dir_all(&paths.log_dir).with_context(|| {
        format!("failed to create log directory {}", paths.log_dir.display())
    })?;
    let logging = LoggingConfig {
        dir: paths.log_dir.to_string_lossy().into_owned(),
        ..LoggingConfig::default()
    };
    let _guard = init_logging(&logging);
    info!("Starting gemipy, history at {}", paths.history.display());

    let config = ConfigManager::load(JsonStore::new(&paths.config));
    let session = SessionManager::load(JsonStore::new(&paths.history));
    let dispatcher = QueryDispatcher::new(Arc::new(GeminiClient::new()));

    let mut shell = Shell::new(dispatcher, session, config, paths.input_history.clone());
    render::clear_screen();
    shell.banner();

    match cli.prompt {
        Some(prompt) => shell.run_once(&prompt).await,
        None => shell.run().await?,
    }

    Ok(())
}
