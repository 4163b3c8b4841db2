//! Scribe CLI
//!
//! Command-line client for the transcription service: log in, upload audio,
//! follow job progress and fetch transcripts.

mod commands;
mod config;
mod render;
mod session_store;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "scribe")]
#[command(about = "Audio transcription service CLI", long_about = None)]
struct Cli {
    /// Backend URL
    #[arg(long, env = "SCRIBE_API_URL", default_value = "http://localhost:8000")]
    api_url: String,

    /// Session file (defaults to <config dir>/scribe/session.json)
    #[arg(long, env = "SCRIBE_SESSION_FILE")]
    session_file: Option<PathBuf>,

    /// Refresh interval for watching jobs, in milliseconds
    #[arg(long, env = "SCRIBE_POLL_INTERVAL_MS", default_value_t = 2000)]
    poll_interval_ms: u64,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let config = Config::new(cli.api_url, cli.session_file, cli.poll_interval_ms)?;
    config.validate()?;

    handle_command(cli.command, &config).await
}

/// Log to stderr so command output stays pipeable
fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "scribe=debug,scribe_client=debug"
    } else {
        "scribe=warn,scribe_client=warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
