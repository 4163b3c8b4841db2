//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod account;
mod catalog;
mod job;

pub use account::AccountCommands;
pub use job::JobCommands;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Log in and store the API key
    Login {
        #[arg(short, long)]
        username: String,

        #[arg(short, long, env = "SCRIBE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account with a registration key
    Register {
        #[arg(short, long)]
        username: String,

        #[arg(short, long, env = "SCRIBE_PASSWORD", hide_env_values = true)]
        password: String,

        /// Repeat the password
        #[arg(long)]
        confirm: String,

        /// Key handed out by the administrator
        #[arg(long, env = "SCRIBE_REGISTRATION_KEY", hide_env_values = true)]
        registration_key: String,
    },
    /// Forget the stored API key
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Account management
    Account {
        #[command(subcommand)]
        command: AccountCommands,
    },
    /// Transcription jobs
    Jobs {
        #[command(subcommand)]
        command: JobCommands,
    },
    /// List available models
    Models,
    /// List supported languages
    Languages,
    /// Show upload limits
    Limits,
    /// Show the backend's API documentation
    Docs,
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Login { username, password } => {
            account::login(config, &username, &password).await
        }
        Commands::Register {
            username,
            password,
            confirm,
            registration_key,
        } => account::register(config, &username, &password, &confirm, &registration_key).await,
        Commands::Logout => account::logout(config),
        Commands::Whoami => account::whoami(config),
        Commands::Account { command } => account::handle_account_command(command, config).await,
        Commands::Jobs { command } => job::handle_job_command(command, config).await,
        Commands::Models => catalog::list_models(config).await,
        Commands::Languages => catalog::list_languages(config).await,
        Commands::Limits => catalog::show_limits(config).await,
        Commands::Docs => catalog::show_docs(config).await,
    }
}
