//! Account command handlers
//!
//! Login, registration, logout and account deletion. Every successful login
//! or registration replaces the stored session; logout and account deletion
//! clear it.

use anyhow::{Context, Result, bail};
use clap::Subcommand;
use colored::*;
use scribe_core::password;
use scribe_core::validation::RegistrationForm;

use crate::config::Config;
use crate::render::print_password_report;
use crate::session_store::LOGGED_OUT_MESSAGE;

/// Account subcommands
#[derive(Subcommand)]
pub enum AccountCommands {
    /// Permanently delete the account and all of its jobs
    Delete {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

pub async fn handle_account_command(command: AccountCommands, config: &Config) -> Result<()> {
    match command {
        AccountCommands::Delete { yes } => delete_account(config, yes).await,
    }
}

pub async fn login(config: &Config, username: &str, password: &str) -> Result<()> {
    let session = config
        .client()
        .login(username, password)
        .await
        .context("Login failed")?;

    config.session_store().save(&session)?;

    println!("{} Logged in as {}", "✓".green(), session.username.bold());
    Ok(())
}

pub async fn register(
    config: &Config,
    username: &str,
    password: &str,
    confirmation: &str,
    registration_key: &str,
) -> Result<()> {
    print_password_report(&password::evaluate(password));
    println!();

    let form = RegistrationForm {
        username,
        password,
        confirmation,
        registration_key,
    };
    let session = config
        .client()
        .register(&form)
        .await
        .context("Registration failed")?;

    config.session_store().save(&session)?;

    println!("{} Registered and logged in as {}", "✓".green(), session.username.bold());
    Ok(())
}

pub fn logout(config: &Config) -> Result<()> {
    if config.session_store().clear()? {
        println!("{} Logged out", "✓".green());
    } else {
        println!("{}", "Not logged in.".yellow());
    }
    Ok(())
}

pub fn whoami(config: &Config) -> Result<()> {
    match config.session_store().load()? {
        Some(session) => {
            println!("User:    {}", session.username.bold());
            println!("API key: {}", session.masked_key().dimmed());
            println!("Backend: {}", config.api_url);
        }
        None => println!("{}", LOGGED_OUT_MESSAGE.yellow()),
    }
    Ok(())
}

async fn delete_account(config: &Config, yes: bool) -> Result<()> {
    let store = config.session_store();
    let session = store.require()?;

    if !yes {
        bail!(
            "This deletes the account '{}' and all of its jobs. Re-run with --yes to confirm.",
            session.username
        );
    }

    let deleted = config
        .client()
        .delete_account(&session)
        .await
        .context("Failed to delete account")?;

    store.clear()?;

    println!(
        "{} {}",
        "✓".green(),
        deleted
            .message
            .unwrap_or_else(|| format!("Account '{}' deleted", session.username))
    );
    Ok(())
}
