//! Catalog command handlers

use anyhow::{Context, Result};
use colored::*;
use scribe_core::format::format_file_size;

use crate::config::Config;

pub async fn list_models(config: &Config) -> Result<()> {
    let list = config
        .client()
        .models()
        .await
        .context("Failed to load models")?;

    if list.models.is_empty() {
        println!("{}", "No models available.".yellow());
        return Ok(());
    }

    for model in &list.models {
        let state = if model.loaded {
            "loaded".green()
        } else {
            "not loaded".dimmed()
        };
        println!("  {:<12} {:<28} {}", model.value.cyan(), model.label, state);
    }
    Ok(())
}

pub async fn list_languages(config: &Config) -> Result<()> {
    let list = config
        .client()
        .languages()
        .await
        .context("Failed to load languages")?;

    for language in &list.languages {
        println!(
            "  {:<6} {} {}",
            language.code.cyan(),
            language.flag.as_deref().unwrap_or(" "),
            language.name
        );
    }
    Ok(())
}

pub async fn show_limits(config: &Config) -> Result<()> {
    let limits = config
        .client()
        .upload_limits()
        .await
        .context("Failed to load upload limits")?;

    println!("{}", "Upload limits:".bold());
    println!(
        "  Max size:        {} MB ({})",
        limits.max_size_mb,
        format_file_size(limits.max_size_bytes)
    );
    if !limits.supported_formats.is_empty() {
        println!("  Formats:         {}", limits.supported_formats.join(", "));
    }
    if let Some(max) = limits.max_concurrent_jobs {
        println!("  Concurrent jobs: {}", max);
    }
    Ok(())
}

pub async fn show_docs(config: &Config) -> Result<()> {
    let docs = config
        .client()
        .api_docs()
        .await
        .context("Failed to load API documentation")?;

    match &docs.version {
        Some(version) => println!("{} {}", docs.title.bold(), version.dimmed()),
        None => println!("{}", docs.title.bold()),
    }
    if let Some(description) = &docs.description {
        println!("{}", description);
    }
    println!();

    for endpoint in &docs.endpoints {
        let lock = if endpoint.requires_auth { "🔒" } else { "  " };
        println!(
            "  {} {:<7} {:<24} {}",
            lock,
            endpoint.method.cyan(),
            endpoint.path,
            endpoint.title
        );
        if let Some(description) = &endpoint.description {
            println!("     {}", description.dimmed());
        }
    }
    Ok(())
}
