//! Job command handlers
//!
//! Handles listing, inspecting, downloading, deleting, uploading and
//! watching transcription jobs.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Subcommand;
use colored::*;
use scribe_client::{JobPoller, JobSnapshot, SessionJobs, TranscriptionClient};
use scribe_core::Session;
use scribe_core::domain::catalog::ModelList;
use scribe_core::domain::job::{JobCounts, JobId};
use scribe_core::dto::job::{AUTO_LANGUAGE, CreateJob};
use scribe_core::validation::ValidationError;
use tracing::warn;

use crate::config::Config;
use crate::render::{print_counts, print_job_details, print_job_table};

/// Job subcommands
#[derive(Subcommand)]
pub enum JobCommands {
    /// List all jobs
    List,
    /// Show job details and the transcript
    Show {
        /// Job ID
        id: String,
    },
    /// Save the transcript of a completed job
    Download {
        /// Job ID
        id: String,

        /// Output file (defaults to the name suggested by the backend)
        #[arg(short, long, conflicts_with = "stdout")]
        output: Option<PathBuf>,

        /// Print the transcript instead of saving it
        #[arg(long)]
        stdout: bool,
    },
    /// Delete a job
    Delete {
        /// Job ID
        id: String,
    },
    /// Upload an audio file and start transcribing it
    Upload {
        /// Audio file
        file: PathBuf,

        /// Model to use (defaults to the first loaded model)
        #[arg(short, long)]
        model: Option<String>,

        /// Optional display name
        #[arg(short, long, default_value = "")]
        alias: String,

        /// Language code, or "auto" to detect it
        #[arg(short, long, default_value = AUTO_LANGUAGE)]
        language: String,

        /// Follow progress until the job finishes
        #[arg(short, long)]
        watch: bool,
    },
    /// Follow job progress until every job has finished
    Watch,
}

/// Handle job commands
///
/// Every job command needs a stored session.
pub async fn handle_job_command(command: JobCommands, config: &Config) -> Result<()> {
    let session = config.session_store().require()?;
    let client = config.client();

    match command {
        JobCommands::List => list_jobs(&client, &session).await,
        JobCommands::Show { id } => show_job(&client, &session, &id).await,
        JobCommands::Download { id, output, stdout } => {
            download_transcript(&client, &session, &id, output, stdout).await
        }
        JobCommands::Delete { id } => delete_job(&client, &session, &id).await,
        JobCommands::Upload {
            file,
            model,
            alias,
            language,
            watch,
        } => {
            upload(&client, &session, &file, model, alias, language).await?;
            if watch {
                watch_jobs(config, client, session).await?;
            }
            Ok(())
        }
        JobCommands::Watch => watch_jobs(config, client, session).await,
    }
}

/// List all jobs
async fn list_jobs(client: &TranscriptionClient, session: &Session) -> Result<()> {
    let jobs = client
        .list_jobs(session)
        .await
        .context("Failed to load jobs")?;

    if jobs.is_empty() {
        println!("{}", "No jobs found.".yellow());
        return Ok(());
    }

    print_job_table(&jobs, Utc::now());
    println!();

    let counts = JobCounts::from_jobs(&jobs);
    print_counts(&counts);
    if counts.active() > 0 {
        println!(
            "{}",
            "Run `scribe jobs watch` to follow progress.".dimmed()
        );
    }
    Ok(())
}

/// Get and display a single job
async fn show_job(client: &TranscriptionClient, session: &Session, id: &str) -> Result<()> {
    let job_id = JobId::parse(id);
    let job = client
        .get_job(session, &job_id)
        .await
        .with_context(|| format!("Failed to load job {}", job_id))?;

    print_job_details(&job, Utc::now());
    Ok(())
}

async fn download_transcript(
    client: &TranscriptionClient,
    session: &Session,
    id: &str,
    output: Option<PathBuf>,
    stdout: bool,
) -> Result<()> {
    let job_id = JobId::parse(id);
    let transcript = client
        .download_transcript(session, &job_id)
        .await
        .with_context(|| format!("Failed to download transcript of job {}", job_id))?;

    if stdout {
        let mut out = std::io::stdout().lock();
        out.write_all(transcript.text.as_bytes())?;
        if !transcript.text.ends_with('\n') {
            writeln!(out)?;
        }
        return Ok(());
    }

    let path = output.unwrap_or_else(|| PathBuf::from(transcript.suggested_filename(&job_id)));
    tokio::fs::write(&path, &transcript.text)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!("{} Saved transcript to {}", "✓".green(), path.display());
    Ok(())
}

/// Delete a job, then show the refreshed list
async fn delete_job(client: &TranscriptionClient, session: &Session, id: &str) -> Result<()> {
    let job_id = JobId::parse(id);
    client
        .delete_job(session, &job_id)
        .await
        .with_context(|| format!("Failed to delete job {}", job_id))?;

    println!("{} Deleted job {}", "✓".green(), job_id);
    println!();
    list_jobs(client, session).await
}

async fn upload(
    client: &TranscriptionClient,
    session: &Session,
    file: &Path,
    model: Option<String>,
    alias: String,
    language: String,
) -> Result<()> {
    check_upload(client, file).await?;

    let models = match client.models().await {
        Ok(models) => Some(models),
        Err(e) => {
            warn!("Skipping model check: {}", e);
            None
        }
    };
    let model = choose_model(model, models.as_ref())?;

    let req = CreateJob::new(model)
        .with_alias(alias)
        .with_language(language);
    let created = client
        .submit_job(session, file, &req)
        .await
        .context("Upload failed")?;

    println!(
        "{} Created job {} ({} with model {})",
        "✓".green(),
        created.job_id.to_string().cyan(),
        file.display(),
        req.model
    );
    Ok(())
}

/// Reject files the backend would refuse
///
/// Size and format limits are only enforced when the backend reports them.
async fn check_upload(client: &TranscriptionClient, file: &Path) -> Result<()> {
    let metadata = tokio::fs::metadata(file)
        .await
        .with_context(|| format!("Cannot read {}", file.display()))?;
    let size = metadata.len();
    if size == 0 {
        return Err(ValidationError::EmptyFile.into());
    }

    match client.upload_limits().await {
        Ok(limits) => limits.check(file, size)?,
        Err(e) => warn!("Skipping upload limit check: {}", e),
    }
    Ok(())
}

/// Pick the requested model, or a sensible default from the catalog
fn choose_model(requested: Option<String>, models: Option<&ModelList>) -> Result<String> {
    match (requested, models) {
        (Some(model), Some(list)) if !list.contains(&model) => {
            Err(ValidationError::UnknownModel(model).into())
        }
        (Some(model), _) => Ok(model),
        (None, Some(list)) => list
            .models
            .iter()
            .find(|m| m.loaded)
            .or(list.models.first())
            .map(|m| m.value.clone())
            .ok_or_else(|| anyhow::anyhow!("The backend offers no models")),
        (None, None) => anyhow::bail!("Could not load the model list; pass --model explicitly"),
    }
}

/// Re-render the job table on every snapshot until all jobs are terminal
async fn watch_jobs(config: &Config, client: TranscriptionClient, session: Session) -> Result<()> {
    let poller = JobPoller::new(SessionJobs::new(client, session), config.poll_interval);
    let mut updates = poller.subscribe();
    let mut handle = poller.spawn();

    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = updates.borrow_and_update().clone();
                print_frame(&snapshot);
            }
            result = handle.wait() => {
                if updates.has_changed().unwrap_or(false) {
                    let snapshot = updates.borrow_and_update().clone();
                    print_frame(&snapshot);
                }
                result.context("Failed to load jobs")?;
                println!("{}", "All jobs finished.".green());
                break;
            }
            _ = tokio::signal::ctrl_c() => {
                handle.stop();
                println!("{}", "Stopped watching.".yellow());
                break;
            }
        }
    }

    Ok(())
}

fn print_frame(snapshot: &JobSnapshot) {
    let now = Utc::now();
    println!(
        "{}",
        format!("── {} ", now.with_timezone(&chrono::Local).format("%H:%M:%S")).dimmed()
    );

    if snapshot.jobs.is_empty() {
        println!("{}", "No jobs found.".yellow());
    } else {
        print_job_table(&snapshot.jobs, now);
        print_counts(&snapshot.counts());
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use scribe_core::domain::catalog::ModelInfo;

    fn models() -> ModelList {
        ModelList {
            models: vec![
                ModelInfo {
                    value: "tiny".to_string(),
                    label: "Fast".to_string(),
                    loaded: false,
                },
                ModelInfo {
                    value: "small".to_string(),
                    label: "Accurate".to_string(),
                    loaded: true,
                },
            ],
        }
    }

    // nothing listens on the discard port, so the limits lookup fails
    fn offline_client() -> TranscriptionClient {
        TranscriptionClient::new("http://127.0.0.1:9")
    }

    #[tokio::test]
    async fn test_empty_file_rejected_without_limits() {
        let file = tempfile::Builder::new().suffix(".mp3").tempfile().unwrap();

        let err = check_upload(&offline_client(), file.path()).await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<ValidationError>(),
            Some(&ValidationError::EmptyFile)
        );
    }

    #[tokio::test]
    async fn test_upload_allowed_when_limits_unavailable() {
        let mut file = tempfile::Builder::new().suffix(".mp3").tempfile().unwrap();
        file.write_all(b"ID3 fake audio").unwrap();

        assert!(check_upload(&offline_client(), file.path()).await.is_ok());
    }

    #[tokio::test]
    async fn test_missing_file_rejected() {
        let err = check_upload(&offline_client(), Path::new("/definitely/not/here.mp3"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Cannot read"));
    }

    #[test]
    fn test_choose_requested_model() {
        assert_eq!(
            choose_model(Some("tiny".to_string()), Some(&models())).unwrap(),
            "tiny"
        );
        assert_eq!(choose_model(Some("x".to_string()), None).unwrap(), "x");
    }

    #[test]
    fn test_reject_unknown_model() {
        let err = choose_model(Some("huge".to_string()), Some(&models())).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ValidationError>(),
            Some(&ValidationError::UnknownModel("huge".to_string()))
        );
    }

    #[test]
    fn test_default_prefers_loaded_model() {
        assert_eq!(choose_model(None, Some(&models())).unwrap(), "small");
        assert!(choose_model(None, None).is_err());
        assert!(choose_model(None, Some(&ModelList::default())).is_err());
    }
}
