//! Job domain types

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::time;

/// Job identifier as issued by the backend
///
/// The backend currently hands out integers, but the client treats the value
/// as opaque and also accepts strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JobId {
    Numeric(u64),
    Text(String),
}

impl JobId {
    /// Parse a user-supplied identifier
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        match trimmed.parse::<u64>() {
            Ok(n) => JobId::Numeric(n),
            Err(_) => JobId::Text(trimmed.to_string()),
        }
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobId::Numeric(n) => write!(f, "{}", n),
            JobId::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for JobId {
    fn from(n: u64) -> Self {
        JobId::Numeric(n)
    }
}

/// Transcription job lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Queued,
    Pending,
    Processing,
    Completed,
    Failed,
}

impl JobStatus {
    /// Completed and failed jobs never change again
    pub fn is_terminal(self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }

    /// Wire name of the status
    pub fn as_str(self) -> &'static str {
        match self {
            JobStatus::Queued => "queued",
            JobStatus::Pending => "pending",
            JobStatus::Processing => "processing",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read-only snapshot of a transcription job
///
/// Everything except `id` and `status` is optional: the list endpoint only
/// returns a subset of columns, and most fields appear once processing starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub status: JobStatus,
    #[serde(default)]
    pub progress: Option<f64>,
    #[serde(default, with = "time::lenient")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "time::lenient")]
    pub start_timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub audio_duration: Option<f64>,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub detected_language: Option<String>,
    #[serde(default)]
    pub language_hint: Option<String>,
    #[serde(default)]
    pub file_size: Option<u64>,
    #[serde(default)]
    pub error_message: Option<String>,
    /// Transcript text, only returned by the single-job endpoint
    #[serde(default)]
    pub result: Option<String>,
}

impl Job {
    /// Minimal job with a numeric id and a status, handy for tests and fakes
    pub fn new(id: u64, status: JobStatus) -> Self {
        Self {
            id: JobId::Numeric(id),
            status,
            progress: None,
            created_at: None,
            start_timestamp: None,
            duration: None,
            audio_duration: None,
            filename: None,
            alias: None,
            model: None,
            detected_language: None,
            language_hint: None,
            file_size: None,
            error_message: None,
            result: None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Progress fraction, only while the job is processing
    ///
    /// Queued and pending jobs report whatever the backend stored (usually
    /// 0.0), which is meaningless until work starts.
    pub fn determinate_progress(&self) -> Option<f64> {
        match self.status {
            JobStatus::Processing => self.progress.map(|p| p.clamp(0.0, 1.0)),
            _ => None,
        }
    }

    /// Label shown to the user: alias, then filename, then the id
    pub fn display_name(&self) -> String {
        self.alias
            .as_deref()
            .filter(|a| !a.is_empty())
            .or(self.filename.as_deref().filter(|f| !f.is_empty()))
            .map(str::to_string)
            .unwrap_or_else(|| format!("job {}", self.id))
    }
}

/// True iff at least one job is queued, pending or processing
pub fn requires_polling(jobs: &[Job]) -> bool {
    jobs.iter().any(|job| !job.is_terminal())
}

/// Per-status counts of a job list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JobCounts {
    pub queued: usize,
    pub pending: usize,
    pub processing: usize,
    pub completed: usize,
    pub failed: usize,
}

impl JobCounts {
    pub fn from_jobs(jobs: &[Job]) -> Self {
        jobs.iter().fold(Self::default(), |mut counts, job| {
            match job.status {
                JobStatus::Queued => counts.queued += 1,
                JobStatus::Pending => counts.pending += 1,
                JobStatus::Processing => counts.processing += 1,
                JobStatus::Completed => counts.completed += 1,
                JobStatus::Failed => counts.failed += 1,
            }
            counts
        })
    }

    pub fn total(&self) -> usize {
        self.active() + self.completed + self.failed
    }

    /// Jobs that still need polling
    pub fn active(&self) -> usize {
        self.queued + self.pending + self.processing
    }
}
