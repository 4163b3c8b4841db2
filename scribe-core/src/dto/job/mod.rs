//! Job DTOs

use serde::{Deserialize, Serialize};

use crate::domain::job::JobId;

/// Language value that asks the backend to detect the language itself
pub const AUTO_LANGUAGE: &str = "auto";

/// Form fields sent alongside the audio file in `POST /jobs`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateJob {
    pub model: String,
    pub alias: String,
    pub language: String,
}

impl CreateJob {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            alias: String::new(),
            language: AUTO_LANGUAGE.to_string(),
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = alias.into();
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }
}

/// Response of `POST /jobs`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobCreated {
    pub job_id: JobId,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
}

/// Transcript returned by `GET /jobs/{id}/download`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    /// Filename suggested by the `Content-Disposition` header
    pub filename: Option<String>,
    pub text: String,
}

impl Transcript {
    /// Filename to save under, falling back to one derived from the job id
    pub fn suggested_filename(&self, job_id: &JobId) -> String {
        self.filename
            .as_deref()
            .map(|name| name.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or(name))
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("transcript_{}.txt", job_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_job_defaults() {
        let req = CreateJob::new("tiny");
        assert_eq!(req.language, "auto");
        assert_eq!(req.alias, "");

        let req = req.with_alias("weekly").with_language("de");
        assert_eq!(req.alias, "weekly");
        assert_eq!(req.language, "de");
    }

    #[test]
    fn test_suggested_filename() {
        let id = JobId::Numeric(9);
        let t = Transcript {
            filename: Some("../../etc/standup.txt".to_string()),
            text: String::new(),
        };
        assert_eq!(t.suggested_filename(&id), "standup.txt");

        let t = Transcript {
            filename: None,
            text: String::new(),
        };
        assert_eq!(t.suggested_filename(&id), "transcript_9.txt");
    }
}
