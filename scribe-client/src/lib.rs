//! Scribe HTTP Client
//!
//! A type-safe HTTP client for the transcription backend, plus the job
//! status poller that keeps a local job list fresh while work is outstanding.
//!
//! Authenticated calls take an explicit [`Session`]; the client itself holds
//! no credentials.
//!
//! # Example
//!
//! ```no_run
//! use scribe_client::TranscriptionClient;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = TranscriptionClient::new("http://localhost:8000");
//!     let session = client.login("ada", "Abcdef1!").await?;
//!
//!     for job in client.list_jobs(&session).await? {
//!         println!("{} {}", job.id, job.status);
//!     }
//!     Ok(())
//! }
//! ```

mod auth;
mod catalog;
pub mod error;
mod jobs;
pub mod poller;

// Re-export commonly used types
pub use error::{ClientError, Result};
pub use poller::{JobBoard, JobPoller, JobSnapshot, JobSource, PollerHandle, SessionJobs};
pub use scribe_core::Session;

use reqwest::{Client, RequestBuilder, Url};
use scribe_core::domain::job::JobId;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Header carrying the API key on authenticated routes
pub const API_KEY_HEADER: &str = "X-API-Key";

/// HTTP client for the transcription backend
///
/// Endpoints are grouped by concern:
/// - Authentication (login, registration, account deletion)
/// - Jobs (list, details, upload, download, delete)
/// - Catalog (models, languages, upload limits, API docs)
#[derive(Debug, Clone)]
pub struct TranscriptionClient {
    /// Base URL of the backend (e.g., "http://localhost:8000")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl TranscriptionClient {
    /// Create a new client
    ///
    /// # Example
    /// ```
    /// use scribe_client::TranscriptionClient;
    ///
    /// let client = TranscriptionClient::new("http://localhost:8000");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    ///
    /// # Example
    /// ```
    /// use scribe_client::TranscriptionClient;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(30))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = TranscriptionClient::with_client("http://localhost:8000", http_client);
    /// ```
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the backend
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// URL of one job, with the id as a single percent-encoded path segment
    fn job_url(&self, job_id: &JobId, action: Option<&str>) -> Result<Url> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            ClientError::InternalError(format!("Invalid base URL {}: {}", self.base_url, e))
        })?;

        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                ClientError::InternalError(format!("Base URL {} cannot take a path", self.base_url))
            })?;
            segments.pop_if_empty().push("jobs").push(&job_id.to_string());
            if let Some(action) = action {
                segments.push(action);
            }
        }

        Ok(url)
    }

    /// Attach the session's API key to a request
    fn authed(&self, request: RequestBuilder, session: &Session) -> RequestBuilder {
        request.header(API_KEY_HEADER, &session.api_key)
    }

    async fn send(&self, request: RequestBuilder) -> Result<reqwest::Response> {
        let response = request.send().await?;
        debug!(status = %response.status(), url = %response.url(), "backend responded");
        Ok(response)
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Check the status code and deserialize a JSON body
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let response = Self::check_status(response).await?;

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }

    /// Check the status code and discard the body
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<()> {
        Self::check_status(response).await?;
        Ok(())
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ClientError::from_body(status.as_u16(), &error_text));
        }

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = TranscriptionClient::new("http://localhost:8000");
        assert_eq!(client.base_url(), "http://localhost:8000");
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = TranscriptionClient::new("http://localhost:8000/");
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(client.url("/jobs"), "http://localhost:8000/jobs");
    }

    #[test]
    fn test_job_url_encodes_id() {
        let client = TranscriptionClient::new("http://localhost:8000");

        let url = client.job_url(&JobId::Numeric(5), Some("download")).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/jobs/5/download");

        let url = client
            .job_url(&JobId::Text("a/b?c#d".to_string()), None)
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/jobs/a%2Fb%3Fc%23d");
    }

    #[test]
    fn test_job_url_keeps_base_path() {
        let client = TranscriptionClient::new("http://localhost:8000/api/");
        let url = client.job_url(&JobId::Numeric(3), None).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/jobs/3");
    }

    #[test]
    fn test_client_with_custom_client() {
        let http_client = Client::new();
        let client = TranscriptionClient::with_client("http://localhost:8000", http_client);
        assert_eq!(client.base_url(), "http://localhost:8000");
    }
}
