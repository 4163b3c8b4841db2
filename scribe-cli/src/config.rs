//! Configuration module
//!
//! Gathers the backend URL, session file location and poll interval from
//! command-line arguments and their environment fallbacks.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Result, anyhow, bail};
use scribe_client::TranscriptionClient;

use crate::session_store::SessionStore;

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// URL of the transcription backend
    pub api_url: String,

    /// Where the session (username and API key) is persisted
    pub session_path: PathBuf,

    /// How often `jobs watch` refreshes while jobs are outstanding
    pub poll_interval: Duration,
}

impl Config {
    /// Build the configuration, falling back to the user config directory
    /// for the session file
    pub fn new(
        api_url: String,
        session_file: Option<PathBuf>,
        poll_interval_ms: u64,
    ) -> Result<Self> {
        let session_path = session_file
            .or_else(default_session_path)
            .ok_or_else(|| {
                anyhow!("Could not determine a config directory; pass --session-file")
            })?;

        Ok(Self {
            api_url,
            session_path,
            poll_interval: Duration::from_millis(poll_interval_ms),
        })
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        if self.api_url.is_empty() {
            bail!("api_url cannot be empty");
        }

        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            bail!("api_url must start with http:// or https://");
        }

        if self.poll_interval.is_zero() {
            bail!("poll interval must be greater than 0");
        }

        Ok(())
    }

    pub fn client(&self) -> TranscriptionClient {
        TranscriptionClient::new(&self.api_url)
    }

    pub fn session_store(&self) -> SessionStore {
        SessionStore::new(self.session_path.clone())
    }
}

/// `<config dir>/scribe/session.json`
pub fn default_session_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("scribe").join("session.json"))
}
