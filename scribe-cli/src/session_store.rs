//! Persisted session
//!
//! The session lives in a small JSON file with the keys `username` and
//! `apiKey`. Logging out or deleting the account removes the file; with no
//! stored API key every authenticated command shows the logged-out message.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use scribe_core::Session;
use tracing::{debug, warn};

/// Shown whenever a command needs a session and none is stored
pub const LOGGED_OUT_MESSAGE: &str =
    "Not logged in. Run `scribe login` or `scribe register` to get started.";

/// File-backed session storage
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored session
    ///
    /// A missing file, an unreadable file or an empty field all mean
    /// "logged out".
    pub fn load(&self) -> Result<Option<Session>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to read session file {}", self.path.display())
                });
            }
        };

        match serde_json::from_str::<Session>(&raw) {
            Ok(session) if !session.username.is_empty() && !session.api_key.is_empty() => {
                Ok(Some(session))
            }
            Ok(_) => Ok(None),
            Err(e) => {
                warn!("Ignoring malformed session file {}: {}", self.path.display(), e);
                Ok(None)
            }
        }
    }

    /// Load the stored session or fail with the logged-out message
    pub fn require(&self) -> Result<Session> {
        self.load()?.ok_or_else(|| anyhow!(LOGGED_OUT_MESSAGE))
    }

    /// Persist a session, replacing any previous one
    pub fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let json = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write session file {}", self.path.display()))?;
        restrict_permissions(&self.path)?;

        debug!("Session saved to {}", self.path.display());
        Ok(())
    }

    /// Remove both persisted fields; returns whether a session existed
    pub fn clear(&self) -> Result<bool> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e).with_context(|| {
                format!("Failed to remove session file {}", self.path.display())
            }),
        }
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
        .with_context(|| format!("Failed to restrict permissions on {}", path.display()))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<()> {
    Ok(())
}
