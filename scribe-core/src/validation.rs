//! Client-side form validation
//!
//! These checks run before any request is sent. The backend validates again;
//! the client only saves a round trip and gives a clearer message.

use thiserror::Error;

use crate::password::{self, MIN_REGISTRATION_SCORE};

/// Reasons a form is rejected before submission
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("passwords do not match")]
    PasswordMismatch,

    #[error(
        "password is too weak ({score}/5 criteria met, at least {} required)",
        MIN_REGISTRATION_SCORE
    )]
    WeakPassword { score: u8 },

    #[error("file is empty")]
    EmptyFile,

    #[error("file is too large ({size} bytes, maximum {max_mb} MB)")]
    FileTooLarge { size: u64, max_mb: u64 },

    #[error("unsupported file type '{extension}' (supported: {supported})")]
    UnsupportedFormat { extension: String, supported: String },

    #[error("unknown model '{0}'")]
    UnknownModel(String),
}

/// Login form contents
#[derive(Debug, Clone)]
pub struct LoginForm<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

impl LoginForm<'_> {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("username", self.username)?;
        require("password", self.password)?;
        Ok(())
    }
}

/// Registration form contents
#[derive(Debug, Clone)]
pub struct RegistrationForm<'a> {
    pub username: &'a str,
    pub password: &'a str,
    pub confirmation: &'a str,
    pub registration_key: &'a str,
}

impl RegistrationForm<'_> {
    /// Checks run in the order the user would fix them
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("username", self.username)?;
        require("password", self.password)?;
        require("password confirmation", self.confirmation)?;
        require("registration key", self.registration_key)?;

        if self.password != self.confirmation {
            return Err(ValidationError::PasswordMismatch);
        }

        let report = password::evaluate(self.password);
        if report.score < MIN_REGISTRATION_SCORE {
            return Err(ValidationError::WeakPassword {
                score: report.score,
            });
        }

        Ok(())
    }
}

fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(())
    }
}
