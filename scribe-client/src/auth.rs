//! Authentication endpoints

use scribe_core::dto::auth::{AccountDeleted, AuthResponse, LoginRequest, RegisterRequest};
use scribe_core::validation::{LoginForm, RegistrationForm};
use tracing::info;

use crate::error::Result;
use crate::{Session, TranscriptionClient};

impl TranscriptionClient {
    // =============================================================================
    // Login & Registration
    // =============================================================================

    /// Exchange username and password for a session
    ///
    /// Empty fields are rejected before any request is made.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session> {
        LoginForm { username, password }.validate()?;

        let request = self.client.post(self.url("/login")).json(&LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        });
        let response = self.send(request).await?;
        let auth: AuthResponse = self.handle_response(response).await?;

        info!(username, "logged in");
        Ok(Session::new(username, auth.api_key))
    }

    /// Create an account and return its session
    ///
    /// The registration form is validated first: all fields present, matching
    /// confirmation, and a password meeting at least three strength criteria.
    pub async fn register(&self, form: &RegistrationForm<'_>) -> Result<Session> {
        form.validate()?;

        let request = self.client.post(self.url("/register")).json(&RegisterRequest {
            username: form.username.to_string(),
            password: form.password.to_string(),
            reg_key: form.registration_key.to_string(),
        });
        let response = self.send(request).await?;
        let auth: AuthResponse = self.handle_response(response).await?;

        info!(username = form.username, "registered");
        Ok(Session::new(form.username, auth.api_key))
    }

    // =============================================================================
    // Account
    // =============================================================================

    /// Delete the caller's account and every job it owns
    pub async fn delete_account(&self, session: &Session) -> Result<AccountDeleted> {
        let request = self.authed(self.client.delete(self.url("/user/delete")), session);
        let response = self.send(request).await?;

        self.handle_response(response).await
    }
}
