//! Authentication DTOs

use serde::{Deserialize, Serialize};

/// Body of `POST /login`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Body of `POST /register`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub reg_key: String,
}

/// Response of login and registration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub api_key: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub user_id: Option<u64>,
}

/// Response of `DELETE /user/delete`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountDeleted {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub deleted_user_id: Option<u64>,
}
