//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::login::LoginOutput;
use crate::application::refresh::RefreshOutput;
use crate::domain::entity::user::User;

// ============================================================================
// Register
// ============================================================================

/// Register request
///
/// Absent fields deserialize as empty and fail the required-field check.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub news_pref: String,
    pub movie_pref: String,
}

// ============================================================================
// Login
// ============================================================================

/// Login request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

// ============================================================================
// Responses
// ============================================================================

/// User record as returned to clients (never carries the password digest)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub username: String,
    pub news_pref: String,
    pub movie_pref: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.to_string(),
            news_pref: user.news_pref.to_string(),
            movie_pref: user.movie_pref.to_string(),
        }
    }
}

/// Login / refresh response
///
/// The tokens themselves travel only in `Set-Cookie`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub username: String,
    pub access_expires_at: DateTime<Utc>,
    pub refresh_expires_at: DateTime<Utc>,
}

impl From<&LoginOutput> for SessionResponse {
    fn from(output: &LoginOutput) -> Self {
        Self {
            username: output.username.to_string(),
            access_expires_at: output.tokens.access.expires_at,
            refresh_expires_at: output.tokens.refresh.expires_at,
        }
    }
}

impl From<&RefreshOutput> for SessionResponse {
    fn from(output: &RefreshOutput) -> Self {
        Self {
            username: output.username.clone(),
            access_expires_at: output.tokens.access.expires_at,
            refresh_expires_at: output.tokens.refresh.expires_at,
        }
    }
}
