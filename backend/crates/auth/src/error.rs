//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.
//!
//! Variants carry the precise cause for logging. What reaches the client is
//! decided by [`AuthError::to_app_error`], which deliberately collapses every
//! credential and token failure into a generic unauthorized response.

use std::fmt;

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::domain::value_object::token::TokenType;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Why a token was not accepted. Logged, never returned to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenRejection {
    /// No token in the cookie or Authorization header
    Missing,
    /// Not a decodable JWT, unsupported algorithm or missing claims
    Malformed,
    /// Signature does not verify under the secret for the expected kind
    BadSignature,
    /// Signature verifies but the `token_type` claim is the other kind
    WrongKind,
    /// `exp` is not in the future
    Expired,
}

impl fmt::Display for TokenRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TokenRejection::Missing => "missing",
            TokenRejection::Malformed => "malformed",
            TokenRejection::BadSignature => "bad signature",
            TokenRejection::WrongKind => "wrong token kind",
            TokenRejection::Expired => "expired",
        })
    }
}

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Missing or malformed request field
    #[error("Validation failed: {0}")]
    Validation(String),

    /// User name already exists
    #[error("username already exists")]
    UserNameTaken,

    /// Store returned zero records for the filter
    #[error("User not found")]
    UserNotFound,

    /// Unknown user or wrong password
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Access or refresh token not accepted
    #[error("{kind} token rejected: {reason}")]
    TokenRejected {
        kind: TokenType,
        reason: TokenRejection,
    },

    /// A valid token names a user that is not in the store
    #[error("No user record for authenticated subject {0}")]
    UserRecordMissing(String),

    /// Invalid startup configuration
    #[error("Invalid auth configuration: {0}")]
    Config(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    pub fn token_rejected(kind: TokenType, reason: TokenRejection) -> Self {
        AuthError::TokenRejected { kind, reason }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(_) => ErrorKind::BadRequest,
            AuthError::UserNameTaken => ErrorKind::Conflict,
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::InvalidCredentials | AuthError::TokenRejected { .. } => {
                ErrorKind::Unauthorized
            }
            AuthError::UserRecordMissing(_)
            | AuthError::Config(_)
            | AuthError::Database(_)
            | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to the client-facing AppError
    ///
    /// Internal details and token rejection reasons stay out of the message.
    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::Validation(msg) => AppError::bad_request(msg.clone()),
            AuthError::UserNameTaken => AppError::conflict("username already exists"),
            AuthError::UserNotFound => AppError::not_found("user not found"),
            AuthError::InvalidCredentials => AppError::unauthorized("invalid credentials"),
            AuthError::TokenRejected {
                kind: TokenType::Access,
                ..
            } => AppError::unauthorized("access token is missing or invalid")
                .with_action("Please login again"),
            AuthError::TokenRejected {
                kind: TokenType::Refresh,
                ..
            } => AppError::unauthorized("refresh token is missing or invalid")
                .with_action("Please login again"),
            AuthError::UserRecordMissing(_)
            | AuthError::Config(_)
            | AuthError::Database(_)
            | AuthError::Internal(_) => AppError::internal("Internal server error")
                .with_action("Please try again later"),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::UserRecordMissing(subject) => {
                tracing::error!(subject = %subject, "Valid token for a user missing from the store");
            }
            AuthError::Config(msg) | AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::TokenRejected { kind, reason } => {
                tracing::warn!(token_kind = %kind, reason = %reason, "Token rejected");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::BadRequest => AuthError::Validation(err.message().to_string()),
            _ => AuthError::Internal(err.to_string()),
        }
    }
}

impl From<tokio::task::JoinError> for AuthError {
    fn from(err: tokio::task::JoinError) -> Self {
        AuthError::Internal(format!("Blocking task failed: {err}"))
    }
}
