//! Auth Middleware
//!
//! Middleware for requiring a valid access token on protected routes.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use std::sync::Arc;

use platform::cookie::extract_cookie;
use platform::header::extract_bearer_token;

use crate::application::config::AuthConfig;
use crate::application::token_service::TokenService;
use crate::domain::value_object::token::TokenType;
use crate::error::{AuthError, TokenRejection};

/// Middleware state
#[derive(Clone)]
pub struct AuthMiddlewareState {
    pub config: Arc<AuthConfig>,
    pub tokens: Arc<TokenService>,
}

/// Authenticated subject stored in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub username: String,
}

/// Middleware that requires a valid access token
///
/// The token is read from the access cookie, falling back to
/// `Authorization: Bearer`.
pub async fn require_access_token(
    State(state): State<AuthMiddlewareState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let headers = req.headers();

    let token = extract_cookie(headers, &state.config.access_cookie_name)
        .or_else(|| extract_bearer_token(headers))
        .ok_or_else(|| AuthError::token_rejected(TokenType::Access, TokenRejection::Missing))?;

    let claims = state.tokens.verify_access(&token)?;

    req.extensions_mut().insert(AuthenticatedUser {
        username: claims.sub,
    });

    Ok(next.run(req).await)
}
