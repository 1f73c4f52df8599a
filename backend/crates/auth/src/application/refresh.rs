//! Refresh Use Case
//!
//! Exchanges a valid refresh token for a new token pair.

use std::sync::Arc;

use crate::application::token_service::{TokenPair, TokenService};
use crate::domain::value_object::token::TokenType;
use crate::error::{AuthError, AuthResult, TokenRejection};

/// Refresh output
#[derive(Debug)]
pub struct RefreshOutput {
    pub username: String,
    pub tokens: TokenPair,
}

/// Refresh use case
///
/// The store is not consulted: a refresh token stays usable until it expires.
pub struct RefreshUseCase {
    tokens: Arc<TokenService>,
}

impl RefreshUseCase {
    pub fn new(tokens: Arc<TokenService>) -> Self {
        Self { tokens }
    }

    pub fn execute(&self, refresh_token: Option<&str>) -> AuthResult<RefreshOutput> {
        let refresh_token = refresh_token
            .ok_or_else(|| AuthError::token_rejected(TokenType::Refresh, TokenRejection::Missing))?;

        let claims = self.tokens.verify_refresh(refresh_token)?;
        let tokens = self.tokens.issue_pair(&claims.sub)?;

        tracing::debug!(username = %claims.sub, "Token pair refreshed");

        Ok(RefreshOutput {
            username: claims.sub,
            tokens,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::config::AuthConfig;

    fn use_case() -> (RefreshUseCase, Arc<TokenService>) {
        let tokens = Arc::new(TokenService::new(&AuthConfig::development()).unwrap());
        (RefreshUseCase::new(tokens.clone()), tokens)
    }

    #[test]
    fn test_refresh_issues_new_pair() {
        let (use_case, tokens) = use_case();
        let original = tokens.issue_pair("alice").unwrap();

        let output = use_case.execute(Some(&original.refresh.token)).unwrap();
        assert_eq!(output.username, "alice");
        assert_ne!(output.tokens.refresh.token, original.refresh.token);
        assert_eq!(tokens.verify_access(&output.tokens.access.token).unwrap().sub, "alice");
    }

    #[test]
    fn test_missing_token_is_rejected() {
        let (use_case, _) = use_case();
        assert!(matches!(
            use_case.execute(None),
            Err(AuthError::TokenRejected {
                kind: TokenType::Refresh,
                reason: TokenRejection::Missing
            })
        ));
    }

    #[test]
    fn test_access_token_cannot_refresh() {
        let (use_case, tokens) = use_case();
        let pair = tokens.issue_pair("alice").unwrap();
        assert!(matches!(
            use_case.execute(Some(&pair.access.token)),
            Err(AuthError::TokenRejected { .. })
        ));
    }
}
