//! Login Use Case
//!
//! Verifies credentials and issues an access + refresh token pair.

use std::sync::Arc;

use crate::application::token_service::{TokenPair, TokenService};
use crate::domain::repository::{UserFilter, UserRepository};
use crate::domain::value_object::{user_name::UserName, user_password::RawPassword};
use crate::error::{AuthError, AuthResult};

const REQUIRED_FIELDS: &str = "username and password are required";

/// Login input
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

/// Login output
#[derive(Debug)]
pub struct LoginOutput {
    pub username: UserName,
    pub tokens: TokenPair,
}

/// Login use case
pub struct LoginUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    tokens: Arc<TokenService>,
}

impl<R> LoginUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, tokens: Arc<TokenService>) -> Self {
        Self { repo, tokens }
    }

    /// Unknown user and wrong password both fail with `InvalidCredentials`
    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        if input.username.trim().is_empty() || input.password.is_empty() {
            return Err(AuthError::Validation(REQUIRED_FIELDS.to_string()));
        }

        let username =
            UserName::new(input.username).map_err(|_| AuthError::InvalidCredentials)?;
        // No stored password can exceed the bcrypt limit
        let raw_password =
            RawPassword::new(input.password).map_err(|_| AuthError::InvalidCredentials)?;

        let user = match self.repo.find(&UserFilter::Username(username)).await {
            Ok(users) => users.into_iter().next().ok_or(AuthError::InvalidCredentials)?,
            Err(AuthError::UserNotFound) => return Err(AuthError::InvalidCredentials),
            Err(e) => return Err(e),
        };

        let password_hash = user.password_hash.clone();
        let password_valid =
            tokio::task::spawn_blocking(move || password_hash.verify(&raw_password)).await?;

        if !password_valid {
            return Err(AuthError::InvalidCredentials);
        }

        let tokens = self.tokens.issue_pair(user.username.as_str())?;

        tracing::info!(username = %user.username, "User logged in");

        Ok(LoginOutput {
            username: user.username,
            tokens,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::config::AuthConfig;
    use crate::domain::entity::user::User;
    use crate::domain::value_object::{preference::Preference, user_password::UserPassword};
    use crate::infra::memory::InMemoryUserRepository;

    async fn use_case() -> (LoginUseCase<InMemoryUserRepository>, Arc<TokenService>) {
        let repo = Arc::new(InMemoryUserRepository::new());
        let raw = RawPassword::new("pw123".into()).unwrap();
        let user = User::new(
            UserName::new("alice").unwrap(),
            UserPassword::from_raw(&raw, 4).unwrap(),
            Preference::new("tech").unwrap(),
            Preference::new("scifi").unwrap(),
        );
        repo.insert(&user).await.unwrap();

        let tokens = Arc::new(TokenService::new(&AuthConfig::development()).unwrap());
        (LoginUseCase::new(repo, tokens.clone()), tokens)
    }

    fn input(username: &str, password: &str) -> LoginInput {
        LoginInput {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_login_issues_token_pair() {
        let (use_case, tokens) = use_case().await;

        let output = use_case.execute(input("alice", "pw123")).await.unwrap();
        assert_eq!(output.username.as_str(), "alice");

        let access = tokens.verify_access(&output.tokens.access.token).unwrap();
        assert_eq!(access.sub, "alice");
        let refresh = tokens.verify_refresh(&output.tokens.refresh.token).unwrap();
        assert_eq!(refresh.sub, "alice");
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_user_are_indistinguishable() {
        let (use_case, _) = use_case().await;

        let wrong_password = use_case.execute(input("alice", "wrong")).await.unwrap_err();
        let unknown_user = use_case.execute(input("bob", "pw123")).await.unwrap_err();

        assert!(matches!(wrong_password, AuthError::InvalidCredentials));
        assert!(matches!(unknown_user, AuthError::InvalidCredentials));
        assert_eq!(
            wrong_password.to_app_error().to_string(),
            unknown_user.to_app_error().to_string()
        );
    }

    #[tokio::test]
    async fn test_overlong_password_is_invalid_credentials() {
        let (use_case, _) = use_case().await;
        let result = use_case.execute(input("alice", &"a".repeat(100))).await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_missing_fields_are_rejected() {
        let (use_case, _) = use_case().await;

        for (username, password) in [("", "pw123"), ("alice", ""), ("  ", "pw123")] {
            match use_case.execute(input(username, password)).await {
                Err(AuthError::Validation(msg)) => assert_eq!(msg, REQUIRED_FIELDS),
                other => panic!("expected validation error, got {other:?}"),
            }
        }
    }
}
