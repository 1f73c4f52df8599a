//! Register Use Case
//!
//! Creates a new user account.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::{UserFilter, UserRepository};
use crate::domain::value_object::{
    preference::Preference,
    user_name::UserName,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

const REQUIRED_FIELDS: &str = "username, password, newsPref and moviePref are required";

/// Register input
pub struct RegisterInput {
    pub username: String,
    pub password: String,
    pub news_pref: String,
    pub movie_pref: String,
}

/// Register use case
pub struct RegisterUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> RegisterUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    /// Returns the stored record
    pub async fn execute(&self, input: RegisterInput) -> AuthResult<User> {
        let username = UserName::new(input.username)
            .map_err(|_| AuthError::Validation(REQUIRED_FIELDS.to_string()))?;
        let news_pref = Preference::new(input.news_pref)
            .ok_or_else(|| AuthError::Validation(REQUIRED_FIELDS.to_string()))?;
        let movie_pref = Preference::new(input.movie_pref)
            .ok_or_else(|| AuthError::Validation(REQUIRED_FIELDS.to_string()))?;
        if input.password.is_empty() {
            return Err(AuthError::Validation(REQUIRED_FIELDS.to_string()));
        }
        let raw_password = RawPassword::new(input.password)?;

        // Check if user name is taken
        match self.repo.find(&UserFilter::Username(username.clone())).await {
            Ok(_) => return Err(AuthError::UserNameTaken),
            Err(AuthError::UserNotFound) => {}
            Err(e) => return Err(e),
        }

        let cost = self.config.bcrypt_cost;
        let password_hash =
            tokio::task::spawn_blocking(move || UserPassword::from_raw(&raw_password, cost))
                .await??;

        let user = User::new(username, password_hash, news_pref, movie_pref);

        // A concurrent registration of the same name surfaces here as UserNameTaken
        self.repo.insert(&user).await?;

        tracing::info!(username = %user.username, "User registered");

        Ok(user)
    }
}
