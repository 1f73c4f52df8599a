//! User Info Use Case
//!
//! Loads the record of the user an access token was issued to.

use std::sync::Arc;

use crate::domain::entity::user::User;
use crate::domain::repository::{UserFilter, UserRepository};
use crate::domain::value_object::user_name::UserName;
use crate::error::{AuthError, AuthResult};

/// User info use case
pub struct UserInfoUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
}

impl<R> UserInfoUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// `subject` has already been authenticated. A missing record is an
    /// internal inconsistency, not a client error.
    pub async fn execute(&self, subject: &str) -> AuthResult<User> {
        let username = UserName::new(subject)
            .map_err(|_| AuthError::UserRecordMissing(subject.to_string()))?;

        match self.repo.find(&UserFilter::Username(username)).await {
            Ok(users) => users
                .into_iter()
                .next()
                .ok_or_else(|| AuthError::UserRecordMissing(subject.to_string())),
            Err(AuthError::UserNotFound) => Err(AuthError::UserRecordMissing(subject.to_string())),
            Err(e) => Err(e),
        }
    }
}
