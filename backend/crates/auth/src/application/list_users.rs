//! List Users Use Case

use std::sync::Arc;

use crate::domain::entity::user::User;
use crate::domain::repository::{UserFilter, UserRepository};
use crate::error::{AuthError, AuthResult};

/// List users use case
pub struct ListUsersUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
}

impl<R> ListUsersUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// An empty store is an empty list
    pub async fn execute(&self) -> AuthResult<Vec<User>> {
        match self.repo.find(&UserFilter::All).await {
            Ok(users) => Ok(users),
            Err(AuthError::UserNotFound) => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }
}
