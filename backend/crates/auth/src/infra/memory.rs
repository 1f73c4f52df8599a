//! In-Memory Repository Implementation
//!
//! Process-local store for tests and local runs without a database.
//! Records are kept in insertion order.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::entity::user::User;
use crate::domain::repository::{UserFilter, UserRepository};
use crate::error::{AuthError, AuthResult};

/// In-memory user repository
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<Vec<User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserRepository for InMemoryUserRepository {
    async fn find(&self, filter: &UserFilter) -> AuthResult<Vec<User>> {
        let users = self.users.read().await;

        let found: Vec<User> = match filter {
            UserFilter::All => users.clone(),
            UserFilter::Username(username) => users
                .iter()
                .filter(|u| &u.username == username)
                .cloned()
                .collect(),
        };

        if found.is_empty() {
            return Err(AuthError::UserNotFound);
        }

        Ok(found)
    }

    async fn insert(&self, user: &User) -> AuthResult<()> {
        // Check and insert under one write lock
        let mut users = self.users.write().await;

        if users.iter().any(|u| u.username == user.username) {
            return Err(AuthError::UserNameTaken);
        }

        users.push(user.clone());
        Ok(())
    }
}
