//! User Entity
//!
//! Account record: identity, password digest and preferences.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    preference::Preference, user_name::UserName, user_password::UserPassword,
};

/// User entity
///
/// Created once at registration and never updated in place.
/// `password_hash` is never the clear text password.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user name
    pub username: UserName,
    /// bcrypt digest
    pub password_hash: UserPassword,
    /// Opaque news preference
    pub news_pref: Preference,
    /// Opaque movie preference
    pub movie_pref: Preference,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user
    pub fn new(
        username: UserName,
        password_hash: UserPassword,
        news_pref: Preference,
        movie_pref: Preference,
    ) -> Self {
        Self {
            username,
            password_hash,
            news_pref,
            movie_pref,
            created_at: Utc::now(),
        }
    }
}
