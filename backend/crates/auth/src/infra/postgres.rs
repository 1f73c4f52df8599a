//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use kernel::error::conversions::is_unique_violation;
use sqlx::PgPool;

use crate::domain::entity::user::User;
use crate::domain::repository::{UserFilter, UserRepository};
use crate::domain::value_object::{
    preference::Preference, user_name::UserName, user_password::UserPassword,
};
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed user repository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl UserRepository for PgUserRepository {
    async fn find(&self, filter: &UserFilter) -> AuthResult<Vec<User>> {
        let rows = match filter {
            UserFilter::All => {
                sqlx::query_as::<_, UserRow>(
                    r#"
                    SELECT username, password_hash, news_pref, movie_pref, created_at
                    FROM users
                    ORDER BY created_at, username
                    "#,
                )
                .fetch_all(&self.pool)
                .await?
            }
            UserFilter::Username(username) => {
                sqlx::query_as::<_, UserRow>(
                    r#"
                    SELECT username, password_hash, news_pref, movie_pref, created_at
                    FROM users
                    WHERE username = $1
                    "#,
                )
                .bind(username.as_str())
                .fetch_all(&self.pool)
                .await?
            }
        };

        if rows.is_empty() {
            return Err(AuthError::UserNotFound);
        }

        rows.into_iter().map(UserRow::into_user).collect()
    }

    async fn insert(&self, user: &User) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (
                username,
                password_hash,
                news_pref,
                movie_pref,
                created_at
            ) VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(user.username.as_str())
        .bind(user.password_hash.as_str())
        .bind(user.news_pref.as_str())
        .bind(user.movie_pref.as_str())
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AuthError::UserNameTaken
            } else {
                AuthError::Database(e)
            }
        })?;

        Ok(())
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    username: String,
    password_hash: String,
    news_pref: String,
    movie_pref: String,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let username = UserName::new(self.username)
            .map_err(|e| AuthError::Internal(format!("Invalid username: {}", e)))?;
        let news_pref = Preference::new(self.news_pref)
            .ok_or_else(|| AuthError::Internal(format!("Empty news_pref for {}", username)))?;
        let movie_pref = Preference::new(self.movie_pref)
            .ok_or_else(|| AuthError::Internal(format!("Empty movie_pref for {}", username)))?;

        Ok(User {
            password_hash: UserPassword::from_stored(self.password_hash)?,
            username,
            news_pref,
            movie_pref,
            created_at: self.created_at,
        })
    }
}
