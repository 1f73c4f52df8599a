//! Application Configuration
//!
//! Configuration for the Auth application layer. Built once at startup and
//! shared read-only through `Arc`.

use std::time::Duration;

use platform::cookie::CookieConfig;
use platform::password::{DEFAULT_COST, MAX_COST, MIN_COST};

use crate::domain::value_object::token::{
    Access, RECOMMENDED_SECRET_BYTES, Refresh, TokenSecret, TokenType,
};
use crate::error::{AuthError, AuthResult};

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Cookie carrying the access token
    pub access_cookie_name: String,
    /// Cookie carrying the refresh token
    pub refresh_cookie_name: String,
    /// HMAC secret for access tokens
    pub access_secret: TokenSecret<Access>,
    /// HMAC secret for refresh tokens (must differ from the access secret)
    pub refresh_secret: TokenSecret<Refresh>,
    /// Access token lifetime (2 hours)
    pub access_token_ttl: Duration,
    /// Refresh token lifetime (24 hours)
    pub refresh_token_ttl: Duration,
    /// Whether to set the Secure cookie attribute
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// bcrypt work factor
    pub bcrypt_cost: u32,
}

impl AuthConfig {
    /// Create config with the given token secrets and default settings
    pub fn new(access_secret: TokenSecret<Access>, refresh_secret: TokenSecret<Refresh>) -> Self {
        Self {
            access_cookie_name: "access_token".to_string(),
            refresh_cookie_name: "refresh_token".to_string(),
            access_secret,
            refresh_secret,
            access_token_ttl: Duration::from_secs(2 * 3600), // 2 hours
            refresh_token_ttl: Duration::from_secs(24 * 3600), // 24 hours
            cookie_secure: true,
            cookie_same_site: SameSite::Strict,
            bcrypt_cost: DEFAULT_COST,
        }
    }

    /// Create config with random token secrets
    pub fn with_random_secrets() -> Self {
        Self::new(TokenSecret::random(), TokenSecret::random())
    }

    /// Create config for development (random secrets, insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::with_random_secrets()
        }
    }

    /// Check invariants that cannot be expressed in the types
    pub fn validate(&self) -> AuthResult<()> {
        if self.access_secret.as_bytes() == self.refresh_secret.as_bytes() {
            return Err(AuthError::Config(
                "access and refresh token secrets must differ".to_string(),
            ));
        }

        if self.access_token_ttl.is_zero() || self.refresh_token_ttl.is_zero() {
            return Err(AuthError::Config("token lifetimes must be positive".to_string()));
        }

        if !(MIN_COST..=MAX_COST).contains(&self.bcrypt_cost) {
            return Err(AuthError::Config(format!(
                "bcrypt cost must be between {MIN_COST} and {MAX_COST}"
            )));
        }

        if self.access_cookie_name == self.refresh_cookie_name {
            return Err(AuthError::Config(
                "access and refresh cookies need distinct names".to_string(),
            ));
        }

        for (kind, len) in [
            (TokenType::Access, self.access_secret.len()),
            (TokenType::Refresh, self.refresh_secret.len()),
        ] {
            if len < RECOMMENDED_SECRET_BYTES {
                tracing::warn!(
                    token_kind = %kind,
                    secret_bytes = len,
                    recommended = RECOMMENDED_SECRET_BYTES,
                    "Token secret is shorter than recommended"
                );
            }
        }

        Ok(())
    }

    /// Cookie attributes for the access token
    pub fn access_cookie(&self) -> CookieConfig {
        self.cookie(&self.access_cookie_name, self.access_token_ttl)
    }

    /// Cookie attributes for the refresh token
    pub fn refresh_cookie(&self) -> CookieConfig {
        self.cookie(&self.refresh_cookie_name, self.refresh_token_ttl)
    }

    fn cookie(&self, name: &str, ttl: Duration) -> CookieConfig {
        CookieConfig::named(name)
            .with_secure(self.cookie_secure)
            .with_same_site(self.cookie_same_site)
            .with_max_age(ttl.as_secs())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self::with_random_secrets()
    }
}
