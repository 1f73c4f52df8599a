//! Token Service
//!
//! Issues and verifies HS256 JWTs. Each token kind has its own signer,
//! built from the secret typed for that kind.

use std::fmt;
use std::marker::PhantomData;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use crate::application::config::AuthConfig;
use crate::domain::value_object::token::{Access, Claims, Refresh, TokenKind, TokenSecret};
use crate::error::{AuthError, AuthResult, TokenRejection};

/// A signed token together with its lifetime
#[derive(Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub max_age_secs: u64,
}

impl fmt::Debug for IssuedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IssuedToken")
            .field("token", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .field("max_age_secs", &self.max_age_secs)
            .finish()
    }
}

/// Access and refresh token issued together
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access: IssuedToken,
    pub refresh: IssuedToken,
}

/// Signer and verifier for one token kind
struct Signer<K: TokenKind> {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
    _kind: PhantomData<fn() -> K>,
}

impl<K: TokenKind> Signer<K> {
    fn new(secret: &TokenSecret<K>, ttl: std::time::Duration) -> AuthResult<Self> {
        let ttl = Duration::from_std(ttl)
            .map_err(|_| AuthError::Config(format!("{} token lifetime is out of range", K::TYPE)))?;

        // Expiry is compared against the caller's clock in `verify_at`
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
            _kind: PhantomData,
        })
    }

    fn issue_at(&self, username: &str, now: DateTime<Utc>) -> AuthResult<IssuedToken> {
        let expires_at = now + self.ttl;
        let claims = Claims::new(username, K::TYPE, now, expires_at);

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("Failed to sign {} token: {e}", K::TYPE)))?;

        Ok(IssuedToken {
            token,
            expires_at,
            max_age_secs: self.ttl.num_seconds().max(0) as u64,
        })
    }

    fn verify_at(&self, token: &str, now: DateTime<Utc>) -> AuthResult<Claims> {
        let reject = |reason| AuthError::token_rejected(K::TYPE, reason);

        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                JwtErrorKind::InvalidSignature => reject(TokenRejection::BadSignature),
                _ => reject(TokenRejection::Malformed),
            })?
            .claims;

        if claims.token_type != K::TYPE {
            return Err(reject(TokenRejection::WrongKind));
        }

        if claims.is_expired_at(now) {
            return Err(reject(TokenRejection::Expired));
        }

        if claims.sub.trim().is_empty() {
            return Err(reject(TokenRejection::Malformed));
        }

        Ok(claims)
    }
}

/// Token service holding one signer per token kind
pub struct TokenService {
    access: Signer<Access>,
    refresh: Signer<Refresh>,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> AuthResult<Self> {
        config.validate()?;

        Ok(Self {
            access: Signer::new(&config.access_secret, config.access_token_ttl)?,
            refresh: Signer::new(&config.refresh_secret, config.refresh_token_ttl)?,
        })
    }

    pub fn issue_access(&self, username: &str) -> AuthResult<IssuedToken> {
        self.issue_access_at(username, Utc::now())
    }

    pub fn issue_access_at(&self, username: &str, now: DateTime<Utc>) -> AuthResult<IssuedToken> {
        self.access.issue_at(username, now)
    }

    pub fn issue_refresh(&self, username: &str) -> AuthResult<IssuedToken> {
        self.issue_refresh_at(username, Utc::now())
    }

    pub fn issue_refresh_at(&self, username: &str, now: DateTime<Utc>) -> AuthResult<IssuedToken> {
        self.refresh.issue_at(username, now)
    }

    /// Issue a fresh access + refresh pair for the user
    pub fn issue_pair(&self, username: &str) -> AuthResult<TokenPair> {
        self.issue_pair_at(username, Utc::now())
    }

    pub fn issue_pair_at(&self, username: &str, now: DateTime<Utc>) -> AuthResult<TokenPair> {
        Ok(TokenPair {
            access: self.issue_access_at(username, now)?,
            refresh: self.issue_refresh_at(username, now)?,
        })
    }

    pub fn verify_access(&self, token: &str) -> AuthResult<Claims> {
        self.verify_access_at(token, Utc::now())
    }

    pub fn verify_access_at(&self, token: &str, now: DateTime<Utc>) -> AuthResult<Claims> {
        self.access.verify_at(token, now)
    }

    pub fn verify_refresh(&self, token: &str) -> AuthResult<Claims> {
        self.verify_refresh_at(token, Utc::now())
    }

    pub fn verify_refresh_at(&self, token: &str, now: DateTime<Utc>) -> AuthResult<Claims> {
        self.refresh.verify_at(token, now)
    }
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("access_ttl", &self.access.ttl)
            .field("refresh_ttl", &self.refresh.ttl)
            .finish()
    }
}
