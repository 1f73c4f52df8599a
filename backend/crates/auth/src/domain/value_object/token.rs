//! Token Value Objects
//!
//! Claims carried by access and refresh tokens, and the per-kind signing
//! secrets.
//!
//! Token kinds are marker types. A [`TokenSecret<Access>`] and a
//! [`TokenSecret<Refresh>`] are different types, so a signer built for one
//! kind can never be handed the other kind's secret.

use std::fmt;
use std::marker::PhantomData;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use zeroize::Zeroize;

/// Minimum recommended HMAC-SHA256 key length in bytes
pub const RECOMMENDED_SECRET_BYTES: usize = 32;

/// Token type, embedded in the claims as `token_type`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    /// Short-lived token for resource access
    Access,
    /// Long-lived token used only to obtain a new pair
    Refresh,
}

impl TokenType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::Access => "access",
            TokenType::Refresh => "refresh",
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compile-time token kind
pub trait TokenKind: Send + Sync + 'static {
    const TYPE: TokenType;
}

/// Marker for access tokens
#[derive(Debug)]
pub enum Access {}

/// Marker for refresh tokens
#[derive(Debug)]
pub enum Refresh {}

impl TokenKind for Access {
    const TYPE: TokenType = TokenType::Access;
}

impl TokenKind for Refresh {
    const TYPE: TokenType = TokenType::Refresh;
}

/// JWT claims payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user name
    pub sub: String,
    /// Expiration (seconds since epoch)
    pub exp: i64,
    /// Issued at (seconds since epoch)
    pub iat: i64,
    /// Token id, unique per issued token
    pub jti: Uuid,
    /// Access or refresh
    pub token_type: TokenType,
}

impl Claims {
    pub fn new(
        sub: impl Into<String>,
        token_type: TokenType,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            sub: sub.into(),
            exp: expires_at.timestamp(),
            iat: issued_at.timestamp(),
            jti: Uuid::new_v4(),
            token_type,
        }
    }

    /// Valid only while `now < exp`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

/// Error creating a token secret
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenSecretError {
    #[error("{0} token secret cannot be empty")]
    Empty(TokenType),
}

/// HMAC secret for one token kind
///
/// Zeroized on drop. Debug output is redacted.
pub struct TokenSecret<K: TokenKind> {
    bytes: Vec<u8>,
    _kind: PhantomData<fn() -> K>,
}

impl<K: TokenKind> TokenSecret<K> {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self, TokenSecretError> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(TokenSecretError::Empty(K::TYPE));
        }
        Ok(Self {
            bytes,
            _kind: PhantomData,
        })
    }

    /// Random 256-bit secret (development only: tokens do not survive a restart)
    pub fn random() -> Self {
        use rand::RngCore;
        let mut bytes = vec![0u8; RECOMMENDED_SECRET_BYTES];
        rand::rng().fill_bytes(&mut bytes);
        Self {
            bytes,
            _kind: PhantomData,
        }
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl<K: TokenKind> Clone for TokenSecret<K> {
    fn clone(&self) -> Self {
        Self {
            bytes: self.bytes.clone(),
            _kind: PhantomData,
        }
    }
}

impl<K: TokenKind> Drop for TokenSecret<K> {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

impl<K: TokenKind> fmt::Debug for TokenSecret<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSecret")
            .field("kind", &K::TYPE)
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}
