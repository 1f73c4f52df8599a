//! Password Hashing and Verification
//!
//! Adaptive password hashing with:
//! - bcrypt (salted, self-describing `$2b$<cost>$...` digests)
//! - Tunable work factor
//! - Zeroization of clear text passwords
//! - Constant-time comparison
//!
//! ## Security Features
//! - Random 128-bit salt per hash, so equal passwords produce different digests
//! - Zeroization prevents memory inspection attacks
//! - Malformed digests verify as `false` instead of surfacing an error

use std::fmt;

use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

// ============================================================================
// Constants
// ============================================================================

/// bcrypt only reads the first 72 bytes of its input
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Default bcrypt work factor
pub const DEFAULT_COST: u32 = bcrypt::DEFAULT_COST;

/// Lowest work factor accepted by bcrypt (only sensible in tests)
pub const MIN_COST: u32 = 4;

/// Highest work factor accepted by bcrypt
pub const MAX_COST: u32 = 31;

// ============================================================================
// Error Types
// ============================================================================

/// Password policy violation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    /// Password is empty
    #[error("Password cannot be empty")]
    Empty,

    /// Password exceeds what bcrypt can take into account
    #[error("Password must be at most {max} bytes (got {actual})")]
    TooLong { max: usize, actual: usize },
}

/// Password hashing errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    /// Hashing operation failed (e.g. entropy source failure)
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// Work factor outside the range bcrypt supports
    #[error("Invalid bcrypt cost {0} (expected {MIN_COST}..={MAX_COST})")]
    InvalidCost(u32),

    /// Stored digest is not a bcrypt digest
    #[error("Invalid password hash format")]
    InvalidHashFormat,
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// ## Security
/// - Implements `Zeroize` and `ZeroizeOnDrop`
/// - Does not implement `Clone` to prevent accidental copies
/// - Debug output is redacted
///
/// ## Examples
/// ```rust
/// use platform::password::ClearTextPassword;
///
/// let password = ClearTextPassword::new("pw123".to_string()).unwrap();
/// let hashed = password.hash(4).unwrap();
/// assert!(hashed.verify(&password));
/// ```
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Create a new clear text password
    ///
    /// The account service accepts any non-empty password. The only upper
    /// bound is the bcrypt input limit, so that two passwords sharing their
    /// first 72 bytes can never verify against each other.
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        if raw.is_empty() {
            return Err(PasswordPolicyError::Empty);
        }

        if raw.len() > MAX_PASSWORD_BYTES {
            let actual = raw.len();
            // `raw` is dropped here without zeroization otherwise
            let mut raw = raw;
            raw.zeroize();
            return Err(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_BYTES,
                actual,
            });
        }

        Ok(Self(raw))
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Hash the password with bcrypt at the given work factor
    ///
    /// This is deliberately slow. Async callers should run it on the
    /// blocking thread pool.
    pub fn hash(&self, cost: u32) -> Result<HashedPassword, PasswordHashError> {
        if !(MIN_COST..=MAX_COST).contains(&cost) {
            return Err(PasswordHashError::InvalidCost(cost));
        }

        let hash = bcrypt::hash(self.as_bytes(), cost)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

        Ok(HashedPassword { hash })
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// bcrypt digest in modular crypt format
///
/// The digest embeds algorithm version, cost and salt, so verification needs
/// nothing besides the stored string.
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    /// Create from a stored digest (e.g. from database)
    pub fn from_stored(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let hash = s.into();

        // $2a$ / $2b$ / $2x$ / $2y$ followed by a two digit cost
        let is_bcrypt = hash.len() == 60
            && hash.starts_with("$2")
            && hash.as_bytes().get(3) == Some(&b'$')
            && hash.as_bytes().get(6) == Some(&b'$');
        if !is_bcrypt {
            return Err(PasswordHashError::InvalidHashFormat);
        }

        Ok(Self { hash })
    }

    /// Get the digest for storage
    pub fn as_str(&self) -> &str {
        &self.hash
    }

    /// Work factor embedded in the digest
    pub fn cost(&self) -> Option<u32> {
        self.hash.get(4..6)?.parse().ok()
    }

    /// Verify a password against this digest
    ///
    /// bcrypt compares in constant time. A mismatch and an unreadable digest
    /// both report `false`.
    pub fn verify(&self, password: &ClearTextPassword) -> bool {
        bcrypt::verify(password.as_bytes(), &self.hash).unwrap_or(false)
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
