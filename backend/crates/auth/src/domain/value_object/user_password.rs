//! User Password Value Object
//!
//! Domain wrappers around `platform::password`.
//!
//! ## Usage
//! ```rust
//! use auth::domain::value_object::user_password::{RawPassword, UserPassword};
//!
//! let raw = RawPassword::new("pw123".to_string()).unwrap();
//! let hashed = UserPassword::from_raw(&raw, 4).unwrap();
//! assert!(hashed.verify(&raw));
//! ```

use platform::password::{
    ClearTextPassword, HashedPassword, PasswordHashError, PasswordPolicyError,
};
use std::fmt;

use crate::error::{AuthError, AuthResult};

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Raw password from user input
///
/// Memory is zeroized when dropped.
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Create a new raw password
    ///
    /// ## Errors
    /// `AuthError::Validation` for an empty password or one longer than
    /// bcrypt accepts
    pub fn new(raw: String) -> AuthResult<Self> {
        let clear_text = ClearTextPassword::new(raw).map_err(|e| match e {
            PasswordPolicyError::Empty => AuthError::Validation("password is required".into()),
            PasswordPolicyError::TooLong { max, .. } => {
                AuthError::Validation(format!("password must be at most {max} bytes"))
            }
        })?;

        Ok(Self(clear_text))
    }

    pub(crate) fn inner(&self) -> &ClearTextPassword {
        &self.0
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// User Password (Stored digest)
// ============================================================================

/// Stored password digest
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    /// Hash a raw password
    ///
    /// CPU-bound for tens to hundreds of milliseconds at production cost.
    /// Call it from `spawn_blocking` in async code.
    pub fn from_raw(raw: &RawPassword, cost: u32) -> AuthResult<Self> {
        raw.inner()
            .hash(cost)
            .map(Self)
            .map_err(|e| AuthError::Internal(e.to_string()))
    }

    /// Restore from a stored digest
    pub fn from_stored(digest: impl Into<String>) -> AuthResult<Self> {
        HashedPassword::from_stored(digest)
            .map(Self)
            .map_err(|e: PasswordHashError| AuthError::Internal(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Constant-time verify; `false` on mismatch
    pub fn verify(&self, raw: &RawPassword) -> bool {
        self.0.verify(raw.inner())
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("UserPassword").field(&"[HASH]").finish()
    }
}
