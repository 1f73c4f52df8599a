//! Repository Traits
//!
//! Interface to the credential store. Implementations are in the infra layer.

use crate::domain::entity::user::User;
use crate::domain::value_object::user_name::UserName;
use crate::error::AuthResult;

/// Exact-match filter for user lookups
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserFilter {
    /// Every record
    All,
    /// The record whose user name equals this value
    Username(UserName),
}

/// User repository trait
///
/// The store may be shared by many concurrent requests. Implementations must
/// tolerate concurrent `find`/`insert` calls.
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Find users matching the filter
    ///
    /// Zero matches is reported as `AuthError::UserNotFound`, distinct from
    /// a backend failure.
    async fn find(&self, filter: &UserFilter) -> AuthResult<Vec<User>>;

    /// Insert a new user
    ///
    /// Stores that enforce user name uniqueness natively report a duplicate
    /// as `AuthError::UserNameTaken`.
    async fn insert(&self, user: &User) -> AuthResult<()>;
}
