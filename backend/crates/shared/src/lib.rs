//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the smallest shared vocabulary of the account service:
//! - The unified error type returned at the HTTP boundary
//! - The error classification that maps onto HTTP status codes
//!
//! Anything domain specific (users, tokens, passwords) lives in the
//! `auth` and `platform` crates.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
