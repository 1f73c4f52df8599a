//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (bcrypt, adaptive cost, zeroized plaintext)
//! - Cookie management
//! - Credential extraction from HTTP headers

pub mod cookie;
pub mod header;
pub mod password;
