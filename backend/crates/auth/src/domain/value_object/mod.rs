//! Value Object Module

pub mod preference;
pub mod token;
pub mod user_name;
pub mod user_password;
