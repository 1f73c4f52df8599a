//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod list_users;
pub mod login;
pub mod refresh;
pub mod register;
pub mod token_service;
pub mod user_info;

// Re-exports
pub use config::AuthConfig;
pub use list_users::ListUsersUseCase;
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use refresh::{RefreshOutput, RefreshUseCase};
pub use register::{RegisterInput, RegisterUseCase};
pub use token_service::{IssuedToken, TokenPair, TokenService};
pub use user_info::UserInfoUseCase;
