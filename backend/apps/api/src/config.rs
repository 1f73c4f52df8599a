//! Server Configuration
//!
//! Read once from the process environment (after `.env` is loaded).

use std::env;
use std::str::FromStr;

use anyhow::{Context, bail};
use auth::{AuthConfig, TokenSecret};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";

/// Process-level settings for the API server
pub struct ServerConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub port: u16,
    pub frontend_origins: Vec<String>,
    pub auth: AuthConfig,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url =
            env::var("DATABASE_URL").context("DATABASE_URL must be set in environment")?;

        let frontend_origins = env::var("FRONTEND_ORIGINS")
            .unwrap_or_else(|_| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        Ok(Self {
            database_url,
            database_max_connections: parse_or("DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?,
            port: parse_or("PORT", DEFAULT_PORT)?,
            frontend_origins,
            auth: auth_config_from_env()?,
        })
    }
}

fn auth_config_from_env() -> anyhow::Result<AuthConfig> {
    let access = env::var("ACCESS_TOKEN_SECRET").ok().filter(|s| !s.is_empty());
    let refresh = env::var("REFRESH_TOKEN_SECRET").ok().filter(|s| !s.is_empty());

    let mut config = match (access, refresh) {
        (Some(access), Some(refresh)) => AuthConfig::new(
            TokenSecret::new(access.into_bytes())?,
            TokenSecret::new(refresh.into_bytes())?,
        ),
        _ if cfg!(debug_assertions) => {
            tracing::warn!(
                "ACCESS_TOKEN_SECRET / REFRESH_TOKEN_SECRET not set, using random secrets. \
                 Tokens will not survive a restart"
            );
            AuthConfig::with_random_secrets()
        }
        _ => bail!("ACCESS_TOKEN_SECRET and REFRESH_TOKEN_SECRET must be set in production"),
    };

    config.cookie_secure = parse_or("COOKIE_SECURE", true)?;
    config.bcrypt_cost = parse_or("BCRYPT_COST", config.bcrypt_cost)?;

    config.validate()?;

    Ok(config)
}

/// Parse an optional variable, falling back to `default` when unset
fn parse_or<T>(name: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .with_context(|| format!("{name} has an invalid value")),
        _ => Ok(default),
    }
}
