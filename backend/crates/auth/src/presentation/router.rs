//! Auth Router

use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token_service::TokenService;
use crate::domain::repository::UserRepository;
use crate::error::AuthResult;
use crate::infra::postgres::PgUserRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{AuthMiddlewareState, require_access_token};

/// Create the Auth router with PostgreSQL repository
///
/// Fails when the configuration is invalid (e.g. identical token secrets).
pub fn auth_router(repo: PgUserRepository, config: AuthConfig) -> AuthResult<Router> {
    auth_router_generic(repo, config)
}

/// Create a generic Auth router for any repository implementation
pub fn auth_router_generic<R>(repo: R, config: AuthConfig) -> AuthResult<Router>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let config = Arc::new(config);
    let tokens = Arc::new(TokenService::new(&config)?);

    let state = AuthAppState {
        repo: Arc::new(repo),
        config: config.clone(),
        tokens: tokens.clone(),
    };

    let middleware_state = AuthMiddlewareState { config, tokens };

    let protected: Router<AuthAppState<R>> = Router::new()
        .route("/userInfo", get(handlers::user_info::<R>))
        .route_layer(middleware::from_fn_with_state(
            middleware_state,
            require_access_token,
        ));

    Ok(Router::new()
        .route("/users", get(handlers::list_users::<R>))
        .route("/register", post(handlers::register::<R>))
        .route("/login", post(handlers::login::<R>))
        .route("/refresh", post(handlers::refresh::<R>))
        .merge(protected)
        .with_state(state))
}
