//! HTTP Handlers

use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{AppendHeaders, IntoResponse};
use axum::Json;
use kernel::error::app_error::AppError;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token_service::{TokenPair, TokenService};
use crate::application::{
    ListUsersUseCase, LoginInput, LoginUseCase, RefreshUseCase, RegisterInput, RegisterUseCase,
    UserInfoUseCase,
};
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{LoginRequest, RegisterRequest, SessionResponse, UserResponse};
use crate::presentation::middleware::AuthenticatedUser;

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
    pub tokens: Arc<TokenService>,
}

/// Malformed JSON or wrongly typed fields become a 400 with the unified body
fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> AuthResult<T> {
    body.map(|Json(value)| value)
        .map_err(|rejection| AuthError::from(AppError::from(rejection)))
}

// ============================================================================
// Users
// ============================================================================

/// GET /users
pub async fn list_users<R>(
    State(state): State<AuthAppState<R>>,
) -> AuthResult<Json<Vec<UserResponse>>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let users = ListUsersUseCase::new(state.repo.clone()).execute().await?;

    Ok(Json(users.iter().map(UserResponse::from).collect()))
}

// ============================================================================
// Register
// ============================================================================

/// POST /register
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> AuthResult<(StatusCode, Json<UserResponse>)>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let req = json_body(body)?;

    let use_case = RegisterUseCase::new(state.repo.clone(), state.config.clone());

    let input = RegisterInput {
        username: req.username,
        password: req.password,
        news_pref: req.news_pref,
        movie_pref: req.movie_pref,
    };

    let user = use_case.execute(input).await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

// ============================================================================
// Login
// ============================================================================

/// POST /login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let req = json_body(body)?;

    let use_case = LoginUseCase::new(state.repo.clone(), state.tokens.clone());

    let input = LoginInput {
        username: req.username,
        password: req.password,
    };

    let output = use_case.execute(input).await?;

    Ok((
        StatusCode::OK,
        token_cookies(&state.config, &output.tokens),
        Json(SessionResponse::from(&output)),
    ))
}

// ============================================================================
// User Info
// ============================================================================

/// GET /userInfo (behind `require_access_token`)
pub async fn user_info<R>(
    State(state): State<AuthAppState<R>>,
    Extension(user): Extension<AuthenticatedUser>,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let record = UserInfoUseCase::new(state.repo.clone())
        .execute(&user.username)
        .await?;

    Ok(Json(UserResponse::from(&record)))
}

// ============================================================================
// Refresh
// ============================================================================

/// POST /refresh
pub async fn refresh<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let token = platform::cookie::extract_cookie(&headers, &state.config.refresh_cookie_name);

    let output = RefreshUseCase::new(state.tokens.clone()).execute(token.as_deref())?;

    Ok((
        StatusCode::OK,
        token_cookies(&state.config, &output.tokens),
        Json(SessionResponse::from(&output)),
    ))
}

// ============================================================================
// Helper Functions
// ============================================================================

/// One `Set-Cookie` header per token (appended, not overwritten)
fn token_cookies(
    config: &AuthConfig,
    tokens: &TokenPair,
) -> AppendHeaders<[(header::HeaderName, String); 2]> {
    AppendHeaders([
        (
            header::SET_COOKIE,
            config.access_cookie().build_set_cookie(&tokens.access.token),
        ),
        (
            header::SET_COOKIE,
            config.refresh_cookie().build_set_cookie(&tokens.refresh.token),
        ),
    ])
}
