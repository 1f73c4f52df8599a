//! HTTP tests driving the auth router with the in-memory store

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode, header};
use chrono::{Duration, Utc};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::application::config::AuthConfig;
use crate::application::token_service::TokenService;
use crate::infra::memory::InMemoryUserRepository;
use crate::presentation::router::auth_router_generic;

fn test_config() -> AuthConfig {
    AuthConfig {
        bcrypt_cost: 4,
        ..AuthConfig::development()
    }
}

fn app() -> (Router, AuthConfig) {
    let config = test_config();
    let router = auth_router_generic(InMemoryUserRepository::new(), config.clone()).unwrap();
    (router, config)
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, HeaderMap, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, headers, body)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_with_cookie(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

fn refresh_request(cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("POST").uri("/refresh");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

/// Value of the named cookie from the response's Set-Cookie headers
fn set_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find_map(|v| {
            let pair = v.split(';').next()?;
            let (n, value) = pair.split_once('=')?;
            (n == name).then(|| value.to_string())
        })
}

fn alice() -> Value {
    json!({
        "username": "alice",
        "password": "pw123",
        "newsPref": "tech",
        "moviePref": "scifi",
    })
}

async fn register_and_login(app: &Router) -> (String, String) {
    let (status, _, _) = send(app, post_json("/register", alice())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, headers, _) = send(
        app,
        post_json("/login", json!({"username": "alice", "password": "pw123"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    (
        set_cookie(&headers, "access_token").unwrap(),
        set_cookie(&headers, "refresh_token").unwrap(),
    )
}

#[tokio::test]
async fn test_session_lifecycle() {
    let (app, config) = app();

    // Register
    let (status, _, body) = send(&app, post_json("/register", alice())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({"username": "alice", "newsPref": "tech", "moviePref": "scifi"}));

    // Login
    let (status, headers, body) = send(
        &app,
        post_json("/login", json!({"username": "alice", "password": "pw123"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "alice");
    assert!(body["accessExpiresAt"].is_string());
    assert!(body["refreshExpiresAt"].is_string());

    let cookies: Vec<_> = headers
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect();
    assert_eq!(cookies.len(), 2);
    for cookie in &cookies {
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Strict"));
        assert!(cookie.contains("Path=/"));
    }
    assert!(cookies.iter().any(|c| c.contains("Max-Age=7200")));
    assert!(cookies.iter().any(|c| c.contains("Max-Age=86400")));

    let access = set_cookie(&headers, "access_token").unwrap();
    let refresh = set_cookie(&headers, "refresh_token").unwrap();
    // Tokens are not echoed in the body
    assert!(!body.to_string().contains(&access));

    // User info with the access token
    let (status, _, body) = send(
        &app,
        get_with_cookie("/userInfo", Some(&format!("access_token={access}"))),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "alice");
    assert_eq!(body["newsPref"], "tech");
    assert!(body.get("passwordHash").is_none());

    // Refresh
    let (status, headers, body) =
        send(&app, refresh_request(Some(&format!("refresh_token={refresh}")))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "alice");
    let new_access = set_cookie(&headers, "access_token").unwrap();
    let new_refresh = set_cookie(&headers, "refresh_token").unwrap();
    assert_ne!(new_access, access);
    assert_ne!(new_refresh, refresh);

    let (status, _, _) = send(
        &app,
        get_with_cookie("/userInfo", Some(&format!("access_token={new_access}"))),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // An access token past its 2 hour lifetime
    let tokens = TokenService::new(&config).unwrap();
    let expired = tokens
        .issue_access_at("alice", Utc::now() - Duration::hours(3))
        .unwrap();
    let (status, _, body) = send(
        &app,
        get_with_cookie("/userInfo", Some(&format!("access_token={}", expired.token))),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["status"], 401);
}

#[tokio::test]
async fn test_list_users() {
    let (app, _) = app();

    let (status, _, body) = send(&app, get_with_cookie("/users", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    send(&app, post_json("/register", alice())).await;
    let mut bob = alice();
    bob["username"] = json!("bob");
    send(&app, post_json("/register", bob)).await;

    let (status, _, body) = send(&app, get_with_cookie("/users", None)).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<_> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["username"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, ["alice", "bob"]);
    assert!(!body.to_string().contains("$2"));
}

#[tokio::test]
async fn test_duplicate_registration_is_conflict() {
    let (app, _) = app();

    let (status, _, _) = send(&app, post_json("/register", alice())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _, body) = send(&app, post_json("/register", alice())).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["detail"], "username already exists");

    let (_, _, body) = send(&app, get_with_cookie("/users", None)).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_wrong_password_and_unknown_user_look_the_same() {
    let (app, _) = app();
    send(&app, post_json("/register", alice())).await;

    let (status_a, headers_a, body_a) = send(
        &app,
        post_json("/login", json!({"username": "alice", "password": "wrong"})),
    )
    .await;
    let (status_b, headers_b, body_b) = send(
        &app,
        post_json("/login", json!({"username": "nobody", "password": "pw123"})),
    )
    .await;

    assert_eq!(status_a, StatusCode::UNAUTHORIZED);
    assert_eq!(status_b, StatusCode::UNAUTHORIZED);
    assert_eq!(body_a, body_b);
    assert_eq!(body_a["detail"], "invalid credentials");
    assert!(headers_a.get(header::SET_COOKIE).is_none());
    assert!(headers_b.get(header::SET_COOKIE).is_none());
}

#[tokio::test]
async fn test_missing_fields_are_bad_request() {
    let (app, _) = app();

    let (status, _, body) = send(
        &app,
        post_json("/register", json!({"username": "alice", "password": "pw123"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["detail"],
        "username, password, newsPref and moviePref are required"
    );

    let (status, _, body) = send(&app, post_json("/login", json!({"username": "alice"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "username and password are required");
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let (app, _) = app();

    let (status, _, body) = send(
        &app,
        post_json("/login", json!({"username": 42, "password": "pw123"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);

    let req = Request::builder()
        .method("POST")
        .uri("/register")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, _, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_user_info_accepts_bearer_token() {
    let (app, _) = app();
    let (access, _) = register_and_login(&app).await;

    let req = Request::builder()
        .uri("/userInfo")
        .header(header::AUTHORIZATION, format!("Bearer {access}"))
        .body(Body::empty())
        .unwrap();
    let (status, _, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "alice");
}

#[tokio::test]
async fn test_user_info_rejects_missing_and_wrong_kind_tokens() {
    let (app, _) = app();
    let (_, refresh) = register_and_login(&app).await;

    let (status, _, missing) = send(&app, get_with_cookie("/userInfo", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _, wrong_kind) = send(
        &app,
        get_with_cookie("/userInfo", Some(&format!("access_token={refresh}"))),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Rejection reason is not exposed
    assert_eq!(missing, wrong_kind);
}

#[tokio::test]
async fn test_user_info_for_deleted_user_is_internal_error() {
    let (app, config) = app();

    // Valid token for a name that was never registered
    let tokens = TokenService::new(&config).unwrap();
    let ghost = tokens.issue_access("ghost").unwrap();

    let (status, _, body) = send(
        &app,
        get_with_cookie("/userInfo", Some(&format!("access_token={}", ghost.token))),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!body.to_string().contains("ghost"));
}

#[tokio::test]
async fn test_refresh_rejections() {
    let (app, config) = app();
    let (access, _) = register_and_login(&app).await;

    let (status, _, body) = send(&app, refresh_request(None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["action"], "Please login again");

    // Access token presented as refresh token
    let (status, _, _) =
        send(&app, refresh_request(Some(&format!("refresh_token={access}")))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let tokens = TokenService::new(&config).unwrap();
    let expired = tokens
        .issue_refresh_at("alice", Utc::now() - Duration::hours(25))
        .unwrap();
    let (status, headers, _) = send(
        &app,
        refresh_request(Some(&format!("refresh_token={}", expired.token))),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(headers.get(header::SET_COOKIE).is_none());
}

#[test]
fn test_identical_secrets_fail_router_construction() {
    let secret = "0123456789abcdef0123456789abcdef";
    let config = AuthConfig::new(
        crate::TokenSecret::new(secret).unwrap(),
        crate::TokenSecret::new(secret).unwrap(),
    );
    assert!(auth_router_generic(InMemoryUserRepository::new(), config).is_err());
}
