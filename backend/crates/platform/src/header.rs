//! Credential extraction from HTTP headers

use http::{HeaderMap, header};

/// Authorization scheme used for access tokens
const BEARER_PREFIX: &str = "Bearer ";

/// Extract the token from an `Authorization: Bearer <token>` header
///
/// Returns `None` when the header is absent, not valid ASCII, uses a
/// different scheme, or carries an empty token.
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;

    // The scheme name is case-insensitive (RFC 9110 §11.1)
    let scheme = value.get(..BEARER_PREFIX.len())?;
    if !scheme.eq_ignore_ascii_case(BEARER_PREFIX) {
        return None;
    }

    let token = value[BEARER_PREFIX.len()..].trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}
