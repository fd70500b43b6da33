//! # Authentication Middleware
//!
//! Resolves the caller's token, validates it and enforces the route's access
//! rule before the request reaches a handler.

use ::auth::{Access, Claims, required_access};
use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;
use error::AppError;
use logging::log_security_event;

use crate::{AUTH_COOKIE, AppState};

/// User information extracted from a validated token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Token subject (the user's email)
    pub email:  String,
    /// Authorities granted by the token
    pub scopes: Vec<String>,
}

impl AuthenticatedUser {
    /// Whether the user holds `authority`.
    pub fn has_scope(&self, authority: &str) -> bool { self.scopes.iter().any(|s| s == authority) }
}

impl From<Claims> for AuthenticatedUser {
    fn from(claims: Claims) -> Self {
        let scopes = claims.scopes().map(str::to_string).collect();
        Self {
            email: claims.sub,
            scopes,
        }
    }
}

/// Find the access token for a request.
///
/// The `jwt-token` cookie wins over an `Authorization: Bearer` header.
pub fn resolve_token(headers: &HeaderMap) -> Option<String> {
    let jar = CookieJar::from_headers(headers);
    if let Some(cookie) = jar.get(AUTH_COOKIE) &&
        !cookie.value().is_empty()
    {
        return Some(cookie.value().to_string());
    }

    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(::auth::extract_bearer_token)
        .map(str::to_string)
}

/// Authentication and authorization middleware
///
/// This middleware:
/// 1. Looks up the access rule for the method and path
/// 2. Lets public routes through untouched
/// 3. Validates the cookie or Bearer token (401 when missing or invalid)
/// 4. Checks the token's authorities against the rule (403 when insufficient)
/// 5. Adds the authenticated user to request extensions
pub async fn auth_middleware(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let access = required_access(request.method(), request.uri().path());
    if access == Access::Public {
        return next.run(request).await;
    }

    let path = request.uri().path().to_string();

    let Some(token) = resolve_token(request.headers())
    else {
        log_security_event!("missing_token", "anonymous", path);
        return AppError::unauthorized("Authentication required").into_response();
    };

    let claims = match state.jwt.validate_token(&token) {
        Ok(claims) => claims,
        Err(e) => {
            log_security_event!("invalid_token", "anonymous", e.code());
            return e.into_response();
        },
    };

    let user = AuthenticatedUser::from(claims);

    if !access.permits(user.scopes.iter().map(String::as_str)) {
        log_security_event!("access_denied", user.email, path);
        return AppError::forbidden(access.denial_message()).into_response();
    }

    request.extensions_mut().insert(user);

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn test_resolve_token_prefers_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("theme=dark; jwt-token=from-cookie"));
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer from-header"));

        assert_eq!(resolve_token(&headers).as_deref(), Some("from-cookie"));
    }

    #[test]
    fn test_resolve_token_falls_back_to_bearer() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer from-header"));

        assert_eq!(resolve_token(&headers).as_deref(), Some("from-header"));
    }

    #[test]
    fn test_resolve_token_ignores_empty_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("jwt-token="));
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer from-header"));

        assert_eq!(resolve_token(&headers).as_deref(), Some("from-header"));
    }

    #[test]
    fn test_resolve_token_none() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic dXNlcjpwYXNz"));

        assert!(resolve_token(&headers).is_none());
    }

    #[test]
    fn test_authenticated_user_from_claims() {
        let claims = Claims {
            iss:   "self".to_string(),
            sub:   "clerk@example.com".to_string(),
            scope: "Employee Admin".to_string(),
            iat:   0,
            exp:   1,
        };
        let user = AuthenticatedUser::from(claims);

        assert_eq!(user.email, "clerk@example.com");
        assert!(user.has_scope("Employee"));
        assert!(user.has_scope("Admin"));
        assert!(!user.has_scope("Citizen"));
    }
}
