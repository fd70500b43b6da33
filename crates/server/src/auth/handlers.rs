//! # Authentication Handlers
//!
//! HTTP request handlers for authentication endpoints.
//!
//! A successful login stores an RS256 token in the `jwt-token` cookie; logout
//! expires that cookie. Tokens are stateless, so logout has nothing to revoke.

use ::auth::{PasswordError, secrecy::SecretString, verify_password};
use axum::Json;
use axum_extra::extract::cookie::{Cookie, CookieJar};
use entity::{AppUser, UserRole, app_user};
use error::{AppError, MessageResponse, Result};
use logging::log_auth_event;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use tracing::info;
use validator::Validate;

use crate::{AUTH_COOKIE, AppState, dto::auth::LoginRequest};

/// Build the auth cookie.
///
/// An empty `value` with a zero lifetime clears the cookie in the browser.
fn auth_cookie(value: String, max_age_seconds: u64, secure: bool) -> Cookie<'static> {
    let max_age = time::Duration::seconds(i64::try_from(max_age_seconds).unwrap_or(i64::MAX));

    Cookie::build((AUTH_COOKIE, value))
        .http_only(true)
        .path("/")
        .max_age(max_age)
        .secure(secure)
        .build()
}

/// Inner handler for the login endpoint
///
/// # Errors
///
/// - 404 `Account not found.` when no user has the email
/// - 401 `Invalid password` when the password does not match
pub async fn login_handler_inner(
    state: &AppState,
    jar: CookieJar,
    req: LoginRequest,
) -> Result<(CookieJar, Json<MessageResponse>)> {
    req.validate()?;

    let user = AppUser::find()
        .filter(app_user::Column::Email.eq(req.email.as_str()))
        .one(&state.db)
        .await?;

    let Some(user) = user
    else {
        log_auth_event!("login", req.email, false);
        return Err(AppError::not_found("Account not found."));
    };

    let password = SecretString::from(req.password);
    if let Err(e) = verify_password(&password, &user.password_hash) {
        log_auth_event!("login", user.email, false);
        return Err(match e {
            PasswordError::VerificationFailed => AppError::unauthorized("Invalid password"),
            other => AppError::internal(format!("Stored password hash is unusable: {}", other)),
        });
    }

    let role = UserRole::find_by_id(user.user_role_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::internal(format!("Role {} of user {} is missing", user.user_role_id, user.app_user_id)))?;

    let token = state.jwt.issue_token(&user.email, &role.user_role_name)?;
    let cookie = auth_cookie(
        token,
        state.jwt.config().expiration_seconds,
        state.cookie_secure,
    );

    log_auth_event!("login", user.email, true);
    info!(user_id = %user.app_user_id, role = %role.user_role_name, "User logged in");

    Ok((
        jar.add(cookie),
        Json(MessageResponse::new("Login successful")),
    ))
}

/// Inner handler for the logout endpoint
pub async fn logout_handler_inner(state: &AppState, jar: CookieJar) -> Result<(CookieJar, Json<MessageResponse>)> {
    let cookie = auth_cookie(String::new(), 0, state.cookie_secure);

    Ok((
        jar.add(cookie),
        Json(MessageResponse::new("Logout successful")),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_cookie_attributes() {
        let rendered = auth_cookie("abc".to_string(), 1800, false).to_string();

        assert!(rendered.starts_with("jwt-token=abc"));
        assert!(rendered.contains("HttpOnly"));
        assert!(rendered.contains("Path=/"));
        assert!(rendered.contains("Max-Age=1800"));
        assert!(!rendered.contains("Secure"));
    }

    #[test]
    fn test_auth_cookie_secure_and_cleared() {
        let rendered = auth_cookie(String::new(), 0, true).to_string();

        assert!(rendered.starts_with("jwt-token=;"));
        assert!(rendered.contains("Max-Age=0"));
        assert!(rendered.contains("Secure"));
    }
}
