//! Authentication middleware layer for protecting routes.

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::config::AppConfig;
use crate::error::ErrorResponse;
use crate::AppState;

use super::jwt;
use super::types::AuthUser;

/// Middleware function that requires a valid bearer token.
///
/// Use with `axum::middleware::from_fn_with_state` to protect routes. On
/// success the validated [`AuthUser`] is inserted into request extensions.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let user = match extract_auth_user(request.headers(), &state.config) {
        Ok(user) => user,
        Err(err) => return err.into_response(),
    };

    request.extensions_mut().insert(user);
    next.run(request).await
}

/// Extract and validate the user from request headers.
pub fn extract_auth_user(
    headers: &HeaderMap,
    config: &AppConfig,
) -> Result<AuthUser, (StatusCode, Json<ErrorResponse>)> {
    let token = extract_token_from_header(headers).ok_or_else(|| {
        (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse {
                error: "Missing authentication".to_string(),
                details: None,
            }),
        )
    })?;

    let claims = jwt::validate_token(config, &token).map_err(|_| {
        (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse {
                error: "Invalid or expired token".to_string(),
                details: None,
            }),
        )
    })?;

    Ok(AuthUser {
        id: claims.sub,
        email: claims.email,
        provider: claims.provider,
    })
}

fn extract_token_from_header(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.to_string())
}
