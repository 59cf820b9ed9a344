//! Authentication HTTP handlers.

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
    Extension, Json,
};
use serde::Deserialize;
use shared_types::UserProfile;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::AppState;

use super::types::{AuthUser, AuthUserResponse};
use super::{google, jwt, reconcile::reconcile};

/// Start the Google OAuth login flow.
///
/// Sends the browser to Google's consent screen.
pub async fn auth_login(State(state): State<AppState>) -> Redirect {
    // State parameter for CSRF protection; echoed back by Google on the callback
    let csrf_state = Uuid::new_v4().to_string();

    Redirect::to(&state.google.authorize_url(&csrf_state))
}

#[derive(Debug, Deserialize)]
pub struct AuthCallbackParams {
    pub code: String,
    #[allow(dead_code)]
    pub state: Option<String>,
}

/// Handle the Google OAuth callback.
///
/// Exchanges the authorization code for tokens, reconciles the Google
/// identity against the user store, and sends the browser back to the
/// frontend callback page with a freshly minted session token. Every
/// failure collapses into one error redirect so the browser always lands
/// somewhere sensible.
pub async fn auth_callback(
    State(state): State<AppState>,
    Query(params): Query<AuthCallbackParams>,
) -> Response {
    match handle_callback_inner(&state, params).await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!("Auth callback error: {:?}", e);
            let destination = format!(
                "{}/auth/callback?auth_error=auth_failed",
                state.config.frontend_url
            );
            Redirect::to(&destination).into_response()
        }
    }
}

async fn handle_callback_inner(
    state: &AppState,
    params: AuthCallbackParams,
) -> Result<Response, ApiError> {
    let access_token = state.google.exchange_code(params.code).await?;
    let info = state.google.fetch_userinfo(&access_token).await?;

    tracing::info!("OAuth login attempt from: {}", info.email);

    let user = reconcile(state.store.as_ref(), google::assertion_from(info)).await?;

    let token = jwt::issue_token(&state.config, &user)
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("Failed to create token: {}", e)))?;

    tracing::info!("Successful login for: {}", user.email);

    let destination = format!(
        "{}/auth/callback?token={}&provider={}",
        state.config.frontend_url,
        urlencoding::encode(&token),
        user.provider
    );

    Ok(Redirect::to(&destination).into_response())
}

/// Get the stored profile of the authenticated user.
///
/// Returns the whitelisted projection only; 404 when the record behind a
/// still-valid token no longer exists.
pub async fn auth_profile(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Json<UserProfile>> {
    let id = Uuid::parse_str(&user.id)
        .map_err(|_| ApiError::unauthorized("Invalid token subject"))?;

    let record = state
        .store
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("User"))?;

    Ok(Json(record.profile()))
}

/// Echo the validated claims of the authenticated user.
pub async fn auth_me(Extension(user): Extension<AuthUser>) -> Json<AuthUserResponse> {
    Json(AuthUserResponse {
        id: user.id,
        email: user.email,
        provider: user.provider,
    })
}
