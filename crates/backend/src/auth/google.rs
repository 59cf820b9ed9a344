//! Google OAuth2 client: authorization URL, code exchange, userinfo fetch.

use serde::Deserialize;

use crate::config::AppConfig;
use crate::error::ApiError;

use super::types::OAuthAssertion;

/// Identity-system tag stored on reconciled records and carried in claims.
pub const PROVIDER: &str = "google";

const AUTHORIZE_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v2/userinfo";

/// Final fallback when Google returns no usable name field at all.
const DEFAULT_DISPLAY_NAME: &str = "Google User";

/// Profile payload from Google's v2 userinfo endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleUserInfo {
    pub id: String,
    #[serde(default)]
    pub email: String,
    pub name: Option<String>,
    pub given_name: Option<String>,
    pub family_name: Option<String>,
    pub picture: Option<String>,
}

/// Client for the two server-side Google calls in the login flow.
///
/// Endpoint URLs are injectable so tests can stand in a local mock server.
#[derive(Clone)]
pub struct GoogleClient {
    http: reqwest::Client,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    token_url: String,
    userinfo_url: String,
}

impl GoogleClient {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_endpoints(config, TOKEN_URL, USERINFO_URL)
    }

    pub fn with_endpoints(
        config: &AppConfig,
        token_url: impl Into<String>,
        userinfo_url: impl Into<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            client_id: config.google_client_id.clone(),
            client_secret: config.google_client_secret.clone(),
            redirect_uri: config.google_redirect_uri.clone(),
            token_url: token_url.into(),
            userinfo_url: userinfo_url.into(),
        }
    }

    /// Build the authorization URL the browser is redirected to.
    pub fn authorize_url(&self, state: &str) -> String {
        let scopes = ["openid", "email", "profile"].join(" ");

        format!(
            "{}?\
             client_id={}&\
             redirect_uri={}&\
             response_type=code&\
             scope={}&\
             state={}",
            AUTHORIZE_URL,
            urlencoding::encode(&self.client_id),
            urlencoding::encode(&self.redirect_uri),
            urlencoding::encode(&scopes),
            state
        )
    }

    /// Exchange an authorization code for an access token.
    pub async fn exchange_code(&self, code: String) -> Result<String, ApiError> {
        #[derive(serde::Serialize)]
        struct TokenRequest {
            code: String,
            client_id: String,
            client_secret: String,
            redirect_uri: String,
            grant_type: String,
        }

        #[derive(Deserialize)]
        struct GoogleTokenResponse {
            access_token: String,
        }

        let response = self
            .http
            .post(&self.token_url)
            .form(&TokenRequest {
                code,
                client_id: self.client_id.clone(),
                client_secret: self.client_secret.clone(),
                redirect_uri: self.redirect_uri.clone(),
                grant_type: "authorization_code".to_string(),
            })
            .send()
            .await
            .map_err(|e| ApiError::Internal(anyhow::anyhow!("Token exchange failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Internal(anyhow::anyhow!(
                "Token exchange failed: {} - {}",
                status,
                body
            )));
        }

        let tokens: GoogleTokenResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Internal(anyhow::anyhow!("Invalid token response: {}", e)))?;

        Ok(tokens.access_token)
    }

    /// Fetch the profile of the account the access token belongs to.
    pub async fn fetch_userinfo(&self, access_token: &str) -> Result<GoogleUserInfo, ApiError> {
        self.http
            .get(&self.userinfo_url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| ApiError::Internal(anyhow::anyhow!("Failed to get user info: {}", e)))?
            .json()
            .await
            .map_err(|e| ApiError::Internal(anyhow::anyhow!("Invalid user info response: {}", e)))
    }
}

/// Assemble the provider-agnostic assertion the reconciler consumes.
pub fn assertion_from(info: GoogleUserInfo) -> OAuthAssertion {
    let name = display_name(&info);

    OAuthAssertion {
        external_id: info.id,
        email: info.email,
        name,
        avatar: info.picture,
        provider: PROVIDER.to_string(),
    }
}

/// Shape a display name from the userinfo payload.
///
/// Tried in order: given + family name, given name alone, family name
/// alone, Google's own display name, the email local part, and finally a
/// fixed default. Empty strings count as absent.
pub fn display_name(info: &GoogleUserInfo) -> String {
    let given = non_empty(info.given_name.as_deref());
    let family = non_empty(info.family_name.as_deref());

    if let (Some(given), Some(family)) = (given, family) {
        return format!("{} {}", given, family);
    }
    if let Some(given) = given {
        return given.to_string();
    }
    if let Some(family) = family {
        return family.to_string();
    }
    if let Some(name) = non_empty(info.name.as_deref()) {
        return name.to_string();
    }
    if let Some(local_part) = non_empty(info.email.split('@').next()) {
        return local_part.to_string();
    }

    DEFAULT_DISPLAY_NAME.to_string()
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
