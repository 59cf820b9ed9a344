use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

/// Application configuration loaded from environment variables.
///
/// Required env vars:
/// - `JWT_SECRET`: Secret key for signing session tokens
/// - `GOOGLE_CLIENT_ID`: Google OAuth client ID
/// - `GOOGLE_CLIENT_SECRET`: Google OAuth client secret
/// - `GOOGLE_REDIRECT_URI`: OAuth callback URI registered with Google
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub token_duration_days: i64,
    pub google_client_id: String,
    pub google_client_secret: String,
    pub google_redirect_uri: String,
    /// Base URL the OAuth callback redirects browsers back to.
    pub frontend_url: String,
    /// JSON document file backing the user store.
    pub store_path: PathBuf,
    /// Built frontend bundle served as the SPA, when present.
    pub frontend_dir: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            jwt_secret: env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            token_duration_days: 7,
            google_client_id: env::var("GOOGLE_CLIENT_ID")
                .context("GOOGLE_CLIENT_ID must be set")?,
            google_client_secret: env::var("GOOGLE_CLIENT_SECRET")
                .context("GOOGLE_CLIENT_SECRET must be set")?,
            google_redirect_uri: env::var("GOOGLE_REDIRECT_URI")
                .context("GOOGLE_REDIRECT_URI must be set")?,
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:8080".to_string()),
            store_path: env::var("STORE_PATH")
                .unwrap_or_else(|_| "data/users.json".to_string())
                .into(),
            frontend_dir: env::var("FRONTEND_DIR")
                .unwrap_or_else(|_| "crates/frontend/dist".to_string()),
        })
    }
}
