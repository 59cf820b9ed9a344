//! Auth-related types shared across the module.

use serde::{Deserialize, Serialize};

// Re-export shared types for convenience
pub use shared_types::AuthUserResponse;

/// JWT Claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user record id)
    pub sub: String,
    /// Email the account was reconciled under
    pub email: String,
    /// Identity provider that vouched for the login
    pub provider: String,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
}

/// Validated user from JWT
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
    pub provider: String,
}

/// Normalized identity assertion produced by a provider client after a
/// successful OAuth exchange. Fields arrive as-is; the reconciler decides
/// whether they are complete enough to act on.
#[derive(Debug, Clone)]
pub struct OAuthAssertion {
    /// Provider-issued subject id ("" when the provider omitted it)
    pub external_id: String,
    /// Email address ("" when the provider omitted it)
    pub email: String,
    /// Display name after fallback shaping ("" only if shaping failed)
    pub name: String,
    pub avatar: Option<String>,
    pub provider: String,
}
