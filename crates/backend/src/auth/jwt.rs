//! JWT session token creation and validation.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::config::AppConfig;
use crate::store::User;

use super::types::Claims;

/// Create a session token for a reconciled user.
///
/// The subject is the user record id, so the token stays valid across
/// profile changes and the claims never carry more than the id, email
/// and provider.
pub fn issue_token(
    config: &AppConfig,
    user: &User,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let exp = now + Duration::days(config.token_duration_days);

    let claims = Claims {
        sub: user.id.to_string(),
        email: user.email.clone(),
        provider: user.provider.clone(),
        iat: now.timestamp(),
        exp: exp.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
}

/// Validate a session token and return claims.
pub fn validate_token(
    config: &AppConfig,
    token: &str,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &Validation::default(),
    )?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn test_config() -> AppConfig {
        AppConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            jwt_secret: "test-secret-key-for-testing-only".to_string(),
            token_duration_days: 7,
            google_client_id: "test".to_string(),
            google_client_secret: "test".to_string(),
            google_redirect_uri: "http://localhost/callback".to_string(),
            frontend_url: "http://localhost:8080".to_string(),
            store_path: "data/users.json".into(),
            frontend_dir: "crates/frontend/dist".to_string(),
        }
    }

    fn test_user() -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            email: "test@example.com".to_string(),
            name: "Test User".to_string(),
            avatar: None,
            external_id: "google-subject-1".to_string(),
            provider: "google".to_string(),
            is_email_verified: true,
            last_login_at: now,
            created_at: now,
        }
    }

    #[test]
    fn test_issue_and_validate_token() {
        let config = test_config();
        let user = test_user();
        let token = issue_token(&config, &user).expect("should create token");

        let claims = validate_token(&config, &token).expect("should validate token");
        assert_eq!(claims.sub, user.id.to_string());
        assert_eq!(claims.email, "test@example.com");
        assert_eq!(claims.provider, "google");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_invalid_token_rejected() {
        let config = test_config();
        let result = validate_token(&config, "invalid-token");
        assert!(result.is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let config = test_config();
        let token = issue_token(&config, &test_user()).expect("should create token");

        let mut wrong_config = config;
        wrong_config.jwt_secret = "wrong-secret".to_string();

        let result = validate_token(&wrong_config, &token);
        assert!(result.is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let config = test_config();
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            email: "test@example.com".to_string(),
            provider: "google".to_string(),
            iat: now - 1_000,
            exp: now - 500,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
        )
        .expect("should encode expired token");

        let err = validate_token(&config, &token).expect_err("expired token should fail");
        assert!(matches!(
            err.kind(),
            jsonwebtoken::errors::ErrorKind::ExpiredSignature
        ));
    }
}
