use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Public view of a user account, safe to hand to the browser.
///
/// This is the only user shape that crosses the HTTP boundary. Provider
/// subject ids and anything else internal stay on the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub avatar: Option<String>,
    pub provider: String, // "google"
    pub is_email_verified: bool,
    pub last_login_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Claims echo returned by `GET /auth/me` for an authenticated request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUserResponse {
    pub id: String, // token subject, the user record id
    pub email: String,
    pub provider: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_profile() -> UserProfile {
        UserProfile {
            id: Uuid::new_v4(),
            email: "ada@example.com".to_string(),
            name: "Ada Lovelace".to_string(),
            avatar: Some("https://lh3.googleusercontent.com/a/photo".to_string()),
            provider: "google".to_string(),
            is_email_verified: true,
            last_login_at: Utc::now(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn user_profile_round_trips_through_json() {
        let profile = sample_profile();
        let json = serde_json::to_string(&profile).unwrap();
        let back: UserProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(profile, back);
    }

    #[test]
    fn user_profile_json_has_no_provider_subject_id() {
        let json = serde_json::to_value(sample_profile()).unwrap();
        let obj = json.as_object().unwrap();
        assert!(!obj.contains_key("external_id"));
        assert!(obj.contains_key("is_email_verified"));
    }

    #[test]
    fn auth_user_response_round_trips_through_json() {
        let me = AuthUserResponse {
            id: Uuid::new_v4().to_string(),
            email: "ada@example.com".to_string(),
            provider: "google".to_string(),
        };
        let json = serde_json::to_string(&me).unwrap();
        let back: AuthUserResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(me, back);
    }
}
