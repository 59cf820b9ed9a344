//! Storage contracts and built-in backends for user records.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared_types::UserProfile;
use thiserror::Error;
use uuid::Uuid;

/// A stored user account, one document per unique email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub avatar: Option<String>,
    /// Provider-issued subject id. Never exposed through the API.
    pub external_id: String,
    pub provider: String,
    pub is_email_verified: bool,
    pub last_login_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Whitelisted projection handed to API clients.
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            email: self.email.clone(),
            name: self.name.clone(),
            avatar: self.avatar.clone(),
            provider: self.provider.clone(),
            is_email_verified: self.is_email_verified,
            last_login_at: self.last_login_at,
            created_at: self.created_at,
        }
    }

    fn apply_update(&mut self, update: UserUpdate) {
        self.name = update.name;
        self.avatar = update.avatar;
        self.external_id = update.external_id;
        self.provider = update.provider;
        self.is_email_verified = update.is_email_verified;
        self.last_login_at = update.last_login_at;
    }
}

/// Input for inserting a fresh user record. The store assigns the id.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub avatar: Option<String>,
    pub external_id: String,
    pub provider: String,
    pub is_email_verified: bool,
    pub last_login_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Fields overwritten on every successful login. `id`, `email` and
/// `created_at` never change after insert.
#[derive(Debug, Clone)]
pub struct UserUpdate {
    pub name: String,
    pub avatar: Option<String>,
    pub external_id: String,
    pub provider: String,
    pub is_email_verified: bool,
    pub last_login_at: DateTime<Utc>,
}

/// Error type produced by [`UserStore`] implementations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Unique-email constraint rejected an insert.
    #[error("a user with email {email} already exists")]
    DuplicateEmail { email: String },

    /// The targeted record does not exist.
    #[error("user record not found")]
    NotFound,

    /// Serialization failure surfaced by the backend.
    #[error("serialization error: {message}")]
    Serialization { message: String },

    /// Backend-level failure for the storage engine.
    #[error("backend failure: {message}")]
    Backend { message: String },
}

/// Persistence contract for user accounts.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Looks up a user by email, the reconciliation key. Exact match.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Looks up a user by record id.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    /// Inserts a fresh record, assigning its id. Fails with
    /// [`StoreError::DuplicateEmail`] when the email is already taken.
    async fn insert(&self, new_user: NewUser) -> Result<User, StoreError>;

    /// Overwrites the login-refresh fields of an existing record.
    async fn update(&self, id: Uuid, update: UserUpdate) -> Result<User, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            email: "ada@example.com".to_string(),
            name: "Ada Lovelace".to_string(),
            avatar: None,
            external_id: "google-subject-1".to_string(),
            provider: "google".to_string(),
            is_email_verified: true,
            last_login_at: now,
            created_at: now,
        }
    }

    #[test]
    fn profile_projection_whitelists_fields() {
        let user = sample_user();
        let profile = user.profile();

        assert_eq!(profile.id, user.id);
        assert_eq!(profile.email, user.email);
        assert_eq!(profile.provider, "google");

        let json = serde_json::to_value(&profile).unwrap();
        assert!(json.get("external_id").is_none());
    }

    #[test]
    fn apply_update_leaves_identity_fields_alone() {
        let mut user = sample_user();
        let id = user.id;
        let created_at = user.created_at;
        let later = created_at + chrono::Duration::minutes(5);

        user.apply_update(UserUpdate {
            name: "Ada L.".to_string(),
            avatar: Some("https://example.com/pic".to_string()),
            external_id: "google-subject-1".to_string(),
            provider: "google".to_string(),
            is_email_verified: true,
            last_login_at: later,
        });

        assert_eq!(user.id, id);
        assert_eq!(user.email, "ada@example.com");
        assert_eq!(user.created_at, created_at);
        assert_eq!(user.name, "Ada L.");
        assert_eq!(user.last_login_at, later);
    }
}
