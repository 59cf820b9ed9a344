//! OAuth identity reconciliation: find-or-create a user by email.

use chrono::Utc;

use crate::error::{ApiError, ApiResult};
use crate::store::{NewUser, User, UserStore, UserUpdate};

use super::types::OAuthAssertion;

/// Reconcile a provider assertion against the user store.
///
/// Email is the reconciliation key: a record with a matching email is
/// refreshed in place (same id, same `created_at`), otherwise a new record
/// is created with `created_at` equal to this login. Either way the account
/// comes out with `is_email_verified` set and `last_login_at` at now.
///
/// Exactly one store write per call. A failed write surfaces to the caller
/// as-is; there is no retry and no notification side effect here.
pub async fn reconcile(store: &dyn UserStore, assertion: OAuthAssertion) -> ApiResult<User> {
    if assertion.email.is_empty() {
        return Err(ApiError::validation("email"));
    }
    if assertion.name.is_empty() {
        return Err(ApiError::validation("name"));
    }
    if assertion.external_id.is_empty() {
        return Err(ApiError::validation("external_id"));
    }

    tracing::info!(
        "Reconciling OAuth login: {} via {}",
        assertion.email,
        assertion.provider
    );

    let now = Utc::now();

    match store.find_by_email(&assertion.email).await? {
        Some(existing) => {
            let user = store
                .update(
                    existing.id,
                    UserUpdate {
                        name: assertion.name,
                        avatar: assertion.avatar,
                        external_id: assertion.external_id,
                        provider: assertion.provider,
                        is_email_verified: true,
                        last_login_at: now,
                    },
                )
                .await?;

            tracing::info!("Existing user logged in: {}", user.email);
            Ok(user)
        }
        None => {
            let user = store
                .insert(NewUser {
                    email: assertion.email,
                    name: assertion.name,
                    avatar: assertion.avatar,
                    external_id: assertion.external_id,
                    provider: assertion.provider,
                    is_email_verified: true,
                    last_login_at: now,
                    created_at: now,
                })
                .await?;

            tracing::info!("New user created: {}", user.email);
            Ok(user)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, StoreError};
    use async_trait::async_trait;
    use uuid::Uuid;

    fn assertion(email: &str, name: &str) -> OAuthAssertion {
        OAuthAssertion {
            external_id: "google-subject-1".to_string(),
            email: email.to_string(),
            name: name.to_string(),
            avatar: Some("https://example.com/pic".to_string()),
            provider: "google".to_string(),
        }
    }

    #[tokio::test]
    async fn new_email_creates_a_verified_record() {
        let store = MemoryStore::new();

        let user = reconcile(&store, assertion("ada@example.com", "Ada Lovelace"))
            .await
            .expect("reconcile should create the user");

        assert_eq!(user.email, "ada@example.com");
        assert_eq!(user.name, "Ada Lovelace");
        assert_eq!(user.external_id, "google-subject-1");
        assert!(user.is_email_verified);
        assert_eq!(user.created_at, user.last_login_at);

        let stored = store
            .find_by_email("ada@example.com")
            .await
            .unwrap()
            .expect("record should be persisted");
        assert_eq!(stored.id, user.id);
    }

    #[tokio::test]
    async fn repeat_login_keeps_id_and_refreshes_fields() {
        let store = MemoryStore::new();

        let first = reconcile(&store, assertion("ada@example.com", "Ada Lovelace"))
            .await
            .unwrap();

        let mut second_assertion = assertion("ada@example.com", "Ada L.");
        second_assertion.avatar = None;
        let second = reconcile(&store, second_assertion).await.unwrap();

        assert_eq!(second.id, first.id);
        assert_eq!(second.name, "Ada L.");
        assert_eq!(second.avatar, None);
        assert_eq!(second.created_at, first.created_at);
        assert!(second.last_login_at >= first.last_login_at);
    }

    #[tokio::test]
    async fn missing_email_is_a_validation_error() {
        let store = MemoryStore::new();

        let err = reconcile(&store, assertion("", "Ada Lovelace"))
            .await
            .expect_err("empty email should be rejected");

        assert!(matches!(err, ApiError::Validation(field) if field == "email"));
        assert!(store.find_by_email("").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn missing_name_is_a_validation_error() {
        let store = MemoryStore::new();

        let err = reconcile(&store, assertion("ada@example.com", ""))
            .await
            .expect_err("empty name should be rejected");

        assert!(matches!(err, ApiError::Validation(field) if field == "name"));
    }

    #[tokio::test]
    async fn missing_subject_id_is_a_validation_error() {
        let store = MemoryStore::new();
        let mut input = assertion("ada@example.com", "Ada Lovelace");
        input.external_id = String::new();

        let err = reconcile(&store, input)
            .await
            .expect_err("empty subject id should be rejected");

        assert!(matches!(err, ApiError::Validation(field) if field == "external_id"));
    }

    #[tokio::test]
    async fn validation_reports_the_first_missing_field() {
        let store = MemoryStore::new();
        let mut input = assertion("", "");
        input.external_id = String::new();

        let err = reconcile(&store, input).await.expect_err("should fail");

        assert!(matches!(err, ApiError::Validation(field) if field == "email"));
    }

    #[tokio::test]
    async fn two_missing_fields_report_the_earlier_one() {
        let store = MemoryStore::new();
        let mut input = assertion("ada@example.com", "");
        input.external_id = String::new();

        let err = reconcile(&store, input).await.expect_err("should fail");

        assert!(matches!(err, ApiError::Validation(field) if field == "name"));
        assert!(store
            .find_by_email("ada@example.com")
            .await
            .unwrap()
            .is_none());
    }

    /// Store double that always misses on the email lookup, reproducing the
    /// window where two logins both read before either one writes.
    struct StaleReadStore {
        inner: MemoryStore,
    }

    #[async_trait]
    impl UserStore for StaleReadStore {
        async fn find_by_email(&self, _email: &str) -> Result<Option<User>, StoreError> {
            Ok(None)
        }

        async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
            self.inner.find_by_id(id).await
        }

        async fn insert(&self, new_user: NewUser) -> Result<User, StoreError> {
            self.inner.insert(new_user).await
        }

        async fn update(&self, id: Uuid, update: UserUpdate) -> Result<User, StoreError> {
            self.inner.update(id, update).await
        }
    }

    #[tokio::test]
    async fn lost_create_race_surfaces_as_persistence_error() {
        let store = StaleReadStore {
            inner: MemoryStore::new(),
        };

        let winner = reconcile(&store, assertion("ada@example.com", "Ada Lovelace"))
            .await
            .expect("first login should create the record");

        let err = reconcile(&store, assertion("ada@example.com", "Ada Lovelace"))
            .await
            .expect_err("second create against the same email should lose");

        assert!(matches!(
            err,
            ApiError::Store(StoreError::DuplicateEmail { .. })
        ));

        let surviving = store
            .inner
            .find_by_email("ada@example.com")
            .await
            .unwrap()
            .expect("winner's record should persist");
        assert_eq!(surviving.id, winner.id);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn concurrent_logins_leave_exactly_one_record() {
        let store = MemoryStore::new();

        let (a, b) = tokio::join!(
            reconcile(&store, assertion("ada@example.com", "Ada Lovelace")),
            reconcile(&store, assertion("ada@example.com", "Ada Lovelace")),
        );

        let surviving = store
            .find_by_email("ada@example.com")
            .await
            .unwrap()
            .expect("one record should persist");

        // Whichever interleaving happened, every successful call saw the
        // same record and any loser saw the duplicate-email rejection.
        for result in [a, b] {
            match result {
                Ok(user) => assert_eq!(user.id, surviving.id),
                Err(err) => assert!(matches!(
                    err,
                    ApiError::Store(StoreError::DuplicateEmail { .. })
                )),
            }
        }
    }
}
