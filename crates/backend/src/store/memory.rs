//! Thread-safe in-memory [`UserStore`] for local development and tests.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use uuid::Uuid;

use crate::store::{NewUser, StoreError, User, UserStore, UserUpdate};

/// Keeps records in-process. Uniqueness is enforced under the write lock,
/// so a concurrent insert race resolves to one winner and one
/// [`StoreError::DuplicateEmail`].
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<Uuid, User>>, StoreError> {
        self.inner.read().map_err(|_| StoreError::Backend {
            message: "user store lock poisoned".to_string(),
        })
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<Uuid, User>>, StoreError> {
        self.inner.write().map_err(|_| StoreError::Backend {
            message: "user store lock poisoned".to_string(),
        })
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self.read()?.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.read()?.get(&id).cloned())
    }

    async fn insert(&self, new_user: NewUser) -> Result<User, StoreError> {
        let mut guard = self.write()?;

        if guard.values().any(|u| u.email == new_user.email) {
            return Err(StoreError::DuplicateEmail {
                email: new_user.email,
            });
        }

        let user = User {
            id: Uuid::new_v4(),
            email: new_user.email,
            name: new_user.name,
            avatar: new_user.avatar,
            external_id: new_user.external_id,
            provider: new_user.provider,
            is_email_verified: new_user.is_email_verified,
            last_login_at: new_user.last_login_at,
            created_at: new_user.created_at,
        };

        guard.insert(user.id, user.clone());

        Ok(user)
    }

    async fn update(&self, id: Uuid, update: UserUpdate) -> Result<User, StoreError> {
        let mut guard = self.write()?;

        match guard.get_mut(&id) {
            Some(user) => {
                user.apply_update(update);
                Ok(user.clone())
            }
            None => Err(StoreError::NotFound),
        }
    }
}
