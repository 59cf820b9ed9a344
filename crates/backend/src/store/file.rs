//! File-backed [`UserStore`] persisting records to a JSON document file.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use uuid::Uuid;

use crate::store::{NewUser, StoreError, User, UserStore, UserUpdate};

/// Loads the whole document file at open and rewrites it after each
/// mutation. Writes go to a temp file that is fsynced and then renamed
/// over the live file.
#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
    inner: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl FileStore {
    /// Opens (or creates) a store at the provided path, eagerly loading
    /// existing records.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        Self::ensure_parent_exists(&path)?;

        let snapshot = Self::load_snapshot(&path)?;

        Ok(Self {
            path,
            inner: Arc::new(RwLock::new(snapshot)),
        })
    }

    fn load_snapshot(path: &Path) -> Result<HashMap<Uuid, User>, StoreError> {
        if !path.exists() {
            return Ok(HashMap::new());
        }

        let metadata = path.metadata().map_err(|e| StoreError::Backend {
            message: format!("failed to inspect {}: {e}", path.display()),
        })?;

        // A freshly touched file is treated as an empty store.
        if metadata.len() == 0 {
            return Ok(HashMap::new());
        }

        let bytes = fs::read(path).map_err(|e| StoreError::Backend {
            message: format!("failed to read {}: {e}", path.display()),
        })?;

        let users: Vec<User> =
            serde_json::from_slice(&bytes).map_err(|e| StoreError::Serialization {
                message: format!("failed to parse {}: {e}", path.display()),
            })?;

        Ok(users.into_iter().map(|u| (u.id, u)).collect())
    }

    fn ensure_parent_exists(path: &Path) -> Result<(), StoreError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StoreError::Backend {
                message: format!("failed to create store directory {}: {e}", parent.display()),
            })?;
        }
        Ok(())
    }

    fn persist_locked(&self, contents: &HashMap<Uuid, User>) -> Result<(), StoreError> {
        Self::ensure_parent_exists(&self.path)?;

        let snapshot: Vec<&User> = contents.values().collect();
        let serialized =
            serde_json::to_vec_pretty(&snapshot).map_err(|e| StoreError::Serialization {
                message: format!("failed to serialize store snapshot: {e}"),
            })?;

        let mut tmp_path = self.path.clone();
        tmp_path.set_extension("tmp");

        {
            let mut file = File::create(&tmp_path).map_err(|e| StoreError::Backend {
                message: format!("failed to create {}: {e}", tmp_path.display()),
            })?;

            file.write_all(&serialized).map_err(|e| StoreError::Backend {
                message: format!("failed to write {}: {e}", tmp_path.display()),
            })?;
            file.sync_all().map_err(|e| StoreError::Backend {
                message: format!("failed to sync {}: {e}", tmp_path.display()),
            })?;
        }

        fs::rename(&tmp_path, &self.path).map_err(|e| StoreError::Backend {
            message: format!("failed to replace {}: {e}", self.path.display()),
        })
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
impl UserStore for FileStore {
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
        self.persist_locked(&guard)?;

        Ok(user)
    }

    async fn update(&self, id: Uuid, update: UserUpdate) -> Result<User, StoreError> {
        let mut guard = self.write()?;

        let user = match guard.get_mut(&id) {
            Some(user) => {
                user.apply_update(update);
                user.clone()
            }
            None => return Err(StoreError::NotFound),
        };

        self.persist_locked(&guard)?;

        Ok(user)
    }
}
