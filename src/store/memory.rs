use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::User;

use super::{StoreError, UserStore};

/// In-memory user store
///
/// Holds all user records behind a read-write lock, with a side index
/// preserving insertion order for stable listing. Intended to be seeded
/// from a JSON file at startup; readers and writers are not serialized
/// against each other beyond the lock, so a match search racing a profile
/// edit may observe either version.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
}

#[derive(Default)]
struct Inner {
    users: HashMap<Uuid, User>,
    order: Vec<Uuid>,
}

impl MemoryStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with the given users
    pub fn from_users(users: Vec<User>) -> Self {
        let mut inner = Inner::default();
        for user in users {
            if !inner.users.contains_key(&user.id) {
                inner.order.push(user.id);
            }
            inner.users.insert(user.id, user);
        }
        Self {
            inner: Arc::new(RwLock::new(inner)),
        }
    }

    /// Loads seed data from a JSON file holding an array of user records
    ///
    /// Legacy field shapes (missing collections, mixed genre entries) are
    /// normalized during deserialization.
    pub fn from_seed_file(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| StoreError::Seed(format!("{}: {}", path.display(), e)))?;
        let users: Vec<User> = serde_json::from_str(&raw)
            .map_err(|e| StoreError::Seed(format!("{}: {}", path.display(), e)))?;

        tracing::info!(
            users = users.len(),
            path = %path.display(),
            "Loaded user seed data"
        );

        Ok(Self::from_users(users))
    }
}

#[async_trait::async_trait]
impl UserStore for MemoryStore {
    async fn get_user(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.users.get(&id).cloned())
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .order
            .iter()
            .filter_map(|id| inner.users.get(id).cloned())
            .collect())
    }

    async fn insert_user(&self, user: User) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        if !inner.users.contains_key(&user.id) {
            inner.order.push(user.id);
        }
        inner.users.insert(user.id, user);
        Ok(())
    }

    async fn update_user(&self, user: User) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        if !inner.users.contains_key(&user.id) {
            return Err(StoreError::UnknownUser(user.id));
        }
        inner.users.insert(user.id, user);
        Ok(())
    }
}
