use thiserror::Error;
use uuid::Uuid;

use crate::models::User;

pub mod memory;

pub use memory::MemoryStore;

/// Error types for user storage
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("No user with id {0}")]
    UnknownUser(Uuid),
    #[error("Seed data unreadable: {0}")]
    Seed(String),
}

/// Abstraction over user persistence
///
/// Matching, swiping, and the route layer all talk to storage through this
/// trait, so the backing technology can change without touching them.
/// `list_users` must return users in a stable order (insertion order) so
/// that callers relying on tie-breaking get repeatable results.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait UserStore: Send + Sync {
    /// Fetches a user by id, `None` if not present
    async fn get_user(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    /// Lists all users in insertion order
    async fn list_users(&self) -> Result<Vec<User>, StoreError>;

    /// Inserts a new user record
    async fn insert_user(&self, user: User) -> Result<(), StoreError>;

    /// Replaces an existing user record
    ///
    /// Fails with `StoreError::UnknownUser` if the id has never been
    /// inserted.
    async fn update_user(&self, user: User) -> Result<(), StoreError>;
}
