use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[cfg(test)]
pub mod memory;
pub mod postgres;

/// User record as persisted. Created only by registration, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub display_name: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing)]
    pub password_hash: String, // Argon2id PHC string, never exposed in JSON
    pub gdpr_accepted: bool,
    pub is_admin: bool,
}

/// Thread record. `owner_user_id` references the creating user's id; no
/// cascade is defined (there is no user-delete operation).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Thread {
    pub id: Uuid,
    pub title: String,
    pub sub_title: String,
    pub banner_image: String,
    pub description: String,
    pub price: f64,
    pub owner_user_id: Uuid,
}

/// Full-content replacement applied by the thread update operation. The owner
/// is deliberately not part of it: threads do not change hands.
#[derive(Debug, Clone)]
pub struct ThreadUpdate {
    pub title: String,
    pub sub_title: String,
    pub banner_image: String,
    pub description: String,
    pub price: f64,
}

/// Persistence collaborator for user and thread records. Constructed once at
/// bootstrap and injected through `AppState`; handlers never reach for a
/// global handle.
#[async_trait]
pub trait IdentityStore: Send + Sync {
    async fn find_user_by_username(&self, username: &str) -> anyhow::Result<Option<User>>;
    async fn find_user_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>>;
    /// Returns `false` when the username is already taken. Backed by a unique
    /// constraint, so a registration that loses a check-then-insert race still
    /// surfaces here instead of creating a duplicate.
    async fn insert_user(&self, user: &User) -> anyhow::Result<bool>;

    async fn insert_thread(&self, thread: &Thread) -> anyhow::Result<()>;
    async fn find_thread_by_id(&self, id: Uuid) -> anyhow::Result<Option<Thread>>;
    async fn all_threads(&self) -> anyhow::Result<Vec<Thread>>;
    async fn threads_by_owner(&self, owner: Uuid) -> anyhow::Result<Vec<Thread>>;
    /// Returns `false` when no thread with that id exists.
    async fn update_thread(&self, id: Uuid, update: &ThreadUpdate) -> anyhow::Result<bool>;
    /// Returns `false` when no thread with that id exists.
    async fn delete_thread(&self, id: Uuid) -> anyhow::Result<bool>;
}
