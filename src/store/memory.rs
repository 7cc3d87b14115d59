use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{IdentityStore, Thread, ThreadUpdate, User};

/// In-memory store used by tests in place of Postgres. Enforces the same
/// username uniqueness rule as the real schema.
#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<Uuid, User>>,
    threads: RwLock<HashMap<Uuid, Thread>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl IdentityStore for MemoryStore {
    async fn find_user_by_username(&self, username: &str) -> anyhow::Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.username == username).cloned())
    }

    async fn find_user_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn insert_user(&self, user: &User) -> anyhow::Result<bool> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.username == user.username) {
            return Ok(false);
        }
        users.insert(user.id, user.clone());
        Ok(true)
    }

    async fn insert_thread(&self, thread: &Thread) -> anyhow::Result<()> {
        self.threads.write().await.insert(thread.id, thread.clone());
        Ok(())
    }

    async fn find_thread_by_id(&self, id: Uuid) -> anyhow::Result<Option<Thread>> {
        Ok(self.threads.read().await.get(&id).cloned())
    }

    async fn all_threads(&self) -> anyhow::Result<Vec<Thread>> {
        Ok(self.threads.read().await.values().cloned().collect())
    }

    async fn threads_by_owner(&self, owner: Uuid) -> anyhow::Result<Vec<Thread>> {
        let threads = self.threads.read().await;
        Ok(threads
            .values()
            .filter(|t| t.owner_user_id == owner)
            .cloned()
            .collect())
    }

    async fn update_thread(&self, id: Uuid, update: &ThreadUpdate) -> anyhow::Result<bool> {
        let mut threads = self.threads.write().await;
        match threads.get_mut(&id) {
            Some(thread) => {
                thread.title = update.title.clone();
                thread.sub_title = update.sub_title.clone();
                thread.banner_image = update.banner_image.clone();
                thread.description = update.description.clone();
                thread.price = update.price;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_thread(&self, id: Uuid) -> anyhow::Result<bool> {
        Ok(self.threads.write().await.remove(&id).is_some())
    }
}
