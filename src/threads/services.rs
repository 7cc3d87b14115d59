use thiserror::Error;
use time::OffsetDateTime;
use tracing::info;
use uuid::Uuid;

use crate::store::{IdentityStore, Thread, ThreadUpdate};

#[derive(Debug, Error)]
pub enum ThreadError {
    #[error("thread not found")]
    NotFound,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

#[derive(Debug)]
pub struct NewThread {
    pub title: String,
    pub sub_title: String,
    pub banner_image: String,
    pub description: String,
    pub price: f64,
}

pub fn now_millis() -> i64 {
    (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64
}

/// Persists a new thread owned by the verified subject and returns its id.
pub async fn create_thread(
    store: &dyn IdentityStore,
    owner: Uuid,
    input: NewThread,
) -> Result<Uuid, ThreadError> {
    let thread = Thread {
        id: Uuid::new_v4(),
        title: input.title,
        sub_title: input.sub_title,
        banner_image: input.banner_image,
        description: input.description,
        price: input.price,
        owner_user_id: owner,
    };
    store.insert_thread(&thread).await?;
    info!(thread_id = %thread.id, owner = %owner, "thread created");
    Ok(thread.id)
}

pub async fn thread_by_id(store: &dyn IdentityStore, id: Uuid) -> Result<Thread, ThreadError> {
    store
        .find_thread_by_id(id)
        .await?
        .ok_or(ThreadError::NotFound)
}

/// Every stored thread; an empty board is a successful, empty result.
pub async fn all_threads(store: &dyn IdentityStore) -> Result<Vec<Thread>, ThreadError> {
    Ok(store.all_threads().await?)
}

pub async fn owner_threads(
    store: &dyn IdentityStore,
    owner: Uuid,
) -> Result<Vec<Thread>, ThreadError> {
    Ok(store.threads_by_owner(owner).await?)
}

/// Replaces a thread's content fields in place. Ownership does not move.
pub async fn update_thread(
    store: &dyn IdentityStore,
    id: Uuid,
    update: ThreadUpdate,
) -> Result<(), ThreadError> {
    if !store.update_thread(id, &update).await? {
        return Err(ThreadError::NotFound);
    }
    info!(thread_id = %id, "thread updated");
    Ok(())
}

pub async fn delete_thread(store: &dyn IdentityStore, id: Uuid) -> Result<(), ThreadError> {
    if !store.delete_thread(id).await? {
        return Err(ThreadError::NotFound);
    }
    info!(thread_id = %id, "thread deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;

    fn sample_thread(title: &str) -> NewThread {
        NewThread {
            title: title.into(),
            sub_title: "sub".into(),
            banner_image: "aGVsbG8=".into(),
            description: "a thread".into(),
            price: 9.5,
        }
    }

    #[tokio::test]
    async fn create_then_fetch_by_id() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        let id = create_thread(&store, owner, sample_thread("first"))
            .await
            .expect("create");

        let thread = thread_by_id(&store, id).await.expect("fetch");
        assert_eq!(thread.title, "first");
        assert_eq!(thread.owner_user_id, owner);
        assert_eq!(thread.price, 9.5);
    }

    #[tokio::test]
    async fn fetch_missing_thread_is_not_found() {
        let store = MemoryStore::new();
        let err = thread_by_id(&store, Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, ThreadError::NotFound));
    }

    #[tokio::test]
    async fn all_threads_empty_board_is_ok() {
        let store = MemoryStore::new();
        let threads = all_threads(&store).await.expect("list");
        assert!(threads.is_empty());
    }

    #[tokio::test]
    async fn owner_threads_filters_by_owner() {
        let store = MemoryStore::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        create_thread(&store, alice, sample_thread("a1")).await.unwrap();
        create_thread(&store, alice, sample_thread("a2")).await.unwrap();
        create_thread(&store, bob, sample_thread("b1")).await.unwrap();

        let for_alice = owner_threads(&store, alice).await.expect("list");
        assert_eq!(for_alice.len(), 2);
        assert!(for_alice.iter().all(|t| t.owner_user_id == alice));

        let for_nobody = owner_threads(&store, Uuid::new_v4()).await.expect("list");
        assert!(for_nobody.is_empty());
    }

    #[tokio::test]
    async fn update_replaces_content_but_not_owner() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        let id = create_thread(&store, owner, sample_thread("before"))
            .await
            .unwrap();

        update_thread(
            &store,
            id,
            ThreadUpdate {
                title: "after".into(),
                sub_title: "new sub".into(),
                banner_image: "bmV3".into(),
                description: "edited".into(),
                price: 1.0,
            },
        )
        .await
        .expect("update");

        let thread = thread_by_id(&store, id).await.expect("fetch");
        assert_eq!(thread.title, "after");
        assert_eq!(thread.price, 1.0);
        assert_eq!(thread.owner_user_id, owner);
    }

    #[tokio::test]
    async fn update_missing_thread_is_not_found() {
        let store = MemoryStore::new();
        let err = update_thread(
            &store,
            Uuid::new_v4(),
            ThreadUpdate {
                title: "t".into(),
                sub_title: "s".into(),
                banner_image: "b".into(),
                description: "d".into(),
                price: 0.0,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ThreadError::NotFound));
    }

    #[tokio::test]
    async fn delete_then_fetch_is_not_found() {
        let store = MemoryStore::new();
        let id = create_thread(&store, Uuid::new_v4(), sample_thread("gone"))
            .await
            .unwrap();
        delete_thread(&store, id).await.expect("delete");
        assert!(matches!(
            thread_by_id(&store, id).await.unwrap_err(),
            ThreadError::NotFound
        ));
        assert!(matches!(
            delete_thread(&store, id).await.unwrap_err(),
            ThreadError::NotFound
        ));
    }
}
