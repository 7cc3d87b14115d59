use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{IdentityStore, Thread, ThreadUpdate, User};

#[derive(Clone)]
pub struct PgIdentityStore {
    pool: PgPool,
}

impl PgIdentityStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IdentityStore for PgIdentityStore {
    async fn find_user_by_username(&self, username: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, display_name, first_name, last_name,
                   password_hash, gdpr_accepted, is_admin
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn find_user_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, display_name, first_name, last_name,
                   password_hash, gdpr_accepted, is_admin
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn insert_user(&self, user: &User) -> anyhow::Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (id, username, display_name, first_name, last_name,
                               password_hash, gdpr_accepted, is_admin)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.display_name)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.password_hash)
        .bind(user.gdpr_accepted)
        .bind(user.is_admin)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(true),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn insert_thread(&self, thread: &Thread) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO threads (id, title, sub_title, banner_image, description,
                                 price, owner_user_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(thread.id)
        .bind(&thread.title)
        .bind(&thread.sub_title)
        .bind(&thread.banner_image)
        .bind(&thread.description)
        .bind(thread.price)
        .bind(thread.owner_user_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_thread_by_id(&self, id: Uuid) -> anyhow::Result<Option<Thread>> {
        let thread = sqlx::query_as::<_, Thread>(
            r#"
            SELECT id, title, sub_title, banner_image, description, price, owner_user_id
            FROM threads
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(thread)
    }

    async fn all_threads(&self) -> anyhow::Result<Vec<Thread>> {
        let threads = sqlx::query_as::<_, Thread>(
            r#"
            SELECT id, title, sub_title, banner_image, description, price, owner_user_id
            FROM threads
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(threads)
    }

    async fn threads_by_owner(&self, owner: Uuid) -> anyhow::Result<Vec<Thread>> {
        let threads = sqlx::query_as::<_, Thread>(
            r#"
            SELECT id, title, sub_title, banner_image, description, price, owner_user_id
            FROM threads
            WHERE owner_user_id = $1
            "#,
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;
        Ok(threads)
    }

    async fn update_thread(&self, id: Uuid, update: &ThreadUpdate) -> anyhow::Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE threads
            SET title = $2, sub_title = $3, banner_image = $4, description = $5, price = $6
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&update.title)
        .bind(&update.sub_title)
        .bind(&update.banner_image)
        .bind(&update.description)
        .bind(update.price)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_thread(&self, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query(r#"DELETE FROM threads WHERE id = $1"#)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
