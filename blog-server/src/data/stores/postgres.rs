use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::types::Json;
use tracing::warn;

use crate::data::post_store::PostStore;
use crate::domain::error::StoreError;
use crate::domain::post::Post;

/// Таблица `blog_posts`: один JSONB-документ на `PostID`.
#[derive(Debug, Clone)]
pub(crate) struct PostgresPostStore {
    pool: PgPool,
}

impl PostgresPostStore {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Вставляет или заменяет документ. `true`, если строка с таким `PostID` уже была.
    async fn upsert(&self, item: &Post) -> Result<bool, StoreError> {
        sqlx::query_scalar::<_, bool>(
            r#"
            INSERT INTO blog_posts (post_id, item)
            VALUES ($1, $2)
            ON CONFLICT (post_id) DO UPDATE
            SET item = EXCLUDED.item
            RETURNING xmax::text <> '0'
            "#,
        )
        .bind(item.post_id.as_str())
        .bind(Json(item))
        .fetch_one(&self.pool)
        .await
        .map_err(map_store_error)
    }
}

#[async_trait]
impl PostStore for PostgresPostStore {
    async fn put(&self, item: &Post) -> Result<(), StoreError> {
        if self.upsert(item).await? {
            warn!(post_id = %item.post_id, "put replaced an existing post");
        }
        Ok(())
    }

    async fn scan_all(&self) -> Result<Vec<Post>, StoreError> {
        let rows = sqlx::query_scalar::<_, Json<Post>>(
            r#"
            SELECT item
            FROM blog_posts
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_store_error)?;

        Ok(rows.into_iter().map(|Json(post)| post).collect())
    }
}

fn map_store_error(err: sqlx::Error) -> StoreError {
    StoreError::new(err.to_string())
}
