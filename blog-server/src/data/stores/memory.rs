use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::warn;

use crate::data::post_store::PostStore;
use crate::domain::error::StoreError;
use crate::domain::post::Post;

/// Таблица в памяти процесса: порядок сканирования совпадает с порядком вставки.
///
/// Данные пропадают при перезапуске, подходит для локального запуска и тестов.
#[derive(Debug, Default)]
pub(crate) struct InMemoryPostStore {
    items: RwLock<Vec<Post>>,
}

impl InMemoryPostStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostStore for InMemoryPostStore {
    async fn put(&self, item: &Post) -> Result<(), StoreError> {
        let mut items = self.items.write().await;
        if upsert(&mut items, item) {
            warn!(post_id = %item.post_id, "put replaced an existing post");
        }
        Ok(())
    }

    async fn scan_all(&self) -> Result<Vec<Post>, StoreError> {
        Ok(self.items.read().await.clone())
    }
}

/// `true`, если пост с таким `PostID` уже был и заменён.
fn upsert(items: &mut Vec<Post>, item: &Post) -> bool {
    match items.iter_mut().find(|existing| existing.post_id == item.post_id) {
        Some(existing) => {
            *existing = item.clone();
            true
        }
        None => {
            items.push(item.clone());
            false
        }
    }
}
