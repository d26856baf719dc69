use async_trait::async_trait;

use crate::domain::error::StoreError;
use crate::domain::post::Post;

/// Единственная таблица постов: запись по ключу и полное чтение.
#[async_trait]
pub(crate) trait PostStore: Send + Sync {
    /// Записывает документ; существующий документ с тем же `PostID` заменяется.
    async fn put(&self, item: &Post) -> Result<(), StoreError>;

    /// Возвращает всё содержимое таблицы без фильтрации и пагинации.
    async fn scan_all(&self) -> Result<Vec<Post>, StoreError>;
}
