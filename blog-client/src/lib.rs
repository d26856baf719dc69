//! Клиентская библиотека для единственного эндпоинта blog-server.
//!
//! Эндпоинт выбирает операцию по HTTP-методу:
//! - `GET`: все посты, от новых к старым;
//! - `POST`: создание поста;
//! - `OPTIONS`: CORS preflight.
//!
//! Авторизации на стороне сервера нет, поэтому клиент не хранит токенов.
#![warn(missing_docs)]

mod error;
mod http_client;
mod models;

pub use error::{BlogClientError, BlogClientResult};
pub use models::{NewPost, Post};

use http_client::HttpClient;

/// Базовый URL по умолчанию для локально запущенного сервера.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";

#[derive(Debug, Clone)]
/// Клиент блог-сервиса поверх HTTP.
pub struct BlogClient {
    http_client: HttpClient,
}

impl BlogClient {
    /// Создаёт клиент для эндпоинта по адресу `base_url`,
    /// например `http://127.0.0.1:8080` или URL стадии API-шлюза.
    pub fn new(base_url: impl Into<String>) -> BlogClientResult<Self> {
        Ok(Self {
            http_client: HttpClient::new(base_url)?,
        })
    }

    /// Возвращает все посты; сервер не фильтрует и не пагинирует выборку.
    pub async fn list_posts(&self) -> BlogClientResult<Vec<Post>> {
        self.http_client.list_posts().await
    }

    /// Создаёт новый пост.
    ///
    /// Незаданные поля получают значения по умолчанию на сервере:
    /// `title` и `content` получают пустую строку, `author` получает `"Anonymous"`.
    pub async fn create_post(&self, post: &NewPost) -> BlogClientResult<Post> {
        self.http_client.create_post(post).await
    }

    /// Выполняет CORS preflight и возвращает подтверждение сервера (`"OK"`).
    pub async fn preflight(&self) -> BlogClientResult<String> {
        self.http_client.preflight().await
    }
}
