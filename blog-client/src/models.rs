use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Публичная модель поста.
pub struct Post {
    /// Идентификатор поста (миллисекунды момента создания в виде строки).
    #[serde(rename = "PostID")]
    pub post_id: String,
    /// Заголовок поста.
    pub title: String,
    /// Содержимое поста.
    pub content: String,
    /// Имя автора; `"Anonymous"`, если при создании не указано.
    pub author: String,
    /// Дата и время создания поста (UTC), проставляется сервером.
    #[serde(rename = "dateCreated")]
    pub date_created: DateTime<Utc>,
    /// Комментарии в исходном JSON-виде.
    #[serde(default)]
    pub comments: Vec<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
/// Данные для создания поста. Незаданные поля не отправляются,
/// и сервер подставляет значения по умолчанию.
pub struct NewPost {
    /// Заголовок.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Содержимое.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Автор.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

impl NewPost {
    /// Пустой запрос: все поля получат значения по умолчанию на сервере.
    pub fn new() -> Self {
        Self::default()
    }

    /// Задаёт заголовок.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Задаёт содержимое.
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Задаёт автора.
    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }
}
