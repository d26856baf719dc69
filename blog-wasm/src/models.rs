use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Post {
    #[serde(rename = "PostID")]
    pub post_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub author: String,
    #[serde(rename = "dateCreated", default)]
    pub date_created: String,
    #[serde(default)]
    pub comments: Vec<Value>,
}

/// Ответ на GET. При `success=false` поля `posts` нет, и список считается пустым.
#[derive(Debug, Clone, Deserialize)]
pub struct ListPostsResponse {
    #[serde(default)]
    pub posts: Vec<Post>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePostResponse {
    #[serde(default)]
    pub success: bool,
    pub post: Option<Post>,
    pub error: Option<String>,
}

impl CreatePostResponse {
    /// Пост возвращается только при 2xx и `success=true`; иначе текст ошибки сервера.
    pub fn into_result(self, status: u16) -> Result<Post, String> {
        let accepted = (200..300).contains(&status) && self.success;
        match (accepted, self.post) {
            (true, Some(post)) => Ok(post),
            _ => Err(self
                .error
                .unwrap_or_else(|| format!("HTTP ошибка {status}"))),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    pub author: String,
}

/// Новый пост встаёт в начало уже показанного списка.
pub fn prepend_created(posts: &mut Vec<Post>, created: Post) {
    posts.retain(|post| post.post_id != created.post_id);
    posts.insert(0, created);
}

/// Посты, созданные до окончания загрузки, остаются сверху загруженного списка.
pub fn merge_loaded(current: Vec<Post>, loaded: Vec<Post>) -> Vec<Post> {
    let mut merged: Vec<Post> = current
        .into_iter()
        .filter(|post| !loaded.iter().any(|other| other.post_id == post.post_id))
        .collect();
    merged.extend(loaded);
    merged
}
