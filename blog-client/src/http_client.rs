use reqwest::{Client, Method, Response};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::time::Duration;

use crate::error::{BlogClientError, BlogClientResult};
use crate::models::{NewPost, Post};

#[derive(Debug, Deserialize)]
struct ErrorResponseDto {
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CreatedPostResponseDto {
    success: bool,
    post: Post,
}

#[derive(Debug, Deserialize)]
struct ListPostsResponseDto {
    success: bool,
    #[serde(default)]
    posts: Vec<Post>,
}

#[derive(Debug, Deserialize)]
struct PreflightResponseDto {
    message: String,
}

#[derive(Debug, Clone)]
/// HTTP-клиент для единственного эндпоинта `blog-server`.
pub struct HttpClient {
    base_url: String,
    client: Client,
}

impl HttpClient {
    /// Создаёт новый HTTP-клиент с базовым URL сервера.
    pub fn new(base_url: impl Into<String>) -> BlogClientResult<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(15))
            .build()?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    fn endpoint(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    async fn decode_error(response: Response) -> BlogClientError {
        let status = response.status();

        let message = match response.json::<ErrorResponseDto>().await {
            Ok(body) => body.error,
            Err(_) => None,
        };
        BlogClientError::from_http_status(status, message)
    }

    /// универсальный helper: отправить запрос и разобрать JSON-ответ
    async fn send<TRes>(&self, method: Method, body: Option<&impl Serialize>) -> BlogClientResult<TRes>
    where
        TRes: DeserializeOwned,
    {
        let mut request = self.client.request(method, self.endpoint());
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(Self::decode_error(response).await);
        }

        let bytes = response.bytes().await?;
        decode_body(&bytes)
    }

    /// Возвращает все посты, отсортированные сервером от новых к старым.
    pub async fn list_posts(&self) -> BlogClientResult<Vec<Post>> {
        let dto: ListPostsResponseDto = self.send(Method::GET, None::<&()>).await?;
        if !dto.success {
            return Err(BlogClientError::Decode(
                "server reported success=false without an error".to_string(),
            ));
        }
        Ok(dto.posts)
    }

    /// Создаёт пост; `PostID` и `dateCreated` проставляет сервер.
    pub async fn create_post(&self, post: &NewPost) -> BlogClientResult<Post> {
        let dto: CreatedPostResponseDto = self.send(Method::POST, Some(post)).await?;
        if !dto.success {
            return Err(BlogClientError::Decode(
                "server reported success=false without an error".to_string(),
            ));
        }
        Ok(dto.post)
    }

    /// Отправляет CORS preflight (`OPTIONS`) и возвращает поле `message`.
    pub async fn preflight(&self) -> BlogClientResult<String> {
        let dto: PreflightResponseDto = self.send(Method::OPTIONS, None::<&()>).await?;
        Ok(dto.message)
    }
}

fn decode_body<T: DeserializeOwned>(bytes: &[u8]) -> BlogClientResult<T> {
    serde_json::from_slice(bytes).map_err(|err| BlogClientError::Decode(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_trims_trailing_slashes() {
        let client = HttpClient::new("http://localhost:8080///").expect("client must build");
        assert_eq!(client.endpoint(), "http://localhost:8080");
    }

    #[test]
    fn endpoint_keeps_stage_path() {
        let client =
            HttpClient::new("https://api.example.com/prod/posts").expect("client must build");
        assert_eq!(client.endpoint(), "https://api.example.com/prod/posts");
    }

    #[test]
    fn list_response_decodes_posts() {
        let raw = br#"{"success":true,"posts":[{"PostID":"2","title":"b","content":"","author":"Anonymous","dateCreated":"2024-01-02T00:00:00.000Z","comments":[]},{"PostID":"1","title":"a","content":"","author":"Lani","dateCreated":"2024-01-01T00:00:00.000Z","comments":[]}]}"#;

        let dto: ListPostsResponseDto = decode_body(raw).expect("list must decode");

        assert!(dto.success);
        let ids: Vec<&str> = dto.posts.iter().map(|post| post.post_id.as_str()).collect();
        assert_eq!(ids, vec!["2", "1"]);
    }

    #[test]
    fn malformed_body_is_a_decode_error() {
        let result = decode_body::<PreflightResponseDto>(b"<html>");
        assert!(matches!(result, Err(BlogClientError::Decode(_))));
    }
}
