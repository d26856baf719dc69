use gloo_net::http::Request;

use crate::models::{CreatePostRequest, CreatePostResponse, ListPostsResponse, Post};

const API_BASE_URL: &str = match option_env!("WASM_API_BASE_URL") {
    Some(value) => value,
    None => "http://127.0.0.1:8080",
};

/// Текст ошибки показывается пользователю как есть.
#[derive(Debug, Clone)]
pub(crate) enum ApiError {
    Network(String),
    Decode(String),
    Rejected(String),
}

impl core::fmt::Display for ApiError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Network(msg) | Self::Decode(msg) | Self::Rejected(msg) => f.write_str(msg),
        }
    }
}

fn endpoint() -> &'static str {
    API_BASE_URL.trim_end_matches('/')
}

pub(crate) async fn list_posts() -> Result<Vec<Post>, ApiError> {
    let response = Request::get(endpoint())
        .send()
        .await
        .map_err(|err| ApiError::Network(err.to_string()))?;

    let body: ListPostsResponse = response
        .json()
        .await
        .map_err(|err| ApiError::Decode(err.to_string()))?;

    Ok(body.posts)
}

pub(crate) async fn create_post(payload: &CreatePostRequest) -> Result<Post, ApiError> {
    let response = Request::post(endpoint())
        .json(payload)
        .map_err(|err| ApiError::Network(err.to_string()))?
        .send()
        .await
        .map_err(|err| ApiError::Network(err.to_string()))?;

    let status = response.status();
    let body: CreatePostResponse = response
        .json()
        .await
        .map_err(|err| ApiError::Decode(err.to_string()))?;

    body.into_result(status).map_err(ApiError::Rejected)
}
