use axum::{
    Json,
    body::Bytes,
    extract::{State, rejection::BytesRejection},
    http::{Method, StatusCode},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;
use utoipa::ToSchema;

use crate::domain::error::DomainError;
use crate::domain::post::{NewPost, Post};
use crate::presentation::AppState;
use crate::presentation::http::app_error::{AppResult, FailureResponseDto};

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct CreatePostDto {
    #[serde(default)]
    pub(crate) title: Option<String>,
    #[serde(default)]
    pub(crate) content: Option<String>,
    #[serde(default)]
    pub(crate) author: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PostDto {
    #[serde(rename = "PostID")]
    pub(crate) post_id: String,
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) author: String,
    #[serde(rename = "dateCreated")]
    pub(crate) date_created: String,
    #[schema(value_type = Vec<Object>)]
    pub(crate) comments: Vec<Value>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct CreatedPostResponseDto {
    pub(crate) success: bool,
    pub(crate) post: PostDto,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct ListPostsResponseDto {
    pub(crate) success: bool,
    pub(crate) posts: Vec<PostDto>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PreflightResponseDto {
    pub(crate) message: String,
}

impl From<Post> for PostDto {
    fn from(post: Post) -> Self {
        let date_created = post.date_created_iso();
        Self {
            post_id: post.post_id.to_string(),
            title: post.title,
            content: post.content,
            author: post.author,
            date_created,
            comments: post.comments.into_iter().map(|c| c.into_value()).collect(),
        }
    }
}

impl From<CreatePostDto> for NewPost {
    fn from(dto: CreatePostDto) -> Self {
        Self {
            title: dto.title,
            content: dto.content,
            author: dto.author,
        }
    }
}

fn parse_create_body(body: &[u8]) -> Result<CreatePostDto, DomainError> {
    let value: Value =
        serde_json::from_slice(body).map_err(|err| DomainError::ClientInput(err.to_string()))?;

    if !value.is_object() {
        return Err(DomainError::ClientInput(
            "request body must be a JSON object".to_string(),
        ));
    }

    serde_json::from_value(value).map_err(|err| DomainError::ClientInput(err.to_string()))
}

#[utoipa::path(
    options,
    path = "/",
    tag = "posts",
    responses(
        (status = 200, description = "CORS preflight acknowledged", body = PreflightResponseDto)
    )
)]
pub(crate) async fn preflight() -> (StatusCode, Json<PreflightResponseDto>) {
    (
        StatusCode::OK,
        Json(PreflightResponseDto {
            message: "OK".to_string(),
        }),
    )
}

#[utoipa::path(
    post,
    path = "/",
    tag = "posts",
    request_body = CreatePostDto,
    responses(
        (status = 201, description = "Post created", body = CreatedPostResponseDto),
        (status = 500, description = "Malformed body or store failure", body = FailureResponseDto)
    )
)]
pub(crate) async fn create_post(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> AppResult<(StatusCode, Json<CreatedPostResponseDto>)> {
    // Слишком большое или оборванное тело отдаётся тем же JSON-конвертом, что и битый JSON.
    let body = body.map_err(|rejection| DomainError::ClientInput(rejection.body_text()))?;
    info!(method = "POST", body_len = body.len(), "create post request");
    let dto = parse_create_body(&body)?;

    let post = state.blog_service.create_post(dto.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedPostResponseDto {
            success: true,
            post: PostDto::from(post),
        }),
    ))
}

/// Также отвечает на любой метод, кроме POST и OPTIONS.
#[utoipa::path(
    get,
    path = "/",
    tag = "posts",
    responses(
        (status = 200, description = "All posts, newest first", body = ListPostsResponseDto),
        (status = 500, description = "Store failure", body = FailureResponseDto)
    )
)]
pub(crate) async fn list_posts(
    method: Method,
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<ListPostsResponseDto>)> {
    info!(%method, "list posts request");
    let posts = state.blog_service.list_posts().await?;

    Ok((
        StatusCode::OK,
        Json(ListPostsResponseDto {
            success: true,
            posts: posts.into_iter().map(PostDto::from).collect(),
        }),
    ))
}

#[cfg(test)]
mod tests {
    use super::parse_create_body;
    use crate::domain::error::DomainError;

    #[test]
    fn parse_accepts_partial_object() {
        let dto = parse_create_body(br#"{"title":"Spam Musubi","extra":1}"#)
            .expect("partial body must parse");

        assert_eq!(dto.title.as_deref(), Some("Spam Musubi"));
        assert!(dto.content.is_none());
        assert!(dto.author.is_none());
    }

    #[test]
    fn parse_treats_null_fields_as_missing() {
        let dto = parse_create_body(br#"{"author":null}"#).expect("null field must parse");
        assert!(dto.author.is_none());
    }

    #[test]
    fn parse_rejects_malformed_json() {
        let err = parse_create_body(b"{not json").expect_err("malformed body must fail");
        assert!(matches!(err, DomainError::ClientInput(ref message) if !message.is_empty()));
    }

    #[test]
    fn parse_rejects_empty_body() {
        assert!(matches!(
            parse_create_body(b""),
            Err(DomainError::ClientInput(_))
        ));
    }

    #[test]
    fn parse_rejects_non_object_json() {
        let bodies: [&[u8]; 4] = [b"null", b"[]", b"\"text\"", b"42"];
        for body in bodies {
            assert!(
                matches!(parse_create_body(body), Err(DomainError::ClientInput(_))),
                "body {:?} must be rejected",
                String::from_utf8_lossy(body)
            );
        }
    }

    #[test]
    fn parse_rejects_non_string_field() {
        assert!(matches!(
            parse_create_body(br#"{"title":5}"#),
            Err(DomainError::ClientInput(_))
        ));
    }
}
