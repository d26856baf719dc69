use utoipa::OpenApi;

use crate::presentation::http::app_error::FailureResponseDto;
use crate::presentation::http::handlers::posts::{
    CreatePostDto, CreatedPostResponseDto, ListPostsResponseDto, PostDto, PreflightResponseDto,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::http::handlers::posts::list_posts,
        crate::presentation::http::handlers::posts::create_post,
        crate::presentation::http::handlers::posts::preflight
    ),
    components(
        schemas(
            CreatePostDto,
            PostDto,
            CreatedPostResponseDto,
            ListPostsResponseDto,
            PreflightResponseDto,
            FailureResponseDto
        )
    ),
    tags(
        (name = "posts", description = "Single method-dispatched posts endpoint")
    )
)]
pub(crate) struct ApiDoc;
