use axum::Router;
use tokio::net::TcpListener;
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::infrastructure::settings::Settings;
use crate::presentation::AppState;
use crate::presentation::http::middleware::cors::apply_cors;
use crate::presentation::http::middleware::limit::apply_body_limit;
use crate::presentation::http::middleware::trace::apply_trace;
use crate::presentation::http::openapi::ApiDoc;
use crate::presentation::http::routes;

pub(crate) async fn run_http(settings: &Settings, state: AppState) -> anyhow::Result<()> {
    let app = build_router(state, settings);

    let listener = TcpListener::bind(&settings.http_addr).await?;

    info!("HTTP server listening on {}", settings.http_addr);
    axum::serve(listener, app).await?;
    Ok(())
}

pub(crate) fn build_router(state: AppState, settings: &Settings) -> Router {
    let app = routes::routes(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));
    let app = apply_body_limit(app, settings.http_request_body_limit_bytes);
    let app = apply_trace(app);
    apply_cors(app)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Method, Request, StatusCode, header};
    use axum::response::Response;
    use chrono::{Duration, Utc};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::build_router;
    use crate::application::blog_service::BlogService;
    use crate::data::post_store::PostStore;
    use crate::data::stores::memory::InMemoryPostStore;
    use crate::domain::error::StoreError;
    use crate::domain::post::{NewPost, Post, PostId};
    use crate::infrastructure::settings::{LogFormat, Settings, StoreBackend};
    use crate::presentation::AppState;

    struct FailingStore;

    #[async_trait]
    impl PostStore for FailingStore {
        async fn put(&self, _item: &Post) -> Result<(), StoreError> {
            Err(StoreError::new("Requested resource not found"))
        }

        async fn scan_all(&self) -> Result<Vec<Post>, StoreError> {
            Err(StoreError::new("Requested resource not found"))
        }
    }

    fn test_settings() -> Settings {
        Settings {
            http_addr: "127.0.0.1:0".to_string(),
            store: StoreBackend::Memory,
            log_level: "info".to_string(),
            log_format: LogFormat::Compact,
            http_request_body_limit_bytes: 64 * 1024,
        }
    }

    fn app_with(store: Arc<dyn PostStore>) -> Router {
        let state = AppState::new(Arc::new(BlogService::new(store)));
        build_router(state, &test_settings())
    }

    async fn send(app: &Router, method: Method, body: &str) -> (StatusCode, Response<Body>) {
        let request = Request::builder()
            .method(method)
            .uri("/")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request must build");
        let response = app.clone().oneshot(request).await.expect("router is infallible");
        (response.status(), response)
    }

    async fn json_body(response: Response<Body>) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body must be readable");
        serde_json::from_slice(&bytes).expect("body must be json")
    }

    fn assert_cors_headers(response: &Response<Body>) {
        let headers = response.headers();
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "GET,POST,OPTIONS");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], "Content-Type");
    }

    #[tokio::test]
    async fn options_acknowledges_preflight_even_when_store_is_down() {
        let app = app_with(Arc::new(FailingStore));

        let (status, response) = send(&app, Method::OPTIONS, "{broken").await;

        assert_eq!(status, StatusCode::OK);
        assert_cors_headers(&response);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
        assert_eq!(json_body(response).await, json!({"message": "OK"}));
    }

    #[tokio::test]
    async fn post_returns_created_post_with_supplied_fields() {
        let app = app_with(Arc::new(InMemoryPostStore::new()));

        let (status, response) = send(
            &app,
            Method::POST,
            r#"{"title":"Mango Rice","content":"Delicious","author":"Lani"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_cors_headers(&response);
        let body = json_body(response).await;
        assert_eq!(body["success"], true);
        let post = &body["post"];
        assert_eq!(post["title"], "Mango Rice");
        assert_eq!(post["content"], "Delicious");
        assert_eq!(post["author"], "Lani");
        assert_eq!(post["comments"], json!([]));
        assert!(!post["PostID"].as_str().expect("PostID must be a string").is_empty());
        let created = post["dateCreated"].as_str().expect("dateCreated must be a string");
        assert!(chrono::DateTime::parse_from_rfc3339(created).is_ok());
    }

    #[tokio::test]
    async fn post_with_empty_object_applies_defaults() {
        let app = app_with(Arc::new(InMemoryPostStore::new()));

        let (status, response) = send(&app, Method::POST, "{}").await;

        assert_eq!(status, StatusCode::CREATED);
        let post = json_body(response).await["post"].clone();
        assert_eq!(post["title"], "");
        assert_eq!(post["content"], "");
        assert_eq!(post["author"], "Anonymous");
    }

    #[tokio::test]
    async fn post_ignores_client_supplied_date_and_id() {
        let app = app_with(Arc::new(InMemoryPostStore::new()));

        let (_, response) = send(
            &app,
            Method::POST,
            r#"{"PostID":"1","dateCreated":"1999-01-01T00:00:00.000Z"}"#,
        )
        .await;

        let post = json_body(response).await["post"].clone();
        assert_ne!(post["PostID"], "1");
        assert_ne!(post["dateCreated"], "1999-01-01T00:00:00.000Z");
    }

    #[tokio::test]
    async fn malformed_body_returns_500_and_leaves_store_untouched() {
        let store = Arc::new(InMemoryPostStore::new());
        let app = app_with(store.clone());

        let (status, response) = send(&app, Method::POST, "{\"title\": ").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_cors_headers(&response);
        let body = json_body(response).await;
        assert_eq!(body["success"], false);
        assert!(!body["error"].as_str().expect("error must be a string").is_empty());
        assert!(store.scan_all().await.expect("scan must succeed").is_empty());
    }

    #[tokio::test]
    async fn oversized_body_returns_json_500_and_leaves_store_untouched() {
        let store = Arc::new(InMemoryPostStore::new());
        let app = app_with(store.clone());
        let body = json!({"title": "x".repeat(70 * 1024)}).to_string();
        assert!(body.len() > test_settings().http_request_body_limit_bytes);

        for with_length in [false, true] {
            let mut request = Request::builder()
                .method(Method::POST)
                .uri("/")
                .header(header::CONTENT_TYPE, "application/json");
            if with_length {
                request = request.header(header::CONTENT_LENGTH, body.len());
            }
            let request = request
                .body(Body::from(body.clone()))
                .expect("request must build");

            let response = app.clone().oneshot(request).await.expect("router is infallible");

            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
            assert_cors_headers(&response);
            assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
            let body = json_body(response).await;
            assert_eq!(body["success"], false);
            assert!(!body["error"].as_str().expect("error must be a string").is_empty());
        }
        assert!(store.scan_all().await.expect("scan must succeed").is_empty());
    }

    #[tokio::test]
    async fn get_after_posts_returns_exactly_those_posts_newest_first() {
        let app = app_with(Arc::new(InMemoryPostStore::new()));

        let mut created = Vec::new();
        for title in ["Loco Moco", "Poi", "Haupia"] {
            let (_, response) = send(&app, Method::POST, &json!({"title": title}).to_string()).await;
            created.push(json_body(response).await["post"].clone());
        }

        let (status, response) = send(&app, Method::GET, "").await;

        assert_eq!(status, StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["success"], true);
        let posts = body["posts"].as_array().expect("posts must be an array").clone();
        created.reverse();
        assert_eq!(posts, created);
    }

    #[tokio::test]
    async fn get_orders_by_date_created_descending() {
        let store = Arc::new(InMemoryPostStore::new());
        let t2 = Utc::now();
        let t1 = t2 - Duration::hours(1);
        let older = Post::create(NewPost::default(), PostId::from_millis(100), t1);
        let newer = Post::create(NewPost::default(), PostId::from_millis(50), t2);
        store.put(&older).await.expect("put must succeed");
        store.put(&newer).await.expect("put must succeed");
        let app = app_with(store);

        let (_, response) = send(&app, Method::GET, "").await;

        let body = json_body(response).await;
        let ids: Vec<&str> = body["posts"]
            .as_array()
            .expect("posts must be an array")
            .iter()
            .map(|post| post["PostID"].as_str().expect("PostID must be a string"))
            .collect();
        assert_eq!(ids, vec!["50", "100"]);
    }

    #[tokio::test]
    async fn other_methods_are_treated_as_list() {
        let app = app_with(Arc::new(InMemoryPostStore::new()));

        let (status, response) = send(&app, Method::DELETE, "").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json_body(response).await, json!({"success": true, "posts": []}));
    }

    #[tokio::test]
    async fn store_failure_is_reported_as_500_with_message() {
        let app = app_with(Arc::new(FailingStore));

        for (method, body) in [(Method::GET, ""), (Method::POST, "{}")] {
            let (status, response) = send(&app, method, body).await;

            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_cors_headers(&response);
            assert_eq!(
                json_body(response).await,
                json!({"success": false, "error": "Requested resource not found"})
            );
        }
    }

    #[tokio::test]
    async fn healthz_also_carries_cors_headers() {
        let app = app_with(Arc::new(InMemoryPostStore::new()));
        let request = Request::builder()
            .uri("/healthz")
            .body(Body::empty())
            .expect("request must build");

        let response = app.oneshot(request).await.expect("router is infallible");

        assert_eq!(response.status(), StatusCode::OK);
        assert_cors_headers(&response);
    }
}
