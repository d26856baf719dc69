use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::presentation::AppState;
use crate::presentation::http::handlers::posts::{create_post, list_posts, preflight};

pub(crate) fn routes(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health_handler))
        .route(
            "/",
            get(list_posts)
                .post(create_post)
                .options(preflight)
                .fallback(list_posts),
        )
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct HealthzResponse {
    status: &'static str,
}

async fn health_handler() -> Json<HealthzResponse> {
    Json(HealthzResponse { status: "ok" })
}
