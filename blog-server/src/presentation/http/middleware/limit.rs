use axum::Router;
use axum::extract::DefaultBodyLimit;

/// Превышение лимита обработчик получает как `BytesRejection`.
pub(crate) fn apply_body_limit(router: Router, limit_bytes: usize) -> Router {
    router.layer(DefaultBodyLimit::max(limit_bytes))
}
