use axum::Router;
use axum::http::{HeaderValue, header};
use tower_http::set_header::SetResponseHeaderLayer;

pub(crate) const ALLOW_ORIGIN: &str = "*";
pub(crate) const ALLOW_METHODS: &str = "GET,POST,OPTIONS";
pub(crate) const ALLOW_HEADERS: &str = "Content-Type";

/// Один и тот же набор CORS-заголовков на каждом ответе, включая ошибки и 404.
pub(crate) fn apply_cors(router: Router) -> Router {
    router
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static(ALLOW_ORIGIN),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOW_METHODS),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOW_HEADERS),
        ))
}
