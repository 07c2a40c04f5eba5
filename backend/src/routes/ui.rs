//! Embedded browser front end.

use std::sync::Arc;

use axum::http::header::{CACHE_CONTROL, CONTENT_SECURITY_POLICY};
use axum::response::{Html, IntoResponse};
use axum::routing::get;
use axum::Router;

use crate::AppState;

const CHAT_HTML: &str = include_str!("../../web/index.html");
const API_DOCS_HTML: &str = include_str!("../../web/api-docs.html");

const CSP: &str = "default-src 'self'; style-src 'self' 'unsafe-inline'; \
    script-src 'self' 'unsafe-inline'; connect-src 'self'; img-src 'self' data:; \
    object-src 'none'; base-uri 'none'";

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(chat_ui))
        .route("/api-docs", get(api_docs))
}

/// GET / - The conversation view.
async fn chat_ui() -> impl IntoResponse {
    (
        [(CONTENT_SECURITY_POLICY, CSP), (CACHE_CONTROL, "no-cache")],
        Html(CHAT_HTML),
    )
}

/// GET /api-docs - Human readable API reference.
async fn api_docs() -> impl IntoResponse {
    ([(CONTENT_SECURITY_POLICY, CSP)], Html(API_DOCS_HTML))
}
