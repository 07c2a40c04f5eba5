//! API token gate.

mod token;

pub use token::{Access, ApiTokenGate, AuthError};

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::ApiError;
use crate::AppState;

/// Middleware that rejects requests whose token doesn't pass the gate.
///
/// Runs before the handler's extractors, so rejected requests never have
/// their body read and never reach Ollama.
pub async fn require_api_token(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    match state.gate.check(request.headers()) {
        Ok(_) => next.run(request).await,
        Err(e) => {
            tracing::info!(
                path = %request.uri().path(),
                status = %e.status().as_u16(),
                "Rejected request: {}",
                e
            );
            ApiError::from(e).into_response()
        }
    }
}
