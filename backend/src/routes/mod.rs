//! HTTP routes.
//!
//! - `/`, `/api-docs`: embedded browser UI and API reference
//! - `/health`: liveness, never gated
//! - `/api/*`: the Ollama passthroughs, behind the API token gate

pub mod chat;
pub mod health;
pub mod models;
pub mod ui;

use std::sync::Arc;

use axum::{middleware, Router};

use crate::auth::require_api_token;
use crate::AppState;

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        .merge(chat::router())
        .merge(models::router())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_api_token));

    Router::new()
        .merge(ui::router())
        .merge(health::router())
        .nest("/api", api_routes)
        .with_state(state)
}
