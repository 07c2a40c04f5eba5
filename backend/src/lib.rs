pub mod auth;
pub mod config;
pub mod error;
pub mod llm;
pub mod logging;
pub mod routes;
pub mod test_util;

pub use auth::{Access, ApiTokenGate, AuthError};
pub use crate::config::Config;
pub use error::ApiError;
pub use llm::{OllamaClient, OllamaError};

use std::sync::Arc;

use axum::http::HeaderValue;
use axum::{middleware, Router};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared application state.
///
/// Immutable after startup; handlers only read it.
pub struct AppState {
    pub config: Config,
    /// Token gate built from `config.auth`.
    pub gate: ApiTokenGate,
    pub ollama_client: OllamaClient,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let gate = ApiTokenGate::new(config.auth.api_token());
        let ollama_client = OllamaClient::new(&config.ollama.base_url);
        Self {
            config,
            gate,
            ollama_client,
        }
    }
}

/// Build the full application: routes plus CORS, request logging and tracing layers.
pub fn app(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config);

    routes::router(state)
        .layer(middleware::from_fn(logging::request_logger))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(config: &Config) -> CorsLayer {
    let origin = if config.cors.allows_any() {
        AllowOrigin::any()
    } else {
        let origins = config
            .cors
            .origin_list()
            .into_iter()
            .filter_map(|o| match o.parse::<HeaderValue>() {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!("Ignoring invalid CORS origin: {}", o);
                    None
                }
            })
            .collect::<Vec<_>>();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any)
}
