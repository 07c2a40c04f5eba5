pub mod mock_ollama;

use std::sync::Arc;

use crate::config::{AuthConfig, Config, CorsConfig, LoggingConfig, OllamaConfig};
use crate::AppState;

/// Configuration pointing at `ollama_url`, gated by `api_token` when given.
pub fn test_config(ollama_url: &str, api_token: Option<&str>) -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 3000,
        ollama: OllamaConfig {
            base_url: ollama_url.trim_end_matches('/').to_string(),
            default_model: "llama2".to_string(),
        },
        auth: AuthConfig {
            api_token: api_token.map(String::from),
        },
        logging: LoggingConfig {
            level: "debug".to_string(),
        },
        cors: CorsConfig {
            origins: "*".to_string(),
        },
    }
}

pub fn create_test_state(ollama_url: &str, api_token: Option<&str>) -> Arc<AppState> {
    Arc::new(AppState::new(test_config(ollama_url, api_token)))
}
