use std::sync::Arc;

use tokio::net::TcpListener;

use uiollama_backend::{app, logging, AppState, Config};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::load()?;

    logging::init(&config.logging.level);

    tracing::info!("Starting UIOLLAMA {}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Forwarding to Ollama at {}", config.ollama.base_url);

    let state = Arc::new(AppState::new(config.clone()));
    if !state.gate.is_protected() {
        tracing::warn!("API_TOKEN is not configured. The API is unprotected.");
    }

    let app = app(state);

    // Start server
    let addr = config.listen_addr();
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
