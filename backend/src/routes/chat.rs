//! Chat passthrough.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use uiollama_common::{ChatReply, ChatRequest};

use crate::error::{ApiError, Result};
use crate::AppState;

const CHAT_FAILED: &str =
    "Error al procesar la solicitud. Asegúrate de que Ollama está ejecutándose.";

/// Build the chat router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/chat", post(chat))
}

/// POST /api/chat - Forward the conversation and return the assistant's reply.
async fn chat(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatReply>> {
    let Json(request) = payload?;

    let model = request.model_or(&state.config.ollama.default_model);

    let message = state
        .ollama_client
        .chat(&request.messages, model)
        .await
        .map_err(ApiError::upstream(CHAT_FAILED))?;

    Ok(Json(ChatReply { message }))
}
