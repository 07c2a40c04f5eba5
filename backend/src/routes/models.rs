//! Model listing and model pull passthroughs.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use uiollama_common::{ModelsResponse, PullRequest, PullResponse};

use crate::error::{ApiError, Result};
use crate::AppState;

const LIST_FAILED: &str = "Error al obtener la lista de modelos";
const PULL_FAILED: &str = "Error al descargar el modelo";
const MODEL_REQUIRED: &str = "El nombre del modelo es requerido";

/// Build the models router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/models", get(list_models))
        .route("/models/pull", post(pull_model))
}

/// GET /api/models - List the models installed on the Ollama server.
async fn list_models(State(state): State<Arc<AppState>>) -> Result<Json<ModelsResponse>> {
    let models = state
        .ollama_client
        .list_models()
        .await
        .map_err(ApiError::upstream(LIST_FAILED))?;

    Ok(Json(ModelsResponse { models }))
}

/// POST /api/models/pull - Download a model, blocking until Ollama is done.
async fn pull_model(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<PullRequest>, JsonRejection>,
) -> Result<Json<PullResponse>> {
    let Json(request) = payload?;

    let name = request
        .model_name()
        .ok_or(ApiError::BadRequest(MODEL_REQUIRED))?;

    let status = state
        .ollama_client
        .pull(name)
        .await
        .map_err(ApiError::upstream(PULL_FAILED))?;

    Ok(Json(PullResponse {
        success: true,
        status,
    }))
}
