//! Error types for the proxy API.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use uiollama_common::ErrorBody;

use crate::auth::AuthError;
use crate::llm::OllamaError;

/// Errors returned by the API handlers.
///
/// Every variant renders as an [`ErrorBody`] JSON envelope.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("No autorizado: {0}")]
    Unauthorized(#[from] AuthError),

    #[error("{0}")]
    BadRequest(&'static str),

    #[error("Cuerpo de la petición inválido: {0}")]
    InvalidBody(String),

    /// Ollama failed; `context` is the user-facing summary, the source the detail.
    #[error("{context}: {source}")]
    Upstream {
        context: &'static str,
        #[source]
        source: OllamaError,
    },
}

impl ApiError {
    pub fn upstream(context: &'static str) -> impl FnOnce(OllamaError) -> ApiError {
        move |source| ApiError::Upstream { context, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized(e) => e.status(),
            ApiError::BadRequest(_) | ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ApiError::Upstream { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match self {
            ApiError::Unauthorized(e) => ErrorBody::new("No autorizado").with_message(e.to_string()),
            ApiError::BadRequest(message) => ErrorBody::new(message),
            ApiError::InvalidBody(details) => {
                ErrorBody::new("Cuerpo de la petición inválido").with_details(details)
            }
            ApiError::Upstream { context, source } => {
                tracing::error!("{}: {}", context, source);
                ErrorBody::new(context).with_details(source.to_string())
            }
        };

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::Unauthorized(AuthError::MissingToken).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::Unauthorized(AuthError::WrongToken).status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(ApiError::BadRequest("x").status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::InvalidBody("EOF".to_string()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::upstream("Error al descargar el modelo")(OllamaError::RequestFailed(
                "connection refused".to_string()
            ))
            .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_upstream_display_includes_cause() {
        let err = ApiError::upstream("Error al obtener la lista de modelos")(
            OllamaError::Status {
                status: 404,
                body: "not found".to_string(),
            },
        );
        assert_eq!(
            err.to_string(),
            "Error al obtener la lista de modelos: Ollama API error: 404 - not found"
        );
    }
}
