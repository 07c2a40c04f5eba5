//! Request and response bodies of the proxy API.

use serde::{Deserialize, Serialize};

use crate::chat::ChatTurn;
use crate::model::ModelDescriptor;

/// POST /api/chat request body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub messages: Vec<ChatTurn>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl ChatRequest {
    /// The requested model, or `default` when none (or an empty name) was given.
    pub fn model_or<'a>(&'a self, default: &'a str) -> &'a str {
        match self.model.as_deref() {
            Some(model) if !model.is_empty() => model,
            _ => default,
        }
    }
}

/// POST /api/chat response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub message: String,
}

/// GET /api/models response body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelsResponse {
    #[serde(default)]
    pub models: Vec<ModelDescriptor>,
}

/// POST /api/models/pull request body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PullRequest {
    #[serde(default)]
    pub model: Option<String>,
}

impl PullRequest {
    /// The trimmed model name, if one was actually provided.
    pub fn model_name(&self) -> Option<&str> {
        self.model
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

/// POST /api/models/pull response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullResponse {
    pub success: bool,
    pub status: Option<String>,
}

/// Error envelope returned by every failing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: None,
            details: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::Role;

    #[test]
    fn test_chat_request_defaults() {
        let req: ChatRequest = serde_json::from_str("{}").unwrap();
        assert!(req.messages.is_empty());
        assert!(req.model.is_none());
        assert_eq!(req.model_or("llama2"), "llama2");
    }

    #[test]
    fn test_chat_request_empty_model_uses_default() {
        let req: ChatRequest = serde_json::from_str(
            r#"{"messages": [{"role": "user", "content": "Hola"}], "model": ""}"#,
        )
        .unwrap();
        assert_eq!(req.model_or("llama2"), "llama2");
        assert_eq!(req.messages[0].role, Role::User);
    }

    #[test]
    fn test_chat_request_explicit_model() {
        let req: ChatRequest =
            serde_json::from_str(r#"{"messages": [], "model": "mistral"}"#).unwrap();
        assert_eq!(req.model_or("llama2"), "mistral");
    }

    #[test]
    fn test_pull_request_model_name() {
        let missing: PullRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(missing.model_name(), None);

        let blank: PullRequest = serde_json::from_str(r#"{"model": "   "}"#).unwrap();
        assert_eq!(blank.model_name(), None);

        let named: PullRequest = serde_json::from_str(r#"{"model": " phi3 "}"#).unwrap();
        assert_eq!(named.model_name(), Some("phi3"));
    }

    #[test]
    fn test_error_body_skips_empty_fields() {
        let body = ErrorBody::new("El nombre del modelo es requerido");
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"error":"El nombre del modelo es requerido"}"#
        );

        let body = ErrorBody::new("Error al descargar el modelo").with_details("boom");
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["details"], "boom");
        assert!(json.get("message").is_none());
    }

    #[test]
    fn test_pull_response_null_status() {
        let resp = PullResponse {
            success: true,
            status: None,
        };
        assert_eq!(
            serde_json::to_string(&resp).unwrap(),
            r#"{"success":true,"status":null}"#
        );
    }
}
