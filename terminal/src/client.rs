//! HTTP client for the UIOLLAMA proxy API.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use uiollama_common::{
    ChatReply, ChatRequest, ChatTurn, ErrorBody, ModelDescriptor, ModelsResponse, PullRequest,
    PullResponse,
};

use crate::conversation::ChatBackend;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("No se pudo conectar con el servidor: {0}")]
    RequestFailed(String),
    /// The proxy answered with an error envelope.
    #[error("{message} ({status})")]
    Server { status: u16, message: String },
    #[error("Respuesta inválida: {0}")]
    InvalidResponse(String),
}

/// Client for a running UIOLLAMA backend.
pub struct ProxyClient {
    http_client: Client,
    base_url: String,
    token: Option<String>,
}

impl ProxyClient {
    pub fn new(base_url: &str, token: Option<String>) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.is_empty()),
        }
    }

    pub async fn list_models(&self) -> Result<Vec<ModelDescriptor>, ClientError> {
        let request = self.http_client.get(self.url("/api/models"));
        let response: ModelsResponse = self.send(request).await?;
        Ok(response.models)
    }

    pub async fn pull(&self, model: &str) -> Result<PullResponse, ClientError> {
        let body = PullRequest {
            model: Some(model.to_string()),
        };
        let request = self.http_client.post(self.url("/api/models/pull")).json(&body);
        self.send(request).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let request = match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request
            .send()
            .await
            .map_err(|e| ClientError::RequestFailed(e.to_string()))?;

        decode(response).await
    }
}

#[async_trait]
impl ChatBackend for ProxyClient {
    async fn chat(&self, messages: &[ChatTurn], model: &str) -> Result<String, ClientError> {
        let body = ChatRequest {
            messages: messages.to_vec(),
            model: Some(model.to_string()),
        };
        tracing::debug!("POST /api/chat model={} messages={}", model, messages.len());

        let request = self.http_client.post(self.url("/api/chat")).json(&body);
        let reply: ChatReply = self.send(request).await?;
        Ok(reply.message)
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    if !status.is_success() {
        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.message.unwrap_or(body.error),
            Err(_) => status.canonical_reason().unwrap_or("error").to_string(),
        };
        return Err(ClientError::Server {
            status: status.as_u16(),
            message,
        });
    }

    response
        .json()
        .await
        .map_err(|e| ClientError::InvalidResponse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use uiollama_common::Role;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_chat_sends_bearer_token_and_model() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .and(header("authorization", "Bearer abc"))
            .and(body_json(json!({
                "messages": [{"role": "user", "content": "Hola"}],
                "model": "mistral"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "¡Hola!"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = ProxyClient::new(&server.uri(), Some("abc".to_string()));
        let turns = vec![ChatTurn {
            role: Role::User,
            content: "Hola".to_string(),
        }];
        assert_eq!(client.chat(&turns, "mistral").await.unwrap(), "¡Hola!");
    }

    #[tokio::test]
    async fn test_gate_rejection_surfaces_reason() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/models"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "error": "No autorizado",
                "message": "Token de autenticación incorrecto"
            })))
            .mount(&server)
            .await;

        let client = ProxyClient::new(&server.uri(), Some("xyz".to_string()));
        let err = client.list_models().await.unwrap_err();
        match err {
            ClientError::Server { status, message } => {
                assert_eq!(status, 403);
                assert_eq!(message, "Token de autenticación incorrecto");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_pull_error_uses_error_field() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/models/pull"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(json!({"error": "El nombre del modelo es requerido"})),
            )
            .mount(&server)
            .await;

        let client = ProxyClient::new(&server.uri(), None);
        let err = client.pull("").await.unwrap_err();
        assert_eq!(err.to_string(), "El nombre del modelo es requerido (400)");
    }

    #[tokio::test]
    async fn test_list_models() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/models"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "models": [{"name": "llama2:latest", "size": 3826793677u64}]
            })))
            .mount(&server)
            .await;

        let client = ProxyClient::new(&format!("{}/", server.uri()), None);
        let models = client.list_models().await.unwrap();
        assert_eq!(models.len(), 1);
        assert_eq!(models[0].name, "llama2:latest");
    }
}
