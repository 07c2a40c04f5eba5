use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use uiollama_common::{ChatTurn, ModelDescriptor};

/// Client for communicating with Ollama API.
///
/// Every call is a single blocking round trip: no streaming, no retries.
pub struct OllamaClient {
    http_client: Client,
    base_url: String,
}

/// Ollama chat request format.
#[derive(Debug, Serialize)]
struct OllamaChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatTurn],
    stream: bool,
}

/// Ollama chat response format.
#[derive(Debug, Deserialize)]
struct OllamaChatResponse {
    message: OllamaResponseMessage,
}

#[derive(Debug, Deserialize)]
struct OllamaResponseMessage {
    #[serde(default)]
    content: String,
}

/// Response from /api/tags endpoint.
#[derive(Debug, Deserialize)]
struct OllamaTagsResponse {
    #[serde(default)]
    models: Vec<ModelDescriptor>,
}

#[derive(Debug, Serialize)]
struct OllamaPullRequest<'a> {
    name: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct OllamaPullResponse {
    #[serde(default)]
    status: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum OllamaError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(String),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
    #[error("Ollama API error: {status} - {body}")]
    Status { status: u16, body: String },
}

impl OllamaClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http_client: Client, base_url: &str) -> Self {
        Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the model catalog, unwrapped from its `models` envelope.
    pub async fn list_models(&self) -> Result<Vec<ModelDescriptor>, OllamaError> {
        let url = format!("{}/api/tags", self.base_url);

        tracing::debug!("Listing models from Ollama: {}", url);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| OllamaError::RequestFailed(e.to_string()))?;

        let tags: OllamaTagsResponse = decode(response).await?;
        Ok(tags.models)
    }

    /// Send the conversation to Ollama and return the assistant's text.
    pub async fn chat(&self, messages: &[ChatTurn], model: &str) -> Result<String, OllamaError> {
        let ollama_request = OllamaChatRequest {
            model,
            messages,
            stream: false,
        };

        let url = format!("{}/api/chat", self.base_url);

        tracing::debug!(
            "Sending chat request to Ollama: {} model={} messages={}",
            url,
            model,
            messages.len()
        );

        let response = self
            .http_client
            .post(&url)
            .json(&ollama_request)
            .send()
            .await
            .map_err(|e| OllamaError::RequestFailed(e.to_string()))?;

        let reply: OllamaChatResponse = decode(response).await?;
        Ok(reply.message.content)
    }

    /// Ask Ollama to download a model and wait until it is done.
    ///
    /// Returns the final status string Ollama reports (usually `success`).
    pub async fn pull(&self, name: &str) -> Result<Option<String>, OllamaError> {
        let url = format!("{}/api/pull", self.base_url);

        tracing::info!("Pulling model {} from {}", name, url);

        let response = self
            .http_client
            .post(&url)
            .json(&OllamaPullRequest { name, stream: false })
            .send()
            .await
            .map_err(|e| OllamaError::RequestFailed(e.to_string()))?;

        let pulled: OllamaPullResponse = decode(response).await?;
        tracing::info!("Model {} pulled: {:?}", name, pulled.status);
        Ok(pulled.status)
    }
}

/// Turn a non-success status into an error, otherwise parse the JSON body.
async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, OllamaError> {
    if !response.status().is_success() {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        return Err(OllamaError::Status { status, body });
    }

    response
        .json()
        .await
        .map_err(|e| OllamaError::InvalidResponse(e.to_string()))
}
