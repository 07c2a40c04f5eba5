//! In-memory conversation state for one chat session.

use async_trait::async_trait;
use uiollama_common::{ChatMessage, ChatTurn, DEFAULT_MODEL};

use crate::client::ClientError;

/// Shown in place of the assistant's reply when a chat call fails.
pub const ERROR_REPLY: &str = "Lo siento, ocurrió un error al procesar tu mensaje.";

/// Something that can answer a chat turn.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn chat(&self, messages: &[ChatTurn], model: &str) -> Result<String, ClientError>;
}

/// Ordered, append-only message history plus the selected model.
///
/// `submit` borrows the conversation mutably for the whole round trip, so a
/// session can never have two chat calls outstanding.
#[derive(Debug)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
    model: String,
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new(DEFAULT_MODEL)
    }
}

impl Conversation {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            messages: Vec::new(),
            model: model.into(),
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn set_model(&mut self, model: impl Into<String>) {
        self.model = model.into();
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    /// Send `content` with the whole history and append the answer.
    ///
    /// Blank input is ignored and returns `None`. A failed call appends
    /// [`ERROR_REPLY`] instead of the assistant's text.
    pub async fn submit<B>(&mut self, backend: &B, content: &str) -> Option<&ChatMessage>
    where
        B: ChatBackend + ?Sized,
    {
        if content.trim().is_empty() {
            return None;
        }

        self.messages.push(ChatMessage::user(content));
        let turns: Vec<ChatTurn> = self.messages.iter().map(ChatTurn::from).collect();

        let reply = match backend.chat(&turns, &self.model).await {
            Ok(text) => ChatMessage::assistant(text),
            Err(e) => {
                tracing::error!("Chat request failed: {}", e);
                ChatMessage::assistant(ERROR_REPLY)
            }
        };

        self.messages.push(reply);
        self.messages.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use uiollama_common::Role;

    /// Records every call and answers from a script.
    struct ScriptedBackend {
        replies: Mutex<Vec<Result<String, ClientError>>>,
        calls: Mutex<Vec<(Vec<ChatTurn>, String)>>,
    }

    impl ScriptedBackend {
        fn new(replies: Vec<Result<String, ClientError>>) -> Self {
            Self {
                replies: Mutex::new(replies),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<(Vec<ChatTurn>, String)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ChatBackend for ScriptedBackend {
        async fn chat(&self, messages: &[ChatTurn], model: &str) -> Result<String, ClientError> {
            self.calls
                .lock()
                .unwrap()
                .push((messages.to_vec(), model.to_string()));
            self.replies.lock().unwrap().remove(0)
        }
    }

    #[tokio::test]
    async fn test_submit_appends_user_and_assistant() {
        let backend = ScriptedBackend::new(vec![Ok("¡Hola!".to_string())]);
        let mut conversation = Conversation::default();

        let reply = conversation.submit(&backend, "Hola").await.unwrap();
        assert_eq!(reply.role, Role::Assistant);
        assert_eq!(reply.content, "¡Hola!");

        let messages = conversation.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::User);
        assert_eq!(messages[0].content, "Hola");

        let calls = backend.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].1, "llama2");
    }

    #[tokio::test]
    async fn test_submit_sends_full_history() {
        let backend = ScriptedBackend::new(vec![Ok("uno".to_string()), Ok("dos".to_string())]);
        let mut conversation = Conversation::new("mistral");

        conversation.submit(&backend, "primero").await;
        conversation.submit(&backend, "segundo").await;

        let calls = backend.calls();
        let contents: Vec<&str> = calls[1].0.iter().map(|t| t.content.as_str()).collect();
        assert_eq!(contents, vec!["primero", "uno", "segundo"]);
        assert_eq!(calls[1].1, "mistral");
        assert_eq!(conversation.messages().len(), 4);
    }

    #[tokio::test]
    async fn test_blank_input_is_ignored() {
        let backend = ScriptedBackend::new(vec![]);
        let mut conversation = Conversation::default();

        assert!(conversation.submit(&backend, "   \n").await.is_none());
        assert!(conversation.is_empty());
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_failure_appends_error_reply() {
        let backend = ScriptedBackend::new(vec![Err(ClientError::Server {
            status: 500,
            message: "Error al procesar la solicitud".to_string(),
        })]);
        let mut conversation = Conversation::default();

        let reply = conversation.submit(&backend, "Hola").await.unwrap();
        assert_eq!(reply.role, Role::Assistant);
        assert_eq!(reply.content, ERROR_REPLY);
        assert_eq!(conversation.messages().len(), 2);
    }

    #[tokio::test]
    async fn test_clear_and_model_switch() {
        let backend = ScriptedBackend::new(vec![Ok("a".to_string()), Ok("b".to_string())]);
        let mut conversation = Conversation::default();

        conversation.submit(&backend, "uno").await;
        conversation.clear();
        assert!(conversation.is_empty());

        conversation.set_model("phi3");
        conversation.submit(&backend, "dos").await;

        let calls = backend.calls();
        assert_eq!(calls[1].0.len(), 1);
        assert_eq!(calls[1].1, "phi3");
        assert_eq!(conversation.model(), "phi3");
    }
}
