//! UIOLLAMA Common Types
//!
//! Shared types used by the proxy backend and its clients.

pub mod api;
pub mod chat;
pub mod model;

pub use api::{ChatReply, ChatRequest, ErrorBody, ModelsResponse, PullRequest, PullResponse};
pub use chat::{ChatMessage, ChatTurn, Role};
pub use model::{format_size, ModelDescriptor, ModelDetails};

/// Model used when a chat request does not name one.
pub const DEFAULT_MODEL: &str = "llama2";
