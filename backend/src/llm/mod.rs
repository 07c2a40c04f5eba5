//! Upstream model server client.

mod ollama;

pub use ollama::{OllamaClient, OllamaError};
