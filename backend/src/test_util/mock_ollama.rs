//! Canned Ollama payloads for tests.

use serde_json::{json, Value};

/// Non-streaming /api/chat reply carrying `content`.
pub fn chat_reply(model: &str, content: &str) -> Value {
    json!({
        "model": model,
        "created_at": "2024-06-10T08:00:00.000Z",
        "message": {
            "role": "assistant",
            "content": content
        },
        "done": true,
        "prompt_eval_count": 10,
        "eval_count": content.split_whitespace().count()
    })
}

/// /api/tags reply with one entry per name.
pub fn tags(names: &[&str]) -> Value {
    let models: Vec<Value> = names
        .iter()
        .map(|name| {
            json!({
                "name": name,
                "model": name,
                "modified_at": "2024-03-20T10:30:00Z",
                "size": 3826793677u64,
                "digest": "sha256:78e26419b4469263f75331927a00a0284ef6544c1975b826b15abdaef17bb962",
                "details": {
                    "format": "gguf",
                    "family": "llama",
                    "families": ["llama"],
                    "parameter_size": "7B",
                    "quantization_level": "Q4_0"
                }
            })
        })
        .collect();

    json!({ "models": models })
}

/// Non-streaming /api/pull reply.
pub fn pull_success() -> Value {
    json!({ "status": "success" })
}

pub fn error_json(message: &str) -> Value {
    json!({ "error": message })
}
