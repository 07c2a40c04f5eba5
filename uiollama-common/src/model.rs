//! Model descriptors as reported by the model server.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A model entry from the upstream catalog.
///
/// Known fields are typed for clients; anything else the server reports is
/// kept in `extra` so the descriptor round-trips through the proxy unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<ModelDetails>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Format metadata attached to a model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantization_level: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ModelDescriptor {
    /// Human readable size, e.g. `3.8 GB`.
    pub fn size_label(&self) -> Option<String> {
        self.size.map(format_size)
    }
}

/// Format a byte count in gibibytes with one decimal.
pub fn format_size(bytes: u64) -> String {
    let gb = bytes as f64 / 1024f64.powi(3);
    format!("{:.1} GB", gb)
}
