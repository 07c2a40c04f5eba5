//! Configuration for the proxy.

use std::env;

use config::builder::DefaultState;
use config::{Config as ConfigLoader, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use uiollama_common::DEFAULT_MODEL;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub ollama: OllamaConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub cors: CorsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OllamaConfig {
    /// Base URL of the Ollama server (default: http://127.0.0.1:11434)
    #[serde(default = "default_ollama_url")]
    pub base_url: String,
    /// Model used when a chat request names none (default: llama2)
    #[serde(default = "default_model")]
    pub default_model: String,
}

/// Shared secret for the API token gate.
///
/// When unset (or empty) every request is let through.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub api_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated allowed origins, `*` for any.
    #[serde(default = "default_cors_origins")]
    pub origins: String,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: default_ollama_url(),
            default_model: default_model(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            origins: default_cors_origins(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            ollama: OllamaConfig::default(),
            auth: AuthConfig::default(),
            logging: LoggingConfig::default(),
            cors: CorsConfig::default(),
        }
    }
}

impl AuthConfig {
    /// The configured secret, treating an empty value as unset.
    pub fn api_token(&self) -> Option<&str> {
        self.api_token.as_deref().filter(|token| !token.is_empty())
    }
}

impl CorsConfig {
    pub fn allows_any(&self) -> bool {
        self.origins.trim() == "*"
    }

    pub fn origin_list(&self) -> Vec<String> {
        self.origins
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(String::from)
            .collect()
    }
}

// Default values
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    3000
}
fn default_ollama_url() -> String {
    "http://127.0.0.1:11434".to_string()
}
fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_cors_origins() -> String {
    "*".to_string()
}

impl Config {
    /// Load configuration from file and environment variables.
    ///
    /// Configuration sources (in order of precedence):
    /// 1. `OLLAMA_API_URL`, `API_TOKEN`, `HOST` and `PORT`
    /// 2. Environment variables (UIOLLAMA__SECTION__KEY format)
    /// 3. config.toml file (if present)
    /// 4. Built-in defaults
    pub fn load() -> Result<Self, ConfigError> {
        let builder = Self::defaults()?
            .add_source(File::with_name("config").required(false))
            .add_source(
                Environment::with_prefix("UIOLLAMA")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("ollama.base_url", env::var("OLLAMA_API_URL").ok())?
            .set_override_option("auth.api_token", env::var("API_TOKEN").ok())?
            .set_override_option("host", env::var("HOST").ok())?
            .set_override_option("port", env::var("PORT").ok())?;

        Self::build(builder)
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        ConfigLoader::builder()
            .set_default("host", default_host())?
            .set_default("port", default_port() as i64)?
            .set_default("ollama.base_url", default_ollama_url())?
            .set_default("ollama.default_model", default_model())?
            .set_default("logging.level", default_log_level())?
            .set_default("cors.origins", default_cors_origins())
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let mut config: Config = builder.build()?.try_deserialize()?;
        config.ollama.base_url = config.ollama.base_url.trim_end_matches('/').to_string();
        Ok(config)
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
