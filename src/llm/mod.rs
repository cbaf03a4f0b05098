pub mod models;
pub mod providers;

use crate::config::LlmConfig;
use async_trait::async_trait;
use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum LlmError {
    ConnectionError(String),
    ResponseError(String),
    ConfigError(String),
}

impl fmt::Display for LlmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LlmError::ConnectionError(msg) => write!(f, "LLM connection error: {}", msg),
            LlmError::ResponseError(msg) => write!(f, "LLM response error: {}", msg),
            LlmError::ConfigError(msg) => write!(f, "LLM configuration error: {}", msg),
        }
    }
}

impl Error for LlmError {}

/// A text-completion backend: one model name and one prompt in, generated text out.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, LlmError>;
}

pub struct LlmManager {
    backend: String,
    client: Box<dyn CompletionClient>,
}

impl LlmManager {
    pub fn new(config: &LlmConfig) -> Result<Self, LlmError> {
        let client: Box<dyn CompletionClient> = match config.backend.as_str() {
            "ollama" => Box::new(providers::ollama::OllamaClient::new(config)?),
            "remote" => Box::new(providers::remote::RemoteClient::new(config)?),
            _ => {
                return Err(LlmError::ConfigError(format!(
                    "Unsupported LLM backend: {}",
                    config.backend
                )))
            }
        };

        Ok(Self {
            backend: config.backend.clone(),
            client,
        })
    }

    /// Wraps an already constructed client.
    #[cfg(test)]
    pub fn with_client(backend: impl Into<String>, client: Box<dyn CompletionClient>) -> Self {
        Self {
            backend: backend.into(),
            client,
        }
    }

    pub fn backend(&self) -> &str {
        &self.backend
    }
}

#[async_trait]
impl CompletionClient for LlmManager {
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, LlmError> {
        self.client.generate(model, prompt).await
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::{CompletionClient, LlmError};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Returns a canned completion and remembers every (model, prompt) it was asked for.
    pub struct RecordingClient {
        reply: Result<String, String>,
        calls: Mutex<Vec<(String, String)>>,
    }

    impl RecordingClient {
        pub fn replying(reply: &str) -> Self {
            Self {
                reply: Ok(reply.to_string()),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn failing(message: &str) -> Self {
            Self {
                reply: Err(message.to_string()),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn calls(&self) -> Vec<(String, String)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CompletionClient for RecordingClient {
        async fn generate(&self, model: &str, prompt: &str) -> Result<String, LlmError> {
            self.calls
                .lock()
                .unwrap()
                .push((model.to_string(), prompt.to_string()));
            self.reply
                .clone()
                .map_err(LlmError::ConnectionError)
        }
    }

    #[async_trait]
    impl CompletionClient for std::sync::Arc<RecordingClient> {
        async fn generate(&self, model: &str, prompt: &str) -> Result<String, LlmError> {
            self.as_ref().generate(model, prompt).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    #[test]
    fn unknown_backend_is_rejected() {
        let mut config = AppConfig::default().llm;
        config.backend = "local".to_string();
        let err = LlmManager::new(&config).err().unwrap();
        assert!(matches!(err, LlmError::ConfigError(_)));
        assert!(err.to_string().contains("Unsupported LLM backend: local"));
    }

    #[test]
    fn remote_backend_requires_api_key() {
        let mut config = AppConfig::default().llm;
        config.backend = "remote".to_string();
        config.api_url = Some("https://llm.example.com/v1/chat/completions".to_string());
        assert!(matches!(
            LlmManager::new(&config).err(),
            Some(LlmError::ConfigError(_))
        ));
    }

    #[tokio::test]
    async fn manager_delegates_to_client() {
        let manager = LlmManager::with_client(
            "test",
            Box::new(testing::RecordingClient::replying("SELECT 1")),
        );
        assert_eq!(manager.backend(), "test");
        assert_eq!(manager.generate("m", "p").await.unwrap(), "SELECT 1");
    }
}
