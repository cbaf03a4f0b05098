use crate::config::LlmConfig;
use crate::llm::{CompletionClient, LlmError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info};

pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434/api/generate";

pub struct OllamaClient {
    client: reqwest::Client,
    api_url: String,
    temperature: f32,
}

#[derive(Serialize, Debug)]
struct OllamaRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Serialize, Debug)]
struct OllamaOptions {
    temperature: f32,
}

#[derive(Deserialize, Debug)]
struct OllamaResponse {
    response: String,
    #[serde(default)]
    done: Option<bool>,
    // Use serde to ignore unknown fields
    #[serde(flatten)]
    extra: std::collections::HashMap<String, serde_json::Value>,
}

impl OllamaClient {
    pub fn new(config: &LlmConfig) -> Result<Self, LlmError> {
        let api_url = config
            .api_url
            .clone()
            .unwrap_or_else(|| DEFAULT_OLLAMA_URL.to_string());

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LlmError::ConnectionError(e.to_string()))?;

        Ok(Self {
            client,
            api_url,
            temperature: config.temperature,
        })
    }

    fn parse_response(response_text: &str) -> Result<String, LlmError> {
        let ollama_response = serde_json::from_str::<OllamaResponse>(response_text).map_err(|e| {
            error!("Failed to parse Ollama response: {} - Response was: {}", e, response_text);
            LlmError::ResponseError(format!(
                "Failed to parse Ollama response: {} - Response was: {}",
                e, response_text
            ))
        })?;

        if ollama_response.done == Some(false) {
            debug!("Ollama reported an unfinished generation, extra fields: {:?}", ollama_response.extra.keys());
        }

        Ok(ollama_response.response)
    }
}

#[async_trait]
impl CompletionClient for OllamaClient {
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, LlmError> {
        info!("Sending request to Ollama with model: {}", model);
        debug!("API URL: {}", self.api_url);

        let request = OllamaRequest {
            model,
            prompt,
            stream: false,
            options: OllamaOptions {
                temperature: self.temperature,
            },
        };

        let response = self
            .client
            .post(&self.api_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| LlmError::ConnectionError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = match response.text().await {
                Ok(body) => format!(" - Response body: {}", body),
                Err(_) => String::new(),
            };

            error!("Ollama API responded with status code: {}{}", status, error_body);
            return Err(LlmError::ResponseError(format!(
                "Ollama API responded with status code: {}{}",
                status, error_body
            )));
        }

        let response_text = response
            .text()
            .await
            .map_err(|e| LlmError::ResponseError(format!("Failed to read response body: {}", e)))?;

        debug!("Raw response from Ollama: {}", response_text);

        Self::parse_response(&response_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_disables_streaming() {
        let request = OllamaRequest {
            model: "sqlcoder:7b",
            prompt: "hi",
            stream: false,
            options: OllamaOptions { temperature: 0.5 },
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "sqlcoder:7b");
        assert_eq!(json["stream"], false);
        assert_eq!(json["options"]["temperature"], 0.5);
    }

    #[test]
    fn parses_generate_body_with_extra_fields() {
        let body = r#"{"model":"llama3.1","created_at":"2024-01-01T00:00:00Z","response":"SELECT 1","done":true,"eval_count":12}"#;
        assert_eq!(OllamaClient::parse_response(body).unwrap(), "SELECT 1");
    }

    #[test]
    fn malformed_body_is_a_response_error() {
        let err = OllamaClient::parse_response("<html>bad gateway</html>").unwrap_err();
        assert!(matches!(err, LlmError::ResponseError(_)));
    }

    #[test]
    fn falls_back_to_local_endpoint() {
        let config = crate::config::AppConfig::default().llm;
        let client = OllamaClient::new(&config).unwrap();
        assert_eq!(client.api_url, DEFAULT_OLLAMA_URL);
    }
}
