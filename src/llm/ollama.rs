// Ollama generate API client

use crate::config::LlmConfig;
use crate::error::{Error, Result};
use crate::llm::TextGenerator;
use async_trait::async_trait;
use serde::Deserialize;

const DEFAULT_API_URL: &str = "http://localhost:11434";

/// Client for a local Ollama server
pub struct OllamaClient {
    client: reqwest::Client,
    endpoint: String,
    model: String,
}

/// Response from Ollama API
#[derive(Debug, Deserialize)]
struct OllamaResponse {
    response: String,
}

impl OllamaClient {
    pub fn new(client: reqwest::Client, config: &LlmConfig) -> Self {
        let base = config
            .api_url
            .as_deref()
            .unwrap_or(DEFAULT_API_URL)
            .trim_end_matches('/');

        Self {
            client,
            endpoint: format!("{}/api/generate", base),
            model: config.model.clone(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl TextGenerator for OllamaClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let body = serde_json::json!({
            "model": self.model,
            "prompt": prompt,
            "stream": false
        });

        tracing::debug!(endpoint = %self.endpoint, model = %self.model, "sending generate request");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::llm(format!("Ollama request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::llm(format!(
                "Ollama returned status {}",
                response.status()
            )));
        }

        let result: OllamaResponse = response
            .json()
            .await
            .map_err(|e| Error::llm(format!("Failed to parse Ollama response: {}", e)))?;

        Ok(result.response)
    }
}
