//! Text generation backends.
//!
//! The documentation renderer only sees [`TextGenerator`]: a prompt goes in,
//! free-form text comes out. Concrete clients talk to OpenAI-compatible chat
//! endpoints or a local Ollama server.

pub mod ollama;
pub mod openai;

pub use ollama::OllamaClient;
pub use openai::OpenAiClient;

use crate::config::{Credentials, LlmConfig, LlmProvider};
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Opaque text-generation capability
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a completion for `prompt`.
    ///
    /// Any returned string is accepted, including an empty one. Failures
    /// (network, auth, rate limits, malformed responses) are returned as
    /// errors and never retried.
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Build the generator selected by the config
pub fn generator_from_config(
    config: &LlmConfig,
    credentials: &Credentials,
) -> Result<Arc<dyn TextGenerator>> {
    let client = http_client(config)?;
    let generator: Arc<dyn TextGenerator> = match config.provider {
        LlmProvider::OpenAI => {
            let api_key = config
                .api_key
                .clone()
                .or_else(|| credentials.openai_api_key.clone());
            Arc::new(OpenAiClient::new(client, config, api_key))
        }
        LlmProvider::Ollama => Arc::new(OllamaClient::new(client, config)),
    };
    Ok(generator)
}

fn http_client(config: &LlmConfig) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()
        .map_err(|e| crate::error::Error::llm(format!("failed to build HTTP client: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generator_from_config_openai() {
        let config = LlmConfig::default();
        let credentials = Credentials {
            openai_api_key: Some("sk-test".to_string()),
            github_token: None,
        };
        assert!(generator_from_config(&config, &credentials).is_ok());
    }

    #[test]
    fn test_generator_from_config_ollama() {
        let config = LlmConfig {
            provider: LlmProvider::Ollama,
            model: "llama3".to_string(),
            ..LlmConfig::default()
        };
        assert!(generator_from_config(&config, &Credentials::default()).is_ok());
    }

    #[tokio::test]
    async fn test_openai_without_key_fails_on_call() {
        let config = LlmConfig {
            api_key: None,
            ..LlmConfig::default()
        };
        let generator = generator_from_config(&config, &Credentials::default()).unwrap();
        let err = generator.generate("hello").await.unwrap_err();
        assert!(err.to_string().contains("API key"));
    }
}
