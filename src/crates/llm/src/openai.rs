//! OpenAI backend.
//!
//! Speaks the chat-completions endpoint with bearer authentication. The
//! retry behavior is identical to the Gemini client's: both route their
//! single attempt through [`with_retry`].

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use skillgraph_core::completion::CompletionModel;
use skillgraph_core::error::Result as GraphResult;
use skillgraph_core::Provider;

use crate::config::{default_model, CompletionConfig};
use crate::error::LlmError;
use crate::retry::{with_retry, RetryPolicy};

const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// OpenAI completion client.
#[derive(Clone)]
pub struct OpenAiClient {
    config: CompletionConfig,
    model: String,
    policy: RetryPolicy,
    client: Client,
}

impl OpenAiClient {
    /// Create a client from a resolved configuration.
    pub fn new(config: CompletionConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");
        let model = config
            .model
            .clone()
            .unwrap_or_else(|| default_model(Provider::OpenAi).to_string());
        let policy = RetryPolicy::new(config.max_retries, config.initial_delay);

        Self {
            config,
            model,
            policy,
            client,
        }
    }

    async fn send_once(&self, prompt: &str) -> Result<String, LlmError> {
        let url = format!("{OPENAI_BASE_URL}/chat/completions");
        let body = OpenAiRequest {
            model: self.model.clone(),
            messages: vec![OpenAiMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                401 | 403 => LlmError::Authentication(error_text),
                429 => LlmError::RateLimited(error_text),
                _ => LlmError::Provider(format!("OpenAI API error {status}: {error_text}")),
            });
        }

        let parsed: OpenAiResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;
        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::InvalidResponse("no choices in response".to_string()))?;

        Ok(choice.message.content.unwrap_or_default())
    }
}

#[async_trait]
impl CompletionModel for OpenAiClient {
    async fn complete(&self, prompt: &str) -> GraphResult<String> {
        let text = with_retry(&self.policy, "openai", || self.send_once(prompt)).await?;
        Ok(text)
    }
}

// OpenAI wire types, reduced to the fields this client uses.
#[derive(Debug, Serialize)]
struct OpenAiRequest {
    model: String,
    messages: Vec<OpenAiMessage>,
}

#[derive(Debug, Serialize)]
struct OpenAiMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    choices: Vec<OpenAiChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoiceMessage {
    content: Option<String>,
}
