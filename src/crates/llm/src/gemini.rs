//! Google Gemini backend.
//!
//! Speaks the `generateContent` endpoint of the Gemini API, with the API key
//! passed as a query parameter. Retries and backoff come from the shared
//! [`with_retry`] combinator; this module only contributes the wire shape.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use skillgraph_core::completion::CompletionModel;
use skillgraph_core::error::Result as GraphResult;
use skillgraph_core::Provider;

use crate::config::{default_model, CompletionConfig};
use crate::error::LlmError;
use crate::retry::{with_retry, RetryPolicy};

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini completion client.
#[derive(Clone)]
pub struct GeminiClient {
    config: CompletionConfig,
    model: String,
    policy: RetryPolicy,
    client: Client,
}

impl GeminiClient {
    /// Create a client from a resolved configuration.
    pub fn new(config: CompletionConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");
        let model = config
            .model
            .clone()
            .unwrap_or_else(|| default_model(Provider::Gemini).to_string());
        let policy = RetryPolicy::new(config.max_retries, config.initial_delay);

        Self {
            config,
            model,
            policy,
            client,
        }
    }

    async fn send_once(&self, prompt: &str) -> Result<String, LlmError> {
        let url = format!(
            "{}/models/{}:generateContent",
            GEMINI_BASE_URL, self.model
        );
        let body = GeminiRequest {
            contents: vec![GeminiContent {
                role: "user".to_string(),
                parts: vec![GeminiPart {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self
            .client
            .post(&url)
            .query(&[("key", &self.config.api_key)])
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                401 | 403 => LlmError::Authentication(error_text),
                429 => LlmError::RateLimited(error_text),
                _ => LlmError::Provider(format!("Gemini API error {status}: {error_text}")),
            });
        }

        let parsed: GeminiResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;
        let candidate = parsed
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::InvalidResponse("no candidates in response".to_string()))?;

        Ok(candidate
            .content
            .parts
            .into_iter()
            .map(|part| part.text)
            .collect::<Vec<_>>()
            .join(""))
    }
}

#[async_trait]
impl CompletionModel for GeminiClient {
    async fn complete(&self, prompt: &str) -> GraphResult<String> {
        let text = with_retry(&self.policy, "gemini", || self.send_once(prompt)).await?;
        Ok(text)
    }
}

// Gemini wire types, reduced to the fields this client uses.
#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    role: String,
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: GeminiCandidateContent,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidateContent {
    parts: Vec<GeminiPart>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_uses_the_provider_default_model() {
        let client = GeminiClient::new(CompletionConfig::new("test-key"));
        assert_eq!(client.model, "gemini-2.0-flash");
    }

    #[test]
    fn explicit_model_wins_over_the_default() {
        let client =
            GeminiClient::new(CompletionConfig::new("test-key").with_model("gemini-1.5-pro"));
        assert_eq!(client.model, "gemini-1.5-pro");
    }

    #[test]
    fn response_text_concatenates_parts() {
        let raw = r#"{"candidates":[{"content":{"parts":[{"text":"foo"},{"text":"bar"}],"role":"model"}}]}"#;
        let parsed: GeminiResponse = serde_json::from_str(raw).unwrap();
        let text: String = parsed.candidates[0]
            .content
            .parts
            .iter()
            .map(|p| p.text.as_str())
            .collect();
        assert_eq!(text, "foobar");
    }
}
