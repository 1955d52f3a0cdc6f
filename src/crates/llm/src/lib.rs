//! Completion backends for the skillgraph workflow.
//!
//! This crate provides the concrete implementations of the
//! [`CompletionModel`] trait from `skillgraph-core`: one client per
//! provider, both sharing a single retry/backoff combinator. Credentials
//! are explicit configuration values; the environment is consulted only
//! through [`CompletionConfig::from_env`], which the CLI calls once at the
//! process boundary.
//!
//! # Example
//!
//! ```rust,ignore
//! use llm::{client_for, CompletionConfig};
//! use skillgraph_core::Provider;
//!
//! let config = CompletionConfig::from_env(Provider::OpenAi)?;
//! let model = client_for(Provider::OpenAi, config);
//! let text = model.complete("Say hello").await?;
//! ```

pub mod config;
pub mod error;
pub mod gemini;
pub mod openai;
pub mod retry;

pub use config::{api_key_var, default_model, CompletionConfig};
pub use error::{LlmError, Result};
pub use gemini::GeminiClient;
pub use openai::OpenAiClient;
pub use retry::{with_retry, RetryPolicy};

use skillgraph_core::{CompletionModel, Provider};

/// Build the completion client for the selected provider.
///
/// The two clients differ only in wire shape; retries, backoff, and the
/// text-out contract are shared.
pub fn client_for(provider: Provider, config: CompletionConfig) -> Box<dyn CompletionModel> {
    match provider {
        Provider::Gemini => Box::new(GeminiClient::new(config)),
        Provider::OpenAi => Box::new(OpenAiClient::new(config)),
    }
}
