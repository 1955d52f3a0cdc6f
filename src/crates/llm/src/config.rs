//! Configuration for the completion clients.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use skillgraph_core::Provider;

use crate::error::{LlmError, Result};

/// Environment variable holding the Gemini API key.
pub const GEMINI_API_KEY_VAR: &str = "GEMINI_API_KEY";

/// Environment variable holding the OpenAI API key.
pub const OPENAI_API_KEY_VAR: &str = "OPENAI_API_KEY";

const GEMINI_DEFAULT_MODEL: &str = "gemini-2.0-flash";
const OPENAI_DEFAULT_MODEL: &str = "gpt-4o-mini";

/// The environment variable consulted for a provider's API key.
pub fn api_key_var(provider: Provider) -> &'static str {
    match provider {
        Provider::Gemini => GEMINI_API_KEY_VAR,
        Provider::OpenAi => OPENAI_API_KEY_VAR,
    }
}

/// The model used when [`CompletionConfig::model`] is unset.
pub fn default_model(provider: Provider) -> &'static str {
    match provider {
        Provider::Gemini => GEMINI_DEFAULT_MODEL,
        Provider::OpenAi => OPENAI_DEFAULT_MODEL,
    }
}

/// Configuration shared by both completion clients.
///
/// The API key is an explicit value here: environment lookup happens once,
/// at the process boundary, via [`CompletionConfig::resolve`] or
/// [`CompletionConfig::from_env`]. Clients never read the environment
/// themselves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionConfig {
    /// API key for authentication.
    pub api_key: String,

    /// Model name. Provider-specific default when unset.
    pub model: Option<String>,

    /// Maximum number of call attempts (including the first).
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Delay before the first retry; doubles after every failure.
    #[serde(default = "default_initial_delay")]
    pub initial_delay: Duration,

    /// Per-request HTTP timeout.
    #[serde(default = "default_timeout")]
    pub timeout: Duration,
}

impl CompletionConfig {
    /// Create a configuration with an explicit API key and the defaults.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: None,
            max_retries: default_max_retries(),
            initial_delay: default_initial_delay(),
            timeout: default_timeout(),
        }
    }

    /// Create a configuration from the provider's environment variable.
    pub fn from_env(provider: Provider) -> Result<Self> {
        let var = api_key_var(provider);
        let api_key = std::env::var(var)
            .map_err(|_| LlmError::MissingCredential(var.to_string()))?;
        Ok(Self::new(api_key))
    }

    /// Resolve a configuration from an explicit key, falling back to the
    /// provider's environment variable.
    pub fn resolve(provider: Provider, explicit_key: Option<String>) -> Result<Self> {
        match explicit_key {
            Some(key) => Ok(Self::new(key)),
            None => Self::from_env(provider),
        }
    }

    /// Set the model name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the maximum number of attempts.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set the delay before the first retry.
    pub fn with_initial_delay(mut self, initial_delay: Duration) -> Self {
        self.initial_delay = initial_delay;
        self
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

fn default_max_retries() -> u32 {
    3
}

fn default_initial_delay() -> Duration {
    Duration::from_secs(2)
}

fn default_timeout() -> Duration {
    Duration::from_secs(60)
}
