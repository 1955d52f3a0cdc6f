//! Error types for the completion backends.

use thiserror::Error;

/// Result type for completion operations.
pub type Result<T> = std::result::Result<T, LlmError>;

/// Errors that can occur when talking to a completion backend.
#[derive(Debug, Error)]
pub enum LlmError {
    /// No API key was supplied and the provider's environment variable is
    /// unset. Raised at client construction, before any request is made.
    #[error("missing credential: set {0} or pass an explicit API key")]
    MissingCredential(String),

    /// The backend failed on every attempt the retry policy allowed.
    #[error("call failed after {attempts} attempts: {last_error}")]
    ExhaustedRetries {
        /// Number of attempts actually made.
        attempts: u32,
        /// Error text of the final attempt.
        last_error: String,
    },

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// API authentication failed (401/403).
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// Rate limit exceeded (429).
    #[error("rate limit exceeded: {0}")]
    RateLimited(String),

    /// The backend answered with something the client could not decode.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Any other provider-reported error.
    #[error("provider error: {0}")]
    Provider(String),
}

impl From<serde_json::Error> for LlmError {
    fn from(err: serde_json::Error) -> Self {
        LlmError::InvalidResponse(err.to_string())
    }
}

/// Completion failures cross into the workflow as its generic completion
/// error; the engine degrades them to empty step output rather than
/// aborting.
impl From<LlmError> for skillgraph_core::GraphError {
    fn from(err: LlmError) -> Self {
        skillgraph_core::GraphError::Completion(err.to_string())
    }
}
