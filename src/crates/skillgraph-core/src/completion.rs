//! The text-completion capability the workflow calls.

use async_trait::async_trait;

use crate::error::Result;

/// An opaque prompt-in / text-out completion backend.
///
/// The workflow never sees a provider's request or response schema; it hands
/// a prompt to this trait and gets text (or a failure) back. The `llm` crate
/// implements it once per provider, with retries and backoff behind the
/// trait; tests implement it with stubs.
#[async_trait]
pub trait CompletionModel: Send + Sync {
    /// Run one completion. Implementations retry internally; an `Err` here
    /// means the backend is not going to produce text for this prompt.
    async fn complete(&self, prompt: &str) -> Result<String>;
}
