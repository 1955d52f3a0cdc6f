//! Error types for workflow construction and execution.

use thiserror::Error;

/// Convenience result type using [`GraphError`].
pub type Result<T> = std::result::Result<T, GraphError>;

/// Errors produced by the workflow engine.
///
/// Step-level completion failures are deliberately *not* represented here:
/// a step that cannot get text out of its backend degrades to an empty
/// output and the run continues (see [`crate::steps`]). `GraphError` covers
/// the paths that genuinely stop a run: an invalid task table or a spawned
/// step task that could not be joined.
#[derive(Debug, Error)]
pub enum GraphError {
    /// The task table is malformed (unknown dependency, duplicate task,
    /// or a dependency cycle). Raised at workflow construction.
    #[error("workflow validation failed: {0}")]
    Validation(String),

    /// A completion backend reported a failure.
    ///
    /// Produced by `CompletionModel` implementations; callers inside the
    /// engine convert it into the empty-output sentinel rather than
    /// propagating it.
    #[error("completion failed: {0}")]
    Completion(String),

    /// A spawned step task panicked or was cancelled before finishing.
    #[error("step task failed to join: {0}")]
    TaskJoin(String),
}

impl GraphError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
