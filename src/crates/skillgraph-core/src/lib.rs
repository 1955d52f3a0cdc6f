//! Core workflow engine for resume / job-description skill matching.
//!
//! The engine is a fixed task graph over a shared [`SkillMatchState`]:
//!
//! ```text
//! START ─> extract_skills ─> validate_skills ─> classify_resume_skills ─┐
//!                                                                       ├─> sync_barrier ─> compare_skills
//! START ─> classify_jd_skills ─────────────────────────────────────────┘                         │
//!                                                          run_judge ──> judge ──> END;  else ──> END
//! ```
//!
//! The two entry branches have no data dependency and run concurrently; the
//! barrier joins them before the comparison, and the judge step is gated on
//! the state's `run_judge` flag. Each step calls an opaque
//! [`CompletionModel`] with a prompt built by an externally supplied
//! [`PromptSet`]; a failed completion degrades to an empty output instead of
//! aborting the run.
//!
//! Concrete completion backends live in the `llm` crate; prompt templates
//! and file handling live in the CLI crate.

pub mod completion;
pub mod error;
pub mod graph;
pub mod prompts;
pub mod state;
pub mod steps;
pub mod topology;

pub use completion::CompletionModel;
pub use error::{GraphError, Result};
pub use graph::{StepId, Workflow};
pub use prompts::PromptSet;
pub use state::{Provider, SkillMatchState, StateSlot};
