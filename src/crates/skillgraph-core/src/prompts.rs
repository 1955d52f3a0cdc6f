//! Prompt templates supplied by the application.

/// Builds the prompt text for each LLM-backed step.
///
/// One method per step, taking exactly the state fields that step reads.
/// The resume and JD classification steps share a single template, as the
/// classification task is the same on both branches. Implementations must
/// be pure: same inputs, same prompt, no side effects.
pub trait PromptSet: Send + Sync {
    /// Prompt for extracting skills from the resume text.
    fn extract(&self, resume: &str) -> String;

    /// Prompt for validating an extracted skill list against the resume.
    fn validate(&self, resume: &str, extracted_skills: &str) -> String;

    /// Prompt for classifying a skill list (used by both branches).
    fn classify(&self, skills: &str) -> String;

    /// Prompt for comparing classified candidate skills with JD skills.
    fn compare(&self, candidate_skills: &str, jd_skills: &str) -> String;

    /// Prompt for judging a comparison result.
    fn judge(&self, comparison: &str) -> String;
}
