//! The shared state record threaded through every workflow step.

use serde::{Deserialize, Serialize};

use crate::error::GraphError;

/// Completion backend selector, fixed for the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// Google Gemini.
    Gemini,
    /// OpenAI chat completions.
    OpenAi,
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Provider::Gemini => write!(f, "gemini"),
            Provider::OpenAi => write!(f, "openai"),
        }
    }
}

impl std::str::FromStr for Provider {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gemini" => Ok(Provider::Gemini),
            "openai" => Ok(Provider::OpenAi),
            other => Err(GraphError::validation(format!(
                "unknown provider '{other}' (expected 'gemini' or 'openai')"
            ))),
        }
    }
}

/// State slots written by the workflow's steps.
///
/// Each slot has exactly one producing step; the inputs (`resume_doc`,
/// `job_description_doc`) and the run flags are not slots because nothing
/// writes them after initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateSlot {
    ExtractedSkills,
    ValidatedSkills,
    ResumeClassifiedSkills,
    JdClassifiedSkills,
    ComparisonResult,
    JudgeFeedback,
}

/// The record a run operates on.
///
/// Created once per invocation and grown monotonically: every field is
/// either an initialization input or the output of exactly one step. An
/// empty string in an output field means "not produced yet" or "the
/// producing step's completion failed"; downstream steps accept either.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillMatchState {
    pub provider: Provider,
    pub run_judge: bool,
    pub resume_doc: String,
    pub job_description_doc: String,
    #[serde(default)]
    pub extracted_skills_json: String,
    #[serde(default)]
    pub validated_extracted_skills_json: String,
    #[serde(default)]
    pub resume_classified_skills_json: String,
    #[serde(default)]
    pub jd_classified_skills_json: String,
    #[serde(default)]
    pub comparison_result_json: String,
    #[serde(default)]
    pub judge_feedback_json: String,
}

impl SkillMatchState {
    /// Build the initial state for a run. All output slots start empty.
    pub fn new(
        provider: Provider,
        run_judge: bool,
        resume_doc: impl Into<String>,
        job_description_doc: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            run_judge,
            resume_doc: resume_doc.into(),
            job_description_doc: job_description_doc.into(),
            extracted_skills_json: String::new(),
            validated_extracted_skills_json: String::new(),
            resume_classified_skills_json: String::new(),
            jd_classified_skills_json: String::new(),
            comparison_result_json: String::new(),
            judge_feedback_json: String::new(),
        }
    }

    /// Read a slot's current value.
    pub fn get(&self, slot: StateSlot) -> &str {
        match slot {
            StateSlot::ExtractedSkills => &self.extracted_skills_json,
            StateSlot::ValidatedSkills => &self.validated_extracted_skills_json,
            StateSlot::ResumeClassifiedSkills => &self.resume_classified_skills_json,
            StateSlot::JdClassifiedSkills => &self.jd_classified_skills_json,
            StateSlot::ComparisonResult => &self.comparison_result_json,
            StateSlot::JudgeFeedback => &self.judge_feedback_json,
        }
    }

    /// Apply one step's partial update.
    pub fn set(&mut self, slot: StateSlot, value: String) {
        match slot {
            StateSlot::ExtractedSkills => self.extracted_skills_json = value,
            StateSlot::ValidatedSkills => self.validated_extracted_skills_json = value,
            StateSlot::ResumeClassifiedSkills => self.resume_classified_skills_json = value,
            StateSlot::JdClassifiedSkills => self.jd_classified_skills_json = value,
            StateSlot::ComparisonResult => self.comparison_result_json = value,
            StateSlot::JudgeFeedback => self.judge_feedback_json = value,
        }
    }
}
