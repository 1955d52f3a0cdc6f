//! The seven workflow steps.
//!
//! Each step reads a declared subset of the state, builds a prompt through
//! the supplied [`PromptSet`], calls the [`CompletionModel`], and binds the
//! result to exactly one state slot. A completion failure does not abort
//! the run: the step logs it and writes the empty-string sentinel, and every
//! step tolerates empty values in the fields it reads.

use tracing::{info, warn};

use crate::completion::CompletionModel;
use crate::graph::StepId;
use crate::prompts::PromptSet;
use crate::state::{SkillMatchState, StateSlot};

/// Sentinel handed to the judge when the comparison slot is empty.
const EMPTY_COMPARISON: &str = "{}";

/// Execute one step against a state snapshot.
///
/// Returns the step's slot write, or `None` for the barrier (which exists
/// only to join the two branches and has no state effect).
pub async fn run_step(
    step: StepId,
    state: &SkillMatchState,
    model: &dyn CompletionModel,
    prompts: &dyn PromptSet,
) -> Option<(StateSlot, String)> {
    match step {
        StepId::ExtractSkills => {
            let prompt = prompts.extract(&state.resume_doc);
            Some((
                StateSlot::ExtractedSkills,
                complete_or_empty(step, model, &prompt).await,
            ))
        }
        StepId::ValidateSkills => {
            let prompt = prompts.validate(&state.resume_doc, &state.extracted_skills_json);
            Some((
                StateSlot::ValidatedSkills,
                complete_or_empty(step, model, &prompt).await,
            ))
        }
        StepId::ClassifyResumeSkills => {
            let prompt = prompts.classify(&state.validated_extracted_skills_json);
            Some((
                StateSlot::ResumeClassifiedSkills,
                complete_or_empty(step, model, &prompt).await,
            ))
        }
        StepId::ClassifyJdSkills => {
            let prompt = prompts.classify(&state.job_description_doc);
            Some((
                StateSlot::JdClassifiedSkills,
                complete_or_empty(step, model, &prompt).await,
            ))
        }
        StepId::SyncBarrier => {
            info!(step = %step, "both branches complete");
            None
        }
        StepId::CompareSkills => {
            let prompt = prompts.compare(
                &state.resume_classified_skills_json,
                &state.jd_classified_skills_json,
            );
            Some((
                StateSlot::ComparisonResult,
                complete_or_empty(step, model, &prompt).await,
            ))
        }
        StepId::Judge => {
            let comparison = if state.comparison_result_json.is_empty() {
                EMPTY_COMPARISON
            } else {
                state.comparison_result_json.as_str()
            };
            let prompt = prompts.judge(comparison);
            Some((
                StateSlot::JudgeFeedback,
                complete_or_empty(step, model, &prompt).await,
            ))
        }
    }
}

async fn complete_or_empty(step: StepId, model: &dyn CompletionModel, prompt: &str) -> String {
    match model.complete(prompt).await {
        Ok(text) => {
            info!(step = %step, "step complete");
            text
        }
        Err(error) => {
            warn!(step = %step, %error, "completion failed, continuing with empty output");
            String::new()
        }
    }
}
