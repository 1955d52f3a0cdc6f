//! Scheduler behavior tests: fan-out, barrier join, the conditional judge
//! edge, and soft failure of individual steps.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use skillgraph_core::{
    CompletionModel, GraphError, PromptSet, Provider, SkillMatchState, Workflow,
};

/// Tags each prompt with its step so the model can answer per step and the
/// tests can inspect exactly what each step was given.
struct TagPrompts;

impl PromptSet for TagPrompts {
    fn extract(&self, resume: &str) -> String {
        format!("extract|{resume}")
    }
    fn validate(&self, resume: &str, extracted_skills: &str) -> String {
        format!("validate|{resume}|{extracted_skills}")
    }
    fn classify(&self, skills: &str) -> String {
        format!("classify|{skills}")
    }
    fn compare(&self, candidate_skills: &str, jd_skills: &str) -> String {
        format!("compare|{candidate_skills}|{jd_skills}")
    }
    fn judge(&self, comparison: &str) -> String {
        format!("judge|{comparison}")
    }
}

/// Records every prompt it sees and answers deterministically per tag.
/// Optional per-tag delays let tests skew the two branches' timing.
#[derive(Default)]
struct ScriptedModel {
    calls: Mutex<Vec<String>>,
    delay_extract: Duration,
    delay_classify_jd: Duration,
}

impl ScriptedModel {
    fn recorded(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionModel for ScriptedModel {
    async fn complete(&self, prompt: &str) -> skillgraph_core::Result<String> {
        self.calls.lock().unwrap().push(prompt.to_string());

        if prompt.starts_with("extract|") && !self.delay_extract.is_zero() {
            tokio::time::sleep(self.delay_extract).await;
        }
        if prompt.starts_with("classify|jd:") && !self.delay_classify_jd.is_zero() {
            tokio::time::sleep(self.delay_classify_jd).await;
        }

        let reply = if prompt.starts_with("extract|") {
            "EXTRACTED".to_string()
        } else if prompt.starts_with("validate|") {
            "VALIDATED".to_string()
        } else if let Some(input) = prompt.strip_prefix("classify|") {
            format!("CLASSIFIED[{input}]")
        } else if prompt.starts_with("compare|") {
            "COMPARED".to_string()
        } else if prompt.starts_with("judge|") {
            "JUDGED".to_string()
        } else {
            panic!("unexpected prompt: {prompt}");
        };
        Ok(reply)
    }
}

/// Fails every call, exercising the soft-failure path end to end.
struct DownModel;

#[async_trait]
impl CompletionModel for DownModel {
    async fn complete(&self, _prompt: &str) -> skillgraph_core::Result<String> {
        Err(GraphError::Completion("backend down".to_string()))
    }
}

fn initial(run_judge: bool) -> SkillMatchState {
    SkillMatchState::new(Provider::Gemini, run_judge, "resume text", "jd: Rust, SQL")
}

fn workflow(model: Arc<ScriptedModel>) -> Workflow {
    Workflow::new(model, Arc::new(TagPrompts)).unwrap()
}

#[tokio::test]
async fn run_populates_every_slot_in_dependency_order() {
    let model = Arc::new(ScriptedModel::default());
    let wf = workflow(Arc::clone(&model));

    let state = wf.run(initial(true)).await.unwrap();

    assert_eq!(state.extracted_skills_json, "EXTRACTED");
    assert_eq!(state.validated_extracted_skills_json, "VALIDATED");
    assert_eq!(state.resume_classified_skills_json, "CLASSIFIED[VALIDATED]");
    assert_eq!(state.jd_classified_skills_json, "CLASSIFIED[jd: Rust, SQL]");
    assert_eq!(state.comparison_result_json, "COMPARED");
    assert_eq!(state.judge_feedback_json, "JUDGED");

    // The comparison was built from both branches' final outputs, so the
    // barrier cannot have released it early.
    let calls = model.recorded();
    let compare = calls.iter().find(|c| c.starts_with("compare|")).unwrap();
    assert_eq!(
        compare,
        "compare|CLASSIFIED[VALIDATED]|CLASSIFIED[jd: Rust, SQL]"
    );
}

#[tokio::test]
async fn compare_runs_after_both_classifications() {
    let model = Arc::new(ScriptedModel::default());
    let wf = workflow(Arc::clone(&model));

    wf.run(initial(false)).await.unwrap();

    let calls = model.recorded();
    let pos = |prefix: &str| calls.iter().position(|c| c.starts_with(prefix)).unwrap();
    let compare_at = pos("compare|");
    assert!(pos("classify|VALIDATED") < compare_at);
    assert!(pos("classify|jd:") < compare_at);
}

#[tokio::test(start_paused = true)]
async fn barrier_waits_for_a_slow_jd_branch() {
    let model = Arc::new(ScriptedModel {
        delay_classify_jd: Duration::from_secs(30),
        ..Default::default()
    });
    let wf = workflow(Arc::clone(&model));

    let state = wf.run(initial(false)).await.unwrap();

    // Even though the resume branch finished long before the JD branch, the
    // comparison saw both outputs.
    assert_eq!(state.comparison_result_json, "COMPARED");
    let calls = model.recorded();
    let compare = calls.iter().find(|c| c.starts_with("compare|")).unwrap();
    assert!(compare.contains("CLASSIFIED[jd: Rust, SQL]"));
    assert!(compare.contains("CLASSIFIED[VALIDATED]"));
}

#[tokio::test(start_paused = true)]
async fn barrier_waits_for_a_slow_resume_branch() {
    let model = Arc::new(ScriptedModel {
        delay_extract: Duration::from_secs(30),
        ..Default::default()
    });
    let wf = workflow(Arc::clone(&model));

    let state = wf.run(initial(false)).await.unwrap();

    assert_eq!(state.resume_classified_skills_json, "CLASSIFIED[VALIDATED]");
    let calls = model.recorded();
    let compare = calls.iter().find(|c| c.starts_with("compare|")).unwrap();
    assert!(compare.contains("CLASSIFIED[VALIDATED]"));
}

#[tokio::test]
async fn judge_is_skipped_when_disabled() {
    let model = Arc::new(ScriptedModel::default());
    let wf = workflow(Arc::clone(&model));

    let state = wf.run(initial(false)).await.unwrap();

    assert!(state.judge_feedback_json.is_empty());
    assert!(!model.recorded().iter().any(|c| c.starts_with("judge|")));
}

#[tokio::test]
async fn judge_receives_the_comparison_when_enabled() {
    let model = Arc::new(ScriptedModel::default());
    let wf = workflow(Arc::clone(&model));

    let state = wf.run(initial(true)).await.unwrap();

    assert_eq!(state.judge_feedback_json, "JUDGED");
    let calls = model.recorded();
    let judge = calls.iter().find(|c| c.starts_with("judge|")).unwrap();
    assert_eq!(judge, "judge|COMPARED");
}

#[tokio::test]
async fn failing_backend_degrades_but_never_aborts() {
    let wf = Workflow::new(Arc::new(DownModel), Arc::new(TagPrompts)).unwrap();

    let state = wf.run(initial(true)).await.unwrap();

    assert!(state.extracted_skills_json.is_empty());
    assert!(state.validated_extracted_skills_json.is_empty());
    assert!(state.resume_classified_skills_json.is_empty());
    assert!(state.jd_classified_skills_json.is_empty());
    assert!(state.comparison_result_json.is_empty());
    assert!(state.judge_feedback_json.is_empty());
    // Inputs are untouched by the degraded run.
    assert_eq!(state.resume_doc, "resume text");
}
