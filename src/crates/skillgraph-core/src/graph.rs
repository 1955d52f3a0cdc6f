//! The workflow's task graph and its scheduler.
//!
//! The graph is a fixed set of named tasks with declared dependencies,
//! not a general-purpose graph builder. The scheduler spawns every ready task
//! (all dependencies completed, gate open) onto a [`JoinSet`], merges each
//! task's partial update back into the state as it finishes, and re-scans
//! for newly ready tasks. The barrier's join therefore holds by
//! construction: a task cannot start until its dependencies' outputs have
//! been merged.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::{debug, info};

use crate::completion::CompletionModel;
use crate::error::{GraphError, Result};
use crate::prompts::PromptSet;
use crate::state::{SkillMatchState, StateSlot};
use crate::steps;

/// Names of the workflow's tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepId {
    ExtractSkills,
    ValidateSkills,
    ClassifyResumeSkills,
    ClassifyJdSkills,
    SyncBarrier,
    CompareSkills,
    Judge,
}

impl StepId {
    /// All steps, in declaration order.
    pub const ALL: [StepId; 7] = [
        StepId::ExtractSkills,
        StepId::ValidateSkills,
        StepId::ClassifyResumeSkills,
        StepId::ClassifyJdSkills,
        StepId::SyncBarrier,
        StepId::CompareSkills,
        StepId::Judge,
    ];

    /// Stable task name, used in logs and topology output.
    pub fn name(self) -> &'static str {
        match self {
            StepId::ExtractSkills => "extract_skills",
            StepId::ValidateSkills => "validate_skills",
            StepId::ClassifyResumeSkills => "classify_resume_skills",
            StepId::ClassifyJdSkills => "classify_jd_skills",
            StepId::SyncBarrier => "sync_barrier",
            StepId::CompareSkills => "compare_skills",
            StepId::Judge => "judge",
        }
    }
}

impl std::fmt::Display for StepId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One row of the task table: a step plus the steps that must complete
/// before it may run.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TaskSpec {
    pub(crate) id: StepId,
    pub(crate) deps: &'static [StepId],
}

/// The fixed task table.
///
/// `extract -> validate -> classify_resume` and `classify_jd` are the two
/// entry branches; `sync_barrier` fans them in; `judge` is additionally
/// gated on the state's `run_judge` flag (see [`Workflow::run`]).
pub(crate) const TASKS: &[TaskSpec] = &[
    TaskSpec {
        id: StepId::ExtractSkills,
        deps: &[],
    },
    TaskSpec {
        id: StepId::ValidateSkills,
        deps: &[StepId::ExtractSkills],
    },
    TaskSpec {
        id: StepId::ClassifyResumeSkills,
        deps: &[StepId::ValidateSkills],
    },
    TaskSpec {
        id: StepId::ClassifyJdSkills,
        deps: &[],
    },
    TaskSpec {
        id: StepId::SyncBarrier,
        deps: &[StepId::ClassifyResumeSkills, StepId::ClassifyJdSkills],
    },
    TaskSpec {
        id: StepId::CompareSkills,
        deps: &[StepId::SyncBarrier],
    },
    TaskSpec {
        id: StepId::Judge,
        deps: &[StepId::CompareSkills],
    },
];

/// The compiled workflow: the task table plus the collaborators every step
/// needs. Construction validates the table; [`Workflow::run`] executes it.
pub struct Workflow {
    model: Arc<dyn CompletionModel>,
    prompts: Arc<dyn PromptSet>,
}

impl Workflow {
    /// Build a workflow around a completion backend and a prompt set.
    pub fn new(model: Arc<dyn CompletionModel>, prompts: Arc<dyn PromptSet>) -> Result<Self> {
        validate(TASKS)?;
        Ok(Self { model, prompts })
    }

    /// Execute the graph to completion and return the final state.
    ///
    /// Ready tasks run concurrently; each receives a snapshot of the state
    /// as of its spawn, which is sound because a task only reads fields its
    /// dependencies have already produced. Step completion failures do not
    /// halt the run (they surface as empty outputs); the only fatal errors
    /// here are scheduler-level join failures.
    pub async fn run(&self, initial: SkillMatchState) -> Result<SkillMatchState> {
        let mut state = initial;
        let mut done: HashSet<StepId> = HashSet::new();
        let mut running: HashSet<StepId> = HashSet::new();
        let mut tasks: JoinSet<(StepId, Option<(StateSlot, String)>)> = JoinSet::new();

        loop {
            for spec in TASKS {
                if done.contains(&spec.id) || running.contains(&spec.id) {
                    continue;
                }
                if !spec.deps.iter().all(|dep| done.contains(dep)) {
                    continue;
                }
                // The one conditional edge: evaluated against the live state
                // once compare_skills has finished.
                if spec.id == StepId::Judge && !state.run_judge {
                    debug!(step = %spec.id, "judge disabled, skipping");
                    done.insert(spec.id);
                    continue;
                }

                debug!(step = %spec.id, "scheduling");
                running.insert(spec.id);
                let id = spec.id;
                let snapshot = state.clone();
                let model = Arc::clone(&self.model);
                let prompts = Arc::clone(&self.prompts);
                tasks.spawn(async move {
                    let update =
                        steps::run_step(id, &snapshot, model.as_ref(), prompts.as_ref()).await;
                    (id, update)
                });
            }

            let Some(joined) = tasks.join_next().await else {
                break;
            };
            let (id, update) = joined.map_err(|e| GraphError::TaskJoin(e.to_string()))?;
            running.remove(&id);
            done.insert(id);
            if let Some((slot, value)) = update {
                state.set(slot, value);
            }
        }

        info!(steps = done.len(), "workflow complete");
        Ok(state)
    }
}

/// Check the task table: every dependency must name a declared task, no
/// task may be declared twice, and the dependency relation must be acyclic.
fn validate(tasks: &[TaskSpec]) -> Result<()> {
    let mut ids = HashSet::new();
    for spec in tasks {
        if !ids.insert(spec.id) {
            return Err(GraphError::validation(format!(
                "task '{}' declared twice",
                spec.id
            )));
        }
    }
    for spec in tasks {
        for dep in spec.deps {
            if !ids.contains(dep) {
                return Err(GraphError::validation(format!(
                    "task '{}' depends on undeclared task '{}'",
                    spec.id, dep
                )));
            }
        }
    }

    // Kahn-style elimination; anything left over is on a cycle.
    let mut remaining: Vec<&TaskSpec> = tasks.iter().collect();
    let mut resolved: HashSet<StepId> = HashSet::new();
    loop {
        let before = remaining.len();
        remaining.retain(|spec| {
            if spec.deps.iter().all(|dep| resolved.contains(dep)) {
                resolved.insert(spec.id);
                false
            } else {
                true
            }
        });
        if remaining.is_empty() {
            return Ok(());
        }
        if remaining.len() == before {
            let stuck: Vec<&str> = remaining.iter().map(|spec| spec.id.name()).collect();
            return Err(GraphError::validation(format!(
                "dependency cycle among: {}",
                stuck.join(", ")
            )));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_table_is_valid() {
        assert!(validate(TASKS).is_ok());
    }

    #[test]
    fn duplicate_task_is_rejected() {
        const DUPED: &[TaskSpec] = &[
            TaskSpec {
                id: StepId::ExtractSkills,
                deps: &[],
            },
            TaskSpec {
                id: StepId::ExtractSkills,
                deps: &[],
            },
        ];
        let err = validate(DUPED).unwrap_err();
        assert!(matches!(err, GraphError::Validation(_)));
    }

    #[test]
    fn undeclared_dependency_is_rejected() {
        const DANGLING: &[TaskSpec] = &[TaskSpec {
            id: StepId::CompareSkills,
            deps: &[StepId::SyncBarrier],
        }];
        let err = validate(DANGLING).unwrap_err();
        assert!(err.to_string().contains("undeclared"));
    }

    #[test]
    fn cycle_is_rejected() {
        const CYCLIC: &[TaskSpec] = &[
            TaskSpec {
                id: StepId::ExtractSkills,
                deps: &[StepId::ValidateSkills],
            },
            TaskSpec {
                id: StepId::ValidateSkills,
                deps: &[StepId::ExtractSkills],
            },
        ];
        let err = validate(CYCLIC).unwrap_err();
        assert!(err.to_string().contains("cycle"));
    }

    #[test]
    fn step_names_are_stable() {
        assert_eq!(StepId::SyncBarrier.name(), "sync_barrier");
        assert_eq!(StepId::Judge.to_string(), "judge");
    }
}
