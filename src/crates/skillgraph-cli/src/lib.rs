//! Command-line surface for skillgraph.
//!
//! Everything outside the workflow core lives here: argument parsing, input
//! file handling, credential resolution at the process boundary, prompt
//! templates, fence cleanup, and output files. [`run`] is the binary's
//! entry point; [`execute`] takes an already-built completion model so
//! integration tests can drive the full pipeline with a stub backend.

pub mod fences;
pub mod prompts;

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;

use llm::CompletionConfig;
use skillgraph_core::topology::{self, TopologyFormat};
use skillgraph_core::{CompletionModel, Provider, SkillMatchState, Workflow};

use crate::prompts::AppPrompts;

/// Compare resume skills with a job description.
#[derive(Debug, Parser)]
#[command(name = "skillgraph")]
#[command(about = "Compare resume skills with a job description", version)]
pub struct Cli {
    /// Path to the resume file
    pub resume: Option<PathBuf>,

    /// Path to the job description file
    pub job_description: Option<PathBuf>,

    /// LLM provider to use
    #[arg(short, long, default_value = "openai")]
    pub provider: Provider,

    /// Explicit API key (falls back to the provider's environment variable)
    #[arg(long)]
    pub api_key: Option<String>,

    /// File for the comparison result
    #[arg(short, long, default_value = "result.json")]
    pub output: PathBuf,

    /// File for judge feedback, used only with --judge
    #[arg(short, long, default_value = "feedback.json")]
    pub feedback: PathBuf,

    /// Also run the judge step on the comparison result
    #[arg(short = 'j', long)]
    pub judge: bool,

    /// Print the workflow topology and exit without running it
    #[arg(long)]
    pub print_graph: bool,

    /// Topology format for --print-graph
    #[arg(long, default_value = "mermaid")]
    pub graph_format: TopologyFormat,
}

/// Entry point used by the binary: resolves credentials, builds the real
/// provider client, and hands off to [`execute`].
pub async fn run(cli: Cli) -> Result<()> {
    if cli.print_graph {
        print!("{}", topology::render(cli.graph_format));
        return Ok(());
    }

    let config = CompletionConfig::resolve(cli.provider, cli.api_key.clone())?;
    let model: Arc<dyn CompletionModel> = Arc::from(llm::client_for(cli.provider, config));
    execute(&cli, model).await
}

/// Run the pipeline against the given completion model and write the
/// output files.
pub async fn execute(cli: &Cli, model: Arc<dyn CompletionModel>) -> Result<()> {
    let (Some(resume_path), Some(jd_path)) = (cli.resume.as_ref(), cli.job_description.as_ref())
    else {
        bail!("resume and job_description are required unless --print-graph is given");
    };
    if !resume_path.exists() {
        bail!("file not found: {}", resume_path.display());
    }
    if !jd_path.exists() {
        bail!("file not found: {}", jd_path.display());
    }

    let resume_doc = fs::read_to_string(resume_path)
        .with_context(|| format!("failed to read {}", resume_path.display()))?;
    let job_description_doc = fs::read_to_string(jd_path)
        .with_context(|| format!("failed to read {}", jd_path.display()))?;

    let initial = SkillMatchState::new(cli.provider, cli.judge, resume_doc, job_description_doc);
    let workflow = Workflow::new(model, Arc::new(AppPrompts))?;
    let final_state = workflow.run(initial).await?;

    // The comparison is always written, even when a degraded run left it
    // empty.
    let comparison = fences::strip_code_fence(&final_state.comparison_result_json);
    fs::write(&cli.output, &comparison)
        .with_context(|| format!("failed to write {}", cli.output.display()))?;
    println!("Comparison saved to: {}", cli.output.display());

    let feedback = fences::strip_code_fence(&final_state.judge_feedback_json);
    if cli.judge && !feedback.is_empty() {
        fs::write(&cli.feedback, &feedback)
            .with_context(|| format!("failed to write {}", cli.feedback.display()))?;
        println!("Judge feedback saved to: {}", cli.feedback.display());
    }

    Ok(())
}
