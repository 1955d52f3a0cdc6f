//! Rendering of the workflow topology.
//!
//! Used by the CLI's `--print-graph` flag to show the graph without running
//! it. Two formats: Mermaid (for docs and browsers) and ASCII (for quick
//! terminal inspection). The edge list is derived from the task table in
//! [`crate::graph`], with the conditional tail after `compare_skills`
//! rendered with its branch labels.

use crate::error::GraphError;
use crate::graph::{StepId, TASKS};

/// Pseudo-node names for the graph's entry and exit.
pub const START: &str = "START";
pub const END: &str = "END";

/// Output format for [`render`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopologyFormat {
    Mermaid,
    Ascii,
}

impl std::str::FromStr for TopologyFormat {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mermaid" => Ok(TopologyFormat::Mermaid),
            "ascii" => Ok(TopologyFormat::Ascii),
            other => Err(GraphError::validation(format!(
                "unknown topology format '{other}' (expected 'mermaid' or 'ascii')"
            ))),
        }
    }
}

/// One directed edge of the rendered graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub from: &'static str,
    pub to: &'static str,
    /// Branch label on the conditional edges after `compare_skills`.
    pub label: Option<&'static str>,
}

/// The full edge list, START and END included.
pub fn edges() -> Vec<Edge> {
    let mut edges = Vec::new();
    for spec in TASKS {
        // The conditional tail is emitted explicitly below.
        if spec.id == StepId::Judge {
            continue;
        }
        if spec.deps.is_empty() {
            edges.push(Edge {
                from: START,
                to: spec.id.name(),
                label: None,
            });
        }
        for dep in spec.deps {
            edges.push(Edge {
                from: dep.name(),
                to: spec.id.name(),
                label: None,
            });
        }
    }
    edges.push(Edge {
        from: StepId::CompareSkills.name(),
        to: StepId::Judge.name(),
        label: Some("run_judge"),
    });
    edges.push(Edge {
        from: StepId::CompareSkills.name(),
        to: END,
        label: Some("otherwise"),
    });
    edges.push(Edge {
        from: StepId::Judge.name(),
        to: END,
        label: None,
    });
    edges
}

/// Render the topology in the requested format.
pub fn render(format: TopologyFormat) -> String {
    match format {
        TopologyFormat::Mermaid => to_mermaid(),
        TopologyFormat::Ascii => to_ascii(),
    }
}

fn to_mermaid() -> String {
    let mut out = String::from("graph TD\n");
    out.push_str(&format!("    {START}(({START}))\n"));
    for step in StepId::ALL {
        out.push_str(&format!("    {0}[{0}]\n", step.name()));
    }
    out.push_str(&format!("    {END}(({END}))\n"));
    for edge in edges() {
        match edge.label {
            Some(label) => {
                out.push_str(&format!("    {} -->|{}| {}\n", edge.from, label, edge.to))
            }
            None => out.push_str(&format!("    {} --> {}\n", edge.from, edge.to)),
        }
    }
    out
}

fn to_ascii() -> String {
    let mut out = String::new();
    for edge in edges() {
        match edge.label {
            Some(label) => out.push_str(&format!("{} -> {}  [{}]\n", edge.from, edge.to, label)),
            None => out.push_str(&format!("{} -> {}\n", edge.from, edge.to)),
        }
    }
    out
}
