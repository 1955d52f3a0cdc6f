//! The application's prompt templates.
//!
//! Every template asks for bare JSON; models wrap it in markdown fences
//! often enough that the output path runs everything through
//! [`crate::fences::strip_code_fence`] anyway.

use skillgraph_core::PromptSet;

/// Production prompt set for the skill-matching workflow.
pub struct AppPrompts;

impl PromptSet for AppPrompts {
    fn extract(&self, resume: &str) -> String {
        format!(
            "Extract every skill mentioned in the resume below, including \
             technical skills, tools, and soft skills.\n\n\
             Resume:\n{resume}\n\n\
             Return only a JSON object of the form {{\"skills\": [\"...\"]}} \
             listing each skill once. No prose, no explanations."
        )
    }

    fn validate(&self, resume: &str, extracted_skills: &str) -> String {
        format!(
            "Review the extracted skill list against the resume it came from. \
             Remove anything not actually present in the resume and add \
             anything that was missed.\n\n\
             Resume:\n{resume}\n\n\
             Extracted skills:\n{extracted_skills}\n\n\
             Return only the corrected JSON object of the form \
             {{\"skills\": [\"...\"]}}."
        )
    }

    fn classify(&self, skills: &str) -> String {
        format!(
            "Classify each skill in the input below as either \"hard\" \
             (technical, tool, or domain knowledge) or \"soft\" \
             (interpersonal or organizational).\n\n\
             Input:\n{skills}\n\n\
             Return only a JSON object of the form \
             {{\"hard\": [\"...\"], \"soft\": [\"...\"]}}."
        )
    }

    fn compare(&self, candidate_skills: &str, jd_skills: &str) -> String {
        format!(
            "Compare the candidate's classified skills with the skills \
             required by the job description.\n\n\
             Candidate skills:\n{candidate_skills}\n\n\
             Job description skills:\n{jd_skills}\n\n\
             Return only a JSON object of the form {{\"matched\": [\"...\"], \
             \"missing\": [\"...\"], \"extra\": [\"...\"]}} where \"missing\" \
             lists requirements the candidate lacks and \"extra\" lists \
             candidate skills the job does not ask for."
        )
    }

    fn judge(&self, comparison: &str) -> String {
        format!(
            "Assess the quality of the following skill comparison. Point out \
             wrong matches, duplicated skills, and requirements that were \
             overlooked.\n\n\
             Comparison:\n{comparison}\n\n\
             Return only a JSON object of the form {{\"score\": 1, \
             \"issues\": [\"...\"]}} where score is an integer from 1 to 5."
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn templates_embed_their_inputs() {
        let prompts = AppPrompts;
        assert!(prompts.extract("Rust, SQL").contains("Rust, SQL"));
        assert!(prompts.validate("resume body", "[\"Rust\"]").contains("resume body"));
        assert!(prompts.validate("resume body", "[\"Rust\"]").contains("[\"Rust\"]"));
        assert!(prompts.classify("[\"Rust\"]").contains("[\"Rust\"]"));
        let compare = prompts.compare("{\"hard\": []}", "{\"soft\": []}");
        assert!(compare.contains("{\"hard\": []}"));
        assert!(compare.contains("{\"soft\": []}"));
        assert!(prompts.judge("{}").contains("{}"));
    }

    #[test]
    fn templates_are_pure() {
        let prompts = AppPrompts;
        assert_eq!(prompts.extract("same"), prompts.extract("same"));
        assert_eq!(prompts.classify("same"), prompts.classify("same"));
    }
}
