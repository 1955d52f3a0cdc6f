//! Markdown fence cleanup for LLM output.

/// Strip a wrapping markdown code fence from LLM output.
///
/// Trims the input, removes one leading fence marker line (a bare or
/// language-tagged triple backtick) and one trailing triple-backtick
/// marker, and passes anything else through trimmed. Applying it to
/// already-stripped text changes nothing.
pub fn strip_code_fence(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let trimmed = text.trim();
    if !trimmed.starts_with("```") {
        return trimmed.to_string();
    }
    let body = match trimmed.find('\n') {
        Some(pos) => &trimmed[pos + 1..],
        None => trimmed,
    };
    let body = match body.strip_suffix("```") {
        Some(inner) => inner.trim_end(),
        None => body,
    };
    body.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_a_json_fence() {
        let fenced = "```json\n{\"skills\": []}\n```";
        assert_eq!(strip_code_fence(fenced), "{\"skills\": []}");
    }

    #[test]
    fn strips_a_bare_fence() {
        let fenced = "```\n{\"skills\": []}\n```";
        assert_eq!(strip_code_fence(fenced), "{\"skills\": []}");
    }

    #[test]
    fn unfenced_text_passes_through_trimmed() {
        assert_eq!(strip_code_fence("  {\"a\": 1}  \n"), "{\"a\": 1}");
        assert_eq!(strip_code_fence("plain text"), "plain text");
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(strip_code_fence(""), "");
    }

    #[test]
    fn missing_trailing_marker_only_drops_the_fence_line() {
        assert_eq!(strip_code_fence("```json\n{\"a\": 1}"), "{\"a\": 1}");
    }

    #[test]
    fn stripping_is_idempotent() {
        let inputs = [
            "```json\n{\"skills\": [\"Python\"]}\n```",
            "```\nsome text\n```",
            "{\"skills\": []}",
            "  padded  ",
            "",
        ];
        for input in inputs {
            let once = strip_code_fence(input);
            assert_eq!(strip_code_fence(&once), once, "not idempotent for {input:?}");
        }
    }
}
