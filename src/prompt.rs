/// Heading placed between the system prompts and the tool descriptions.
pub const TOOLS_HEADER: &str = "\n## Available Tools\n\n";

const SEPARATOR: &str = "\n\n";

/// Accumulates system prompts and tool descriptions into one instruction block.
///
/// Text is inserted verbatim. Callers are trusted not to inject conflicting
/// headings.
///
/// # Examples
///
/// ```
/// use tandem_llm::prompt::PromptComposer;
///
/// let mut composer = PromptComposer::default();
/// composer.add_system_prompt("Be terse.");
/// composer.add_system_prompt("Answer in English.");
/// composer.set_tools(vec!["search(query)".to_string()]);
/// assert_eq!(
///     composer.compose(),
///     "Be terse.\n\nAnswer in English.\n## Available Tools\n\nsearch(query)"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptComposer {
    system_prompts: Vec<String>,
    tools: Vec<String>,
}

impl PromptComposer {
    pub fn add_system_prompt(&mut self, prompt: impl Into<String>) {
        self.system_prompts.push(prompt.into());
    }

    /// Replaces the whole tool list.
    pub fn set_tools(&mut self, tools: Vec<String>) {
        self.tools = tools;
    }

    pub fn system_prompts(&self) -> &[String] {
        &self.system_prompts
    }

    pub fn tools(&self) -> &[String] {
        &self.tools
    }

    pub fn compose(&self) -> String {
        let mut composed = self.system_prompts.join(SEPARATOR);
        if !self.tools.is_empty() {
            composed.push_str(TOOLS_HEADER);
            composed.push_str(&self.tools.join(SEPARATOR));
        }
        composed
    }

    /// The composed text when it holds anything other than whitespace.
    pub fn instruction(&self) -> Option<String> {
        let composed = self.compose();
        if composed.trim().is_empty() {
            None
        } else {
            Some(composed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_composer_yields_no_instruction() {
        let composer = PromptComposer::default();
        assert_eq!(composer.compose(), "");
        assert_eq!(composer.instruction(), None);
    }

    #[test]
    fn blank_prompts_yield_no_instruction() {
        let mut composer = PromptComposer::default();
        composer.add_system_prompt("");
        composer.add_system_prompt("");
        assert_eq!(composer.compose(), "\n\n");
        assert_eq!(composer.instruction(), None);
    }

    #[test]
    fn tools_alone_still_get_the_header() {
        let mut composer = PromptComposer::default();
        composer.set_tools(vec!["tool A docs".to_string(), "tool B docs".to_string()]);
        assert_eq!(
            composer.compose(),
            "\n## Available Tools\n\ntool A docs\n\ntool B docs"
        );
        assert!(composer.instruction().is_some());
    }

    #[test]
    fn set_tools_replaces_previous_list() {
        let mut composer = PromptComposer::default();
        composer.add_system_prompt("Be terse.");
        composer.set_tools(vec!["old".to_string()]);
        composer.set_tools(vec!["new".to_string()]);
        assert_eq!(composer.compose(), "Be terse.\n## Available Tools\n\nnew");

        composer.set_tools(Vec::new());
        assert_eq!(composer.compose(), "Be terse.");
    }

    #[test]
    fn composing_is_repeatable() {
        let mut composer = PromptComposer::default();
        composer.add_system_prompt("a");
        composer.set_tools(vec!["t".to_string()]);
        assert_eq!(composer.compose(), composer.compose());
        assert_eq!(composer.system_prompts(), ["a".to_string()]);
        assert_eq!(composer.tools(), ["t".to_string()]);
    }
}
