//! Prompt templates for podgen.
//!
//! Prompts can be customized by placing TOML files in the custom prompts directory.

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Prompts {
    pub dialogue: DialoguePrompts,
    /// Custom variables from config, available in all prompts.
    #[serde(skip)]
    pub variables: HashMap<String, String>,
}

/// Prompts for turning course material into a two-host dialogue.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DialoguePrompts {
    /// Main template. Variables: speakers, title, content, intro_note, length_note.
    pub user: String,
    /// Inserted as intro_note when the document is the course introduction.
    pub intro_note: String,
    /// Inserted as length_note on the first attempt.
    pub length_guideline: String,
    /// Inserted as length_note when regenerating under a hard budget.
    /// Variables: max_tokens, max_chars, max_words.
    pub length_constraint: String,
}

impl Default for DialoguePrompts {
    fn default() -> Self {
        Self {
            user: r#"You are turning technical course material into a natural two-person podcast conversation for senior software engineers.

Hosts:
{{speakers}}

Guidelines:
- Keep the conversation flowing naturally while staying professional and measured
- The second host asks the questions an experienced peer would ask
- The first host explains clearly without being patronizing
- Keep technical accuracy; do not simplify the content away
- Prefer depth on a few points over a shallow list of many
- Ground concepts in real production scenarios and trade-offs
- Avoid hype, marketing language and excessive exclamations{{intro_note}}{{length_note}}

Technical Content Title: {{title}}

Technical Content:
{{content}}

Write the dialogue now. Start every turn with the host's name followed by a colon, one turn per paragraph, and output nothing but the dialogue."#
                .to_string(),

            intro_note: r#"

Special note for this episode:
This is the course introduction. Where the material describes how the course itself was produced with AI tools, let the hosts briefly and naturally acknowledge that they are AI-generated voices discussing AI-generated content. Keep it to one or two exchanges and treat it the way senior engineers would."#
                .to_string(),

            length_guideline: r#"

Length guideline:
Aim for a concise dialogue under 7,000 tokens so it fits within the speech synthesis limits."#
                .to_string(),

            length_constraint: r#"

Hard length requirement:
The dialogue MUST stay under {{max_tokens}} tokens (about {{max_chars}} characters or {{max_words}} words). This limit comes from the speech synthesis API. Keep the most important concepts and tighten the explanations."#
                .to_string(),
        }
    }
}

impl Prompts {
    /// Load prompts from the default location, with optional custom directory and variables.
    pub fn load(
        custom_dir: Option<&str>,
        custom_variables: Option<&HashMap<String, String>>,
    ) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(vars) = custom_variables {
            prompts.variables = vars.clone();
        }

        if let Some(dir) = custom_dir {
            let custom_path = PathBuf::from(shellexpand::tilde(dir).to_string());

            let dialogue_path = custom_path.join("dialogue.toml");
            if dialogue_path.exists() {
                let content = std::fs::read_to_string(&dialogue_path)?;
                prompts.dialogue = toml::from_str(&content)?;
            }
        }

        Ok(prompts)
    }

    /// Render a prompt template with the given variables.
    ///
    /// Substitution is a single pass over the template: placeholders inside
    /// substituted values are left alone, as are unknown placeholders.
    pub fn render(template: &str, vars: &HashMap<String, String>) -> String {
        let placeholder = Regex::new(r"\{\{(\w+)\}\}").expect("Invalid regex");
        placeholder
            .replace_all(template, |caps: &Captures| match vars.get(&caps[1]) {
                Some(value) => value.clone(),
                None => caps[0].to_string(),
            })
            .into_owned()
    }

    /// Render a prompt template with both provided variables and custom config variables.
    /// Provided variables take precedence over custom config variables.
    pub fn render_with_custom(&self, template: &str, vars: &HashMap<String, String>) -> String {
        let mut merged = self.variables.clone();
        for (key, value) in vars {
            merged.insert(key.clone(), value.clone());
        }
        Self::render(template, &merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prompts() {
        let prompts = Prompts::default();
        assert!(prompts.dialogue.user.contains("{{content}}"));
        assert!(prompts.dialogue.length_constraint.contains("{{max_tokens}}"));
    }

    #[test]
    fn test_render_template() {
        let template = "Hello {{name}}, you have {{count}} messages.";
        let mut vars = HashMap::new();
        vars.insert("name".to_string(), "Alice".to_string());
        vars.insert("count".to_string(), "5".to_string());

        let result = Prompts::render(template, &vars);
        assert_eq!(result, "Hello Alice, you have 5 messages.");
    }

    #[test]
    fn test_render_leaves_placeholders_in_values() {
        let mut vars = HashMap::new();
        vars.insert("title".to_string(), "Prompting".to_string());
        vars.insert("content".to_string(), "Use {{title}} and {{length_note}} slots.".to_string());
        vars.insert("length_note".to_string(), " (short)".to_string());

        let result = Prompts::render("{{title}}{{length_note}}: {{content}} {{unknown}}", &vars);
        assert_eq!(
            result,
            "Prompting (short): Use {{title}} and {{length_note}} slots. {{unknown}}"
        );
    }

    #[test]
    fn test_provided_vars_override_custom() {
        let mut prompts = Prompts::default();
        prompts.variables.insert("course".to_string(), "Rust 101".to_string());
        prompts.variables.insert("title".to_string(), "ignored".to_string());

        let mut vars = HashMap::new();
        vars.insert("title".to_string(), "Ownership".to_string());

        let result = prompts.render_with_custom("{{course}}: {{title}}", &vars);
        assert_eq!(result, "Rust 101: Ownership");
    }

    #[test]
    fn test_load_custom_dialogue_prompt() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("dialogue.toml"),
            "user = \"Talk about {{title}}\"\n",
        )
        .unwrap();

        let prompts = Prompts::load(dir.path().to_str(), None).unwrap();
        assert_eq!(prompts.dialogue.user, "Talk about {{title}}");
        // Unspecified fields keep their defaults
        assert!(!prompts.dialogue.intro_note.is_empty());
    }
}
