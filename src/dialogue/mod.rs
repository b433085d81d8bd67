//! Dialogue generation from course material.
//!
//! A generator turns a rendered prompt into a two-host dialogue. Prompt
//! building lives here too so that every implementation sees the same
//! template variables.

mod gemini;

pub use gemini::GeminiDialogueGenerator;

use crate::config::{Prompts, SpeakerVoice};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;

/// Trait for dialogue generation services.
#[async_trait]
pub trait DialogueGenerator: Send + Sync {
    /// Generate a dialogue for a fully rendered prompt.
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Model name recorded in script frontmatter.
    fn model(&self) -> &str;
}

/// Document stem that marks the course introduction.
const INTRO_TITLE: &str = "intro";

/// Renders the dialogue prompt for one course document.
pub struct DialoguePromptBuilder<'a> {
    prompts: &'a Prompts,
    speakers: &'a [SpeakerVoice],
}

impl<'a> DialoguePromptBuilder<'a> {
    pub fn new(prompts: &'a Prompts, speakers: &'a [SpeakerVoice]) -> Self {
        Self { prompts, speakers }
    }

    /// Build the prompt for `title`/`content`.
    ///
    /// With `max_tokens` set the prompt carries the hard length constraint,
    /// otherwise the soft guideline.
    pub fn build(&self, title: &str, content: &str, max_tokens: Option<u32>) -> String {
        let templates = &self.prompts.dialogue;

        let length_note = match max_tokens {
            Some(tokens) => {
                let mut vars = HashMap::new();
                vars.insert("max_tokens".to_string(), tokens.to_string());
                vars.insert("max_chars".to_string(), (tokens as u64 * 4).to_string());
                vars.insert("max_words".to_string(), (tokens as u64 * 3 / 4).to_string());
                Prompts::render(&templates.length_constraint, &vars)
            }
            None => templates.length_guideline.clone(),
        };

        let intro_note = if title == INTRO_TITLE {
            templates.intro_note.clone()
        } else {
            String::new()
        };

        let speakers = self
            .speakers
            .iter()
            .map(|s| format!("- {}: {}", s.speaker, s.role))
            .collect::<Vec<_>>()
            .join("\n");

        let mut vars = HashMap::new();
        vars.insert("speakers".to_string(), speakers);
        vars.insert("title".to_string(), title.to_string());
        vars.insert("content".to_string(), content.to_string());
        vars.insert("intro_note".to_string(), intro_note);
        vars.insert("length_note".to_string(), length_note);

        self.prompts.render_with_custom(&templates.user, &vars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn voices() -> Vec<SpeakerVoice> {
        vec![
            SpeakerVoice::new("Alex", "Kore", "Instructor"),
            SpeakerVoice::new("Sam", "Charon", "Senior Engineer"),
        ]
    }

    #[test]
    fn test_build_prompt_with_guideline() {
        let prompts = Prompts::default();
        let voices = voices();
        let prompt = DialoguePromptBuilder::new(&prompts, &voices).build(
            "ownership",
            "Borrowing rules...",
            None,
        );

        assert!(prompt.contains("- Alex: Instructor\n- Sam: Senior Engineer"));
        assert!(prompt.contains("Technical Content Title: ownership"));
        assert!(prompt.contains("Borrowing rules..."));
        assert!(prompt.contains("Length guideline"));
        assert!(!prompt.contains("Hard length requirement"));
        assert!(!prompt.contains("course introduction"));
        assert!(!prompt.contains("{{"));
    }

    #[test]
    fn test_build_prompt_with_budget() {
        let prompts = Prompts::default();
        let voices = voices();
        let prompt = DialoguePromptBuilder::new(&prompts, &voices).build("intro", "Welcome", Some(6000));

        assert!(prompt.contains("under 6000 tokens (about 24000 characters or 4500 words)"));
        assert!(prompt.contains("course introduction"));
        assert!(!prompt.contains("Length guideline"));
    }

    #[test]
    fn test_content_placeholders_pass_through() {
        let prompts = Prompts::default();
        let voices = voices();
        let content = "Write prompts like {{title}} and {{length_note}}.";
        let prompt = DialoguePromptBuilder::new(&prompts, &voices).build("lesson", content, None);

        assert!(prompt.contains("Technical Content:\nWrite prompts like {{title}} and {{length_note}}.\n"));
        assert_eq!(prompt.matches("Length guideline").count(), 1);
    }
}
