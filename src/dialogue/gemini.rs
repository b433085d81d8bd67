//! Gemini text-model dialogue generator.

use super::DialogueGenerator;
use crate::error::{PodgenError, Result};
use crate::gemini::GeminiClient;
use crate::script::extract_dialogue;
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Dialogue generator backed by a Gemini text model.
pub struct GeminiDialogueGenerator {
    client: GeminiClient,
    model: String,
}

impl GeminiDialogueGenerator {
    pub fn new(client: GeminiClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }
}

#[async_trait]
impl DialogueGenerator for GeminiDialogueGenerator {
    #[instrument(skip(self, prompt), fields(model = %self.model))]
    async fn generate(&self, prompt: &str) -> Result<String> {
        let response = self.client.generate_text(&self.model, prompt).await?;
        let dialogue = extract_dialogue(&response);

        if dialogue.is_empty() {
            return Err(PodgenError::Dialogue("model returned an empty dialogue".into()));
        }

        debug!("Generated dialogue of {} chars", dialogue.len());
        Ok(dialogue)
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generator_model() {
        let client = GeminiClient::new("test-key".to_string()).unwrap();
        let generator = GeminiDialogueGenerator::new(client, "gemini-2.5-flash");
        assert_eq!(generator.model(), "gemini-2.5-flash");
    }
}
