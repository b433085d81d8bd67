//! Gemini multi-speaker TTS implementation.

use super::SpeechSynthesizer;
use crate::config::{SpeakerVoice, SynthesisSettings};
use crate::error::Result;
use crate::gemini::{extract_inline_audio, speech_request_body, GeminiClient};
use async_trait::async_trait;
use base64::Engine;
use tracing::{debug, instrument};

/// Gemini TTS-backed synthesizer.
pub struct GeminiSynthesizer {
    client: GeminiClient,
    model: String,
    voices: Vec<SpeakerVoice>,
}

impl GeminiSynthesizer {
    /// Create a synthesizer with the default model and voices.
    pub fn new(client: GeminiClient) -> Self {
        Self::with_config(client, &SynthesisSettings::default())
    }

    /// Create a synthesizer from synthesis settings.
    pub fn with_config(client: GeminiClient, settings: &SynthesisSettings) -> Self {
        Self {
            client,
            model: settings.model.clone(),
            voices: settings.voices.clone(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl SpeechSynthesizer for GeminiSynthesizer {
    async fn count_tokens(&self, text: &str) -> Result<u32> {
        self.client.count_tokens(&self.model, text).await
    }

    #[instrument(skip(self, text), fields(model = %self.model, text_len = text.len()))]
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>> {
        let body = speech_request_body(text, &self.voices);
        let response = self.client.generate_content(&self.model, &body).await?;

        let data = extract_inline_audio(&response)?;
        let pcm = base64::engine::general_purpose::STANDARD.decode(data)?;

        debug!("Received {} bytes of PCM", pcm.len());
        Ok(pcm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthesizer_config() {
        let client = GeminiClient::new("test-key".to_string()).unwrap();
        let settings = SynthesisSettings {
            model: "test-tts".to_string(),
            ..Default::default()
        };
        let synthesizer = GeminiSynthesizer::with_config(client, &settings);
        assert_eq!(synthesizer.model(), "test-tts");
        assert_eq!(synthesizer.voices.len(), 2);
    }
}
