//! Dialogue chunking for speech synthesis.
//!
//! The TTS model caps how much audio a single request may produce, so long
//! dialogues are split into chunks whose estimated spoken duration stays near
//! a target. Splits happen only where a new speaker turn begins, except when
//! a chunk runs past the hard ceiling.

mod speaker;

pub use speaker::{Chunks, SpeakerTurnChunker};

use serde::{Deserialize, Serialize};

/// A contiguous run of dialogue lines synthesized in one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogueChunk {
    /// Lines of this chunk joined with `\n`.
    pub text: String,
    /// Estimated spoken duration in seconds.
    pub estimated_seconds: f64,
    /// Position of this chunk in the dialogue.
    pub order: usize,
    /// True when the hard ceiling closed this chunk, possibly mid-turn.
    pub forced_split: bool,
}

impl DialogueChunk {
    /// Format the estimated duration for display.
    pub fn format_duration(&self) -> String {
        format!("{:.1} min", self.estimated_seconds / 60.0)
    }
}

/// Configuration for chunking.
#[derive(Debug, Clone)]
pub struct ChunkingConfig {
    /// Soft ceiling in seconds.
    pub target_seconds: f64,
    /// Hard ceiling in seconds.
    pub max_seconds: f64,
    /// Assumed speaking rate.
    pub chars_per_minute: f64,
    /// Speaker labels that start a turn.
    pub speakers: Vec<String>,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            target_seconds: 300.0,
            max_seconds: 600.0,
            chars_per_minute: 750.0,
            speakers: vec!["Alex".to_string(), "Sam".to_string()],
        }
    }
}

/// Estimate spoken duration of text in seconds.
///
/// Roughly 150 words per minute at five characters per word gives the
/// default rate of 750 characters per minute.
pub fn estimate_duration(text: &str, chars_per_minute: f64) -> f64 {
    chars_to_seconds(text.chars().count(), chars_per_minute)
}

fn chars_to_seconds(chars: usize, chars_per_minute: f64) -> f64 {
    if chars_per_minute <= 0.0 {
        return 0.0;
    }
    chars as f64 / chars_per_minute * 60.0
}

/// Split dialogue into chunks with the given configuration.
pub fn chunk_dialogue(text: &str, config: &ChunkingConfig) -> Vec<DialogueChunk> {
    SpeakerTurnChunker::new(config.clone()).chunks(text).collect()
}

/// Join chunk texts back into the dialogue they were cut from.
pub fn join_chunks(chunks: &[DialogueChunk]) -> String {
    chunks
        .iter()
        .map(|c| c.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_duration() {
        let text = "a".repeat(750);
        assert_eq!(estimate_duration(&text, 750.0), 60.0);
        assert_eq!(estimate_duration("", 750.0), 0.0);
        assert_eq!(estimate_duration("abc", 0.0), 0.0);
    }

    #[test]
    fn test_format_duration() {
        let chunk = DialogueChunk {
            text: String::new(),
            estimated_seconds: 90.0,
            order: 0,
            forced_split: false,
        };
        assert_eq!(chunk.format_duration(), "1.5 min");
    }
}
