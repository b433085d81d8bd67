//! Speech synthesis for dialogue chunks.
//!
//! A synthesizer turns one chunk of dialogue into headerless 16-bit mono PCM
//! at 24 kHz, and can count how many input tokens the chunk costs.

mod gemini;

pub use gemini::GeminiSynthesizer;

use crate::error::Result;
use async_trait::async_trait;

/// Trait for speech synthesis services.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Count input tokens the synthesis model would charge for `text`.
    async fn count_tokens(&self, text: &str) -> Result<u32>;

    /// Synthesize multi-speaker audio for `text` as raw PCM.
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>>;
}
