//! Configuration module for podgen.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{DialoguePrompts, Prompts};
pub use settings::{
    BatchSettings, ChunkingSettings, DialogueSettings, GeminiSettings, GeneralSettings,
    PathSettings, PromptSettings, RetrySettings, Settings, SpeakerVoice, SynthesisSettings,
};
