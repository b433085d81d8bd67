//! Configuration settings for podgen.

use crate::chunking::ChunkingConfig;
use crate::retry::RetryPolicy;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub gemini: GeminiSettings,
    pub synthesis: SynthesisSettings,
    pub dialogue: DialogueSettings,
    pub chunking: ChunkingSettings,
    pub retry: RetrySettings,
    pub batch: BatchSettings,
    pub paths: PathSettings,
    pub prompts: PromptSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Log level used when no -v flag or RUST_LOG is given.
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
        }
    }
}

/// Gemini API connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiSettings {
    /// API key. Environment variables take precedence when set.
    pub api_key: Option<String>,
    /// Base URL of the generative language REST API.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            timeout_secs: 300,
        }
    }
}

/// A podcast host and the prebuilt voice that speaks their lines.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SpeakerVoice {
    /// Label used at the start of each dialogue turn ("Alex:").
    pub speaker: String,
    /// Prebuilt voice name understood by the TTS model.
    pub voice: String,
    /// Short role description written into script frontmatter.
    pub role: String,
}

impl SpeakerVoice {
    pub fn new(speaker: &str, voice: &str, role: &str) -> Self {
        Self {
            speaker: speaker.to_string(),
            voice: voice.to_string(),
            role: role.to_string(),
        }
    }
}

/// Speech synthesis settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisSettings {
    /// TTS model used for audio generation and token counting.
    pub model: String,
    /// Speaker to voice mapping.
    pub voices: Vec<SpeakerVoice>,
    /// Input token limit of the TTS model.
    pub token_limit: u32,
    /// Tokens kept in reserve below the limit.
    pub token_safety_margin: u32,
    /// URL prefix recorded in the audio manifest.
    pub url_prefix: String,
}

impl Default for SynthesisSettings {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-pro-preview-tts".to_string(),
            voices: vec![
                SpeakerVoice::new("Alex", "Kore", "Instructor"),
                SpeakerVoice::new("Sam", "Charon", "Senior Engineer"),
            ],
            token_limit: 8192,
            token_safety_margin: 500,
            url_prefix: "/audio".to_string(),
        }
    }
}

impl SynthesisSettings {
    /// Largest token count a single chunk may have.
    pub fn max_chunk_tokens(&self) -> u32 {
        self.token_limit.saturating_sub(self.token_safety_margin)
    }

    /// Speaker labels in configuration order.
    pub fn speakers(&self) -> Vec<String> {
        self.voices.iter().map(|v| v.speaker.clone()).collect()
    }
}

/// Dialogue (script) generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogueSettings {
    /// Text model used to write the dialogue.
    pub model: String,
    /// Documents with less cleaned text than this are skipped.
    pub min_content_chars: usize,
    /// Hard token budgets used when a generated dialogue is too long.
    pub regeneration_budgets: Vec<u32>,
}

impl Default for DialogueSettings {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-flash".to_string(),
            min_content_chars: 100,
            regeneration_budgets: vec![7000, 6000, 5500],
        }
    }
}

/// Dialogue chunking settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingSettings {
    /// Soft ceiling: target chunk duration in seconds.
    pub target_chunk_seconds: u32,
    /// Hard ceiling: a chunk is force-split past this duration.
    pub max_chunk_seconds: u32,
    /// Assumed speaking rate used to estimate duration from text.
    pub chars_per_minute: u32,
}

impl Default for ChunkingSettings {
    fn default() -> Self {
        Self {
            target_chunk_seconds: 300,
            max_chunk_seconds: 600,
            chars_per_minute: 750,
        }
    }
}

/// Retry settings for transient API failures.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrySettings {
    /// Total attempts including the first one.
    pub max_attempts: u32,
    /// Delay before the first retry; doubles on every further retry.
    pub base_delay_ms: u64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_attempts: 4,
            base_delay_ms: 1000,
        }
    }
}

/// Batch processing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchSettings {
    /// Number of files processed concurrently per batch.
    pub concurrency: usize,
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self { concurrency: 3 }
    }
}

/// Input and output locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathSettings {
    /// Course documentation tree (.md/.mdx).
    pub docs_dir: String,
    /// Generated podcast scripts.
    pub scripts_dir: String,
    /// Generated WAV files.
    pub audio_dir: String,
    /// Manifest of generated audio.
    pub audio_manifest: String,
    /// Manifest of generated scripts.
    pub script_manifest: String,
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            docs_dir: "website/docs".to_string(),
            scripts_dir: "scripts/output/podcasts".to_string(),
            audio_dir: "website/static/audio".to_string(),
            audio_manifest: "website/static/audio/manifest.json".to_string(),
            script_manifest: "scripts/output/podcasts/manifest.json".to_string(),
        }
    }
}

/// Prompt customization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct PromptSettings {
    /// Directory for custom prompts (overrides defaults).
    pub custom_dir: Option<String>,
    /// Custom variables available in all prompts as {{variable_name}}.
    pub variables: std::collections::HashMap<String, String>,
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to the default configuration file.
    pub fn save(&self) -> crate::error::Result<()> {
        self.save_to(&Self::default_config_path())
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::PodgenError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("podgen")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    pub fn docs_dir(&self) -> PathBuf {
        Self::expand_path(&self.paths.docs_dir)
    }

    pub fn scripts_dir(&self) -> PathBuf {
        Self::expand_path(&self.paths.scripts_dir)
    }

    pub fn audio_dir(&self) -> PathBuf {
        Self::expand_path(&self.paths.audio_dir)
    }

    pub fn audio_manifest_path(&self) -> PathBuf {
        Self::expand_path(&self.paths.audio_manifest)
    }

    pub fn script_manifest_path(&self) -> PathBuf {
        Self::expand_path(&self.paths.script_manifest)
    }

    /// Chunker configuration derived from the chunking and synthesis sections.
    pub fn chunking_config(&self) -> ChunkingConfig {
        ChunkingConfig {
            target_seconds: self.chunking.target_chunk_seconds as f64,
            max_seconds: self.chunking.max_chunk_seconds as f64,
            chars_per_minute: self.chunking.chars_per_minute as f64,
            speakers: self.synthesis.speakers(),
        }
    }

    /// Retry policy for API calls.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.retry.max_attempts,
            base_delay: Duration::from_millis(self.retry.base_delay_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let settings: Settings = toml::from_str(
            r#"
            [chunking]
            chars_per_minute = 900

            [batch]
            concurrency = 5
            "#,
        )
        .unwrap();

        assert_eq!(settings.chunking.chars_per_minute, 900);
        assert_eq!(settings.chunking.target_chunk_seconds, 300);
        assert_eq!(settings.batch.concurrency, 5);
        assert_eq!(settings.synthesis.voices.len(), 2);
        assert_eq!(settings.retry.max_attempts, 4);
    }

    #[test]
    fn test_max_chunk_tokens() {
        let settings = Settings::default();
        assert_eq!(settings.synthesis.max_chunk_tokens(), 7692);

        let tight = SynthesisSettings {
            token_limit: 100,
            token_safety_margin: 500,
            ..Default::default()
        };
        assert_eq!(tight.max_chunk_tokens(), 0);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut settings = Settings::default();
        settings.synthesis.model = "custom-tts".to_string();
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(loaded.synthesis.model, "custom-tts");
        assert_eq!(loaded.synthesis.voices, settings.synthesis.voices);
    }

    #[test]
    fn test_chunking_config_carries_speakers() {
        let config = Settings::default().chunking_config();
        assert_eq!(config.speakers, vec!["Alex".to_string(), "Sam".to_string()]);
        assert_eq!(config.target_seconds, 300.0);
        assert_eq!(config.max_seconds, 600.0);
    }
}
