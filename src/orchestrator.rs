//! Pipeline orchestrator for podgen.
//!
//! Coordinates the whole process from course markdown to dialogue scripts
//! and WAV files, and records what was produced in the manifests.

use crate::audio::{encode_wav, pcm_duration_seconds, WAV_MIME};
use crate::batch::{BatchRunner, BatchSummary};
use crate::chunking::{estimate_duration, DialogueChunk, SpeakerTurnChunker};
use crate::config::{Prompts, Settings};
use crate::dialogue::{DialogueGenerator, DialoguePromptBuilder, GeminiDialogueGenerator};
use crate::error::{PodgenError, Result};
use crate::gemini::GeminiClient;
use crate::manifest::{AudioEntry, Manifest, ScriptEntry};
use crate::retry::{retry_with_backoff, RetryPolicy};
use crate::script::{
    find_files, read_script, MarkdownCleaner, PodcastScript, ScriptFrontmatter, DOC_EXTENSIONS,
    EXCLUDED_DOCS,
};
use crate::synthesis::{GeminiSynthesizer, SpeechSynthesizer};
use chrono::Utc;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Metadata about a written WAV file.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioSummary {
    /// Size of the file in bytes, header included.
    pub size: u64,
    pub format: String,
    /// Sum of the token counts of all chunks.
    pub token_count: u32,
    pub chunks: usize,
    /// Synthesis invocations across all chunks, retries included.
    pub attempts: u32,
}

/// A generated dialogue and its token count.
#[derive(Debug, Clone)]
pub struct GeneratedDialogue {
    pub text: String,
    pub token_count: u32,
}

/// A course document ready for dialogue generation.
struct PreparedDocument {
    /// Path relative to the docs directory.
    relative: PathBuf,
    title: String,
    content: String,
}

/// The main orchestrator for the podgen pipeline.
pub struct Orchestrator {
    settings: Settings,
    prompts: Prompts,
    synthesizer: Arc<dyn SpeechSynthesizer>,
    generator: Arc<dyn DialogueGenerator>,
    chunker: SpeakerTurnChunker,
    retry: RetryPolicy,
    cleaner: MarkdownCleaner,
}

impl Orchestrator {
    /// Create an orchestrator backed by the Gemini API.
    pub fn new(settings: Settings, api_key: String) -> Result<Self> {
        // Load prompts (with optional custom directory and variables)
        let prompts = Prompts::load(
            settings.prompts.custom_dir.as_deref(),
            Some(&settings.prompts.variables),
        )?;

        let client = GeminiClient::with_settings(api_key, &settings.gemini)?;
        info!(
            "Using {} for speech and {} for dialogue",
            settings.synthesis.model, settings.dialogue.model
        );

        let synthesizer: Arc<dyn SpeechSynthesizer> = Arc::new(GeminiSynthesizer::with_config(
            client.clone(),
            &settings.synthesis,
        ));
        let generator: Arc<dyn DialogueGenerator> = Arc::new(GeminiDialogueGenerator::new(
            client,
            settings.dialogue.model.clone(),
        ));

        Ok(Self::with_components(settings, prompts, synthesizer, generator))
    }

    /// Create an orchestrator with custom components.
    pub fn with_components(
        settings: Settings,
        prompts: Prompts,
        synthesizer: Arc<dyn SpeechSynthesizer>,
        generator: Arc<dyn DialogueGenerator>,
    ) -> Self {
        let chunker = SpeakerTurnChunker::new(settings.chunking_config());
        let retry = settings.retry_policy();

        Self {
            settings,
            prompts,
            synthesizer,
            generator,
            chunker,
            retry,
            cleaner: MarkdownCleaner::new(),
        }
    }

    /// Get the settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Synthesize a dialogue into a WAV file at `output_path`.
    ///
    /// Every chunk is token-checked before any audio is requested. The file
    /// is written to a temporary sibling and renamed into place, so a failed
    /// run leaves no partial WAV behind.
    #[instrument(skip(self, dialogue), fields(output = %output_path.display()))]
    pub async fn synthesize_dialogue(&self, dialogue: &str, output_path: &Path) -> Result<AudioSummary> {
        if dialogue.trim().is_empty() {
            return Err(PodgenError::InvalidScript("dialogue is empty".into()));
        }

        let config = self.chunker.config();
        let estimated = estimate_duration(dialogue, config.chars_per_minute);
        info!("Estimated duration: {:.1} minutes", estimated / 60.0);

        let chunks: Vec<DialogueChunk> = self.chunker.chunks(dialogue).collect();
        info!("Split dialogue into {} chunk(s)", chunks.len());

        let limit = self.settings.synthesis.max_chunk_tokens();
        let mut token_count = 0u32;
        for chunk in &chunks {
            let count = self.count_tokens(&chunk.text).await?;
            debug!(
                "Chunk {}: {} tokens, {}",
                chunk.order + 1,
                count,
                chunk.format_duration()
            );
            if count > limit {
                return Err(PodgenError::TokenLimit { count, limit });
            }
            token_count = token_count.saturating_add(count);
        }

        let mut pcm = Vec::new();
        let mut attempts = 0u32;
        for chunk in &chunks {
            let synthesizer = &self.synthesizer;
            let text = chunk.text.as_str();
            let result = retry_with_backoff(&self.retry, move || synthesizer.synthesize(text)).await?;

            info!(
                "Chunk {}/{} synthesized ({} bytes, {} attempt(s))",
                chunk.order + 1,
                chunks.len(),
                result.value.len(),
                result.attempts
            );
            attempts += result.attempts;
            pcm.extend_from_slice(&result.value);
        }

        let wav = encode_wav(&pcm)?;
        write_atomic(output_path, &wav).await?;

        info!(
            "Wrote {} ({:.1}s of audio)",
            output_path.display(),
            pcm_duration_seconds(pcm.len())
        );

        Ok(AudioSummary {
            size: wav.len() as u64,
            format: WAV_MIME.to_string(),
            token_count,
            chunks: chunks.len(),
            attempts,
        })
    }

    /// Synthesize one script file into the audio tree.
    ///
    /// Returns the manifest key (the script's source document) and entry.
    #[instrument(skip(self), fields(script = %script_path.display()))]
    pub async fn process_script(&self, script_path: &Path) -> Result<(String, AudioEntry)> {
        let script = read_script(script_path).await?;

        let relative = relative_to(script_path, &self.settings.scripts_dir());
        let audio_relative = relative.with_extension("wav");
        let output_path = self.settings.audio_dir().join(&audio_relative);

        let summary = self.synthesize_dialogue(&script.dialogue, &output_path).await?;

        let entry = AudioEntry {
            audio_url: self.audio_url(&audio_relative),
            size: summary.size,
            format: summary.format,
            token_count: summary.token_count,
            chunks: summary.chunks,
            generated_at: Utc::now(),
            script_source: Some(url_path(&relative)),
        };

        Ok((script.frontmatter.source, entry))
    }

    /// Turn a course document into a script file.
    ///
    /// Returns `None` when the document has too little prose to talk about.
    #[instrument(skip(self), fields(doc = %doc_path.display()))]
    pub async fn generate_script(&self, doc_path: &Path) -> Result<Option<(String, ScriptEntry)>> {
        let Some(doc) = self.prepare_document(doc_path).await? else {
            return Ok(None);
        };

        let dialogue = self.generate_dialogue(&doc.title, &doc.content).await?;
        let generated_at = Utc::now();
        let source = url_path(&doc.relative);

        let script = PodcastScript {
            frontmatter: ScriptFrontmatter {
                source: source.clone(),
                speakers: self.settings.synthesis.voices.clone(),
                generated_at: Some(generated_at),
                model: Some(self.generator.model().to_string()),
                token_count: Some(dialogue.token_count),
            },
            dialogue: dialogue.text,
        };

        let script_relative = doc.relative.with_extension("md");
        let output_path = self.settings.scripts_dir().join(&script_relative);
        let rendered = script.render();
        write_atomic(&output_path, rendered.as_bytes()).await?;
        info!("Wrote script {}", output_path.display());

        let entry = ScriptEntry {
            script_path: url_path(&script_relative),
            size: rendered.len() as u64,
            token_count: dialogue.token_count,
            generated_at,
        };

        Ok(Some((source, entry)))
    }

    /// Turn a course document straight into audio without keeping a script.
    #[instrument(skip(self), fields(doc = %doc_path.display()))]
    pub async fn generate_podcast(&self, doc_path: &Path) -> Result<Option<(String, AudioEntry)>> {
        let Some(doc) = self.prepare_document(doc_path).await? else {
            return Ok(None);
        };

        let dialogue = self.generate_dialogue(&doc.title, &doc.content).await?;

        let audio_relative = doc.relative.with_extension("wav");
        let output_path = self.settings.audio_dir().join(&audio_relative);
        let summary = self.synthesize_dialogue(&dialogue.text, &output_path).await?;

        let entry = AudioEntry {
            audio_url: self.audio_url(&audio_relative),
            size: summary.size,
            format: summary.format,
            token_count: dialogue.token_count,
            chunks: summary.chunks,
            generated_at: Utc::now(),
            script_source: None,
        };

        Ok(Some((url_path(&doc.relative), entry)))
    }

    /// Generate a dialogue that fits under the per-chunk token ceiling.
    ///
    /// The first attempt uses the soft length guideline; each further attempt
    /// walks down the configured budget ladder.
    pub async fn generate_dialogue(&self, title: &str, content: &str) -> Result<GeneratedDialogue> {
        let limit = self.settings.synthesis.max_chunk_tokens();
        let builder = DialoguePromptBuilder::new(&self.prompts, &self.settings.synthesis.voices);

        let budgets = std::iter::once(None).chain(
            self.settings
                .dialogue
                .regeneration_budgets
                .iter()
                .copied()
                .map(Some),
        );

        let mut last_count = 0;
        let mut tries = 0;
        for budget in budgets {
            tries += 1;
            if let Some(tokens) = budget {
                info!("Regenerating '{}' with a {} token budget", title, tokens);
            }

            let prompt = builder.build(title, content, budget);
            let generator = &self.generator;
            let prompt = prompt.as_str();
            let text = retry_with_backoff(&self.retry, move || generator.generate(prompt))
                .await?
                .value;

            let count = self.count_tokens(&text).await?;
            info!("Dialogue for '{}': {} / {} tokens", title, count, limit);

            if count <= limit {
                return Ok(GeneratedDialogue {
                    text,
                    token_count: count,
                });
            }

            warn!("Dialogue exceeds the limit by {} tokens", count - limit);
            last_count = count;
        }

        Err(PodgenError::Dialogue(format!(
            "still {} tokens (limit {}) after {} attempts",
            last_count, limit, tries
        )))
    }

    /// Synthesize every script under the scripts directory.
    pub async fn run_audio_batch(&self, files: &[PathBuf]) -> Result<BatchSummary> {
        let mut manifest: Manifest<AudioEntry> =
            Manifest::load(&self.settings.audio_manifest_path()).await?;

        let summary = self
            .batch_runner()
            .run(
                files,
                |path| {
                    let path = path.clone();
                    async move { self.process_script(&path).await }
                },
                |(key, entry)| manifest.insert(key, entry),
            )
            .await;

        self.finish_batch(&manifest, summary).await
    }

    /// Generate scripts for every course document.
    pub async fn run_script_batch(&self, files: &[PathBuf]) -> Result<BatchSummary> {
        let mut manifest: Manifest<ScriptEntry> =
            Manifest::load(&self.settings.script_manifest_path()).await?;

        let summary = self
            .batch_runner()
            .run(
                files,
                |path| {
                    let path = path.clone();
                    async move { self.generate_script(&path).await }
                },
                |generated| {
                    if let Some((key, entry)) = generated {
                        manifest.insert(key, entry);
                    }
                },
            )
            .await;

        self.finish_batch(&manifest, summary).await
    }

    /// Generate audio directly for every course document.
    pub async fn run_podcast_batch(&self, files: &[PathBuf]) -> Result<BatchSummary> {
        let mut manifest: Manifest<AudioEntry> =
            Manifest::load(&self.settings.audio_manifest_path()).await?;

        let summary = self
            .batch_runner()
            .run(
                files,
                |path| {
                    let path = path.clone();
                    async move { self.generate_podcast(&path).await }
                },
                |generated| {
                    if let Some((key, entry)) = generated {
                        manifest.insert(key, entry);
                    }
                },
            )
            .await;

        self.finish_batch(&manifest, summary).await
    }

    /// Script files under the scripts directory.
    pub fn script_files(&self) -> Result<Vec<PathBuf>> {
        find_files(&self.settings.scripts_dir(), &["md"], &[])
    }

    /// Course documents under the docs directory.
    pub fn doc_files(&self) -> Result<Vec<PathBuf>> {
        find_files(&self.settings.docs_dir(), DOC_EXTENSIONS, EXCLUDED_DOCS)
    }

    fn batch_runner(&self) -> BatchRunner {
        BatchRunner::new(self.settings.batch.concurrency)
    }

    async fn finish_batch<E>(&self, manifest: &Manifest<E>, summary: BatchSummary) -> Result<BatchSummary>
    where
        E: serde::Serialize + serde::de::DeserializeOwned,
    {
        if summary.processed > 0 {
            manifest.save().await?;
        }
        info!(
            "Batch finished: {} processed, {} failed",
            summary.processed, summary.failed
        );
        Ok(summary)
    }

    async fn count_tokens(&self, text: &str) -> Result<u32> {
        let synthesizer = &self.synthesizer;
        Ok(retry_with_backoff(&self.retry, move || synthesizer.count_tokens(text))
            .await?
            .value)
    }

    async fn prepare_document(&self, doc_path: &Path) -> Result<Option<PreparedDocument>> {
        let raw = tokio::fs::read_to_string(doc_path).await?;
        let content = self.cleaner.clean(&raw);

        let min_chars = self.settings.dialogue.min_content_chars;
        if content.chars().count() < min_chars {
            info!(
                "Skipping {}: fewer than {} characters of content",
                doc_path.display(),
                min_chars
            );
            return Ok(None);
        }

        let title = doc_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("untitled")
            .to_string();

        Ok(Some(PreparedDocument {
            relative: relative_to(doc_path, &self.settings.docs_dir()),
            title,
            content,
        }))
    }

    fn audio_url(&self, relative: &Path) -> String {
        format!(
            "{}/{}",
            self.settings.synthesis.url_prefix.trim_end_matches('/'),
            url_path(relative)
        )
    }
}

/// Path of `path` below `base`, or just its file name when it lies elsewhere.
fn relative_to(path: &Path, base: &Path) -> PathBuf {
    match path.strip_prefix(base) {
        Ok(rel) => rel.to_path_buf(),
        Err(_) => path
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| path.to_path_buf()),
    }
}

/// Relative path with `/` separators for URLs and manifest keys.
fn url_path(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Write `bytes` to a temporary sibling of `path`, then rename it into place.
async fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".part");
    let tmp = PathBuf::from(tmp);

    if let Err(e) = tokio::fs::write(&tmp, bytes).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(e.into());
    }
    if let Err(e) = tokio::fs::rename(&tmp, path).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(e.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{is_valid_wav, WAV_HEADER_LEN};
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;

    /// Returns `pcm_len` bytes per chunk and counts a token per four characters.
    struct MockSynthesizer {
        pcm_len: usize,
        failures_before_success: u32,
        calls: AtomicU32,
    }

    impl MockSynthesizer {
        fn new(pcm_len: usize) -> Self {
            Self {
                pcm_len,
                failures_before_success: 0,
                calls: AtomicU32::new(0),
            }
        }
    }

    #[async_trait]
    impl SpeechSynthesizer for MockSynthesizer {
        async fn count_tokens(&self, text: &str) -> Result<u32> {
            Ok((text.len() / 4) as u32)
        }

        async fn synthesize(&self, _text: &str) -> Result<Vec<u8>> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if n < self.failures_before_success {
                return Err(PodgenError::Api {
                    status: 503,
                    message: "overloaded".into(),
                });
            }
            Ok(vec![0u8; self.pcm_len])
        }
    }

    /// Hands out queued dialogues in order.
    struct ScriptedGenerator {
        responses: Mutex<VecDeque<String>>,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedGenerator {
        fn new(responses: &[String]) -> Self {
            Self {
                responses: Mutex::new(responses.iter().cloned().collect()),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl DialogueGenerator for ScriptedGenerator {
        async fn generate(&self, prompt: &str) -> Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| PodgenError::Dialogue("no more responses".into()))
        }

        fn model(&self) -> &str {
            "scripted"
        }
    }

    fn test_settings(root: &Path) -> Settings {
        let mut settings = Settings::default();
        settings.paths.docs_dir = root.join("docs").to_string_lossy().to_string();
        settings.paths.scripts_dir = root.join("scripts").to_string_lossy().to_string();
        settings.paths.audio_dir = root.join("audio").to_string_lossy().to_string();
        settings.paths.audio_manifest = root.join("audio/manifest.json").to_string_lossy().to_string();
        settings.paths.script_manifest = root.join("scripts/manifest.json").to_string_lossy().to_string();
        settings.retry.base_delay_ms = 1;
        settings
    }

    fn orchestrator(
        settings: Settings,
        synthesizer: MockSynthesizer,
        generator: ScriptedGenerator,
    ) -> Orchestrator {
        Orchestrator::with_components(
            settings,
            Prompts::default(),
            Arc::new(synthesizer),
            Arc::new(generator),
        )
    }

    #[tokio::test]
    async fn test_synthesize_writes_wav() {
        let dir = tempfile::tempdir().unwrap();
        let orch = orchestrator(
            test_settings(dir.path()),
            MockSynthesizer::new(96_000),
            ScriptedGenerator::new(&[]),
        );

        let output = dir.path().join("out").join("episode.wav");
        let summary = orch
            .synthesize_dialogue("Alex: Hello.\nSam: Hi.\nAlex: Let's begin.", &output)
            .await
            .unwrap();

        assert_eq!(summary.chunks, 1);
        assert_eq!(summary.attempts, 1);
        assert_eq!(summary.size, (WAV_HEADER_LEN + 96_000) as u64);
        assert_eq!(summary.format, "audio/wav");

        let bytes = std::fs::read(&output).unwrap();
        assert!(is_valid_wav(&bytes));
        assert_eq!(bytes.len() as u64, summary.size);
        assert!(!dir.path().join("out").join("episode.wav.part").exists());
    }

    #[tokio::test]
    async fn test_token_limit_fails_before_synthesis() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = test_settings(dir.path());
        settings.synthesis.token_limit = 510;
        let orch = orchestrator(settings, MockSynthesizer::new(10), ScriptedGenerator::new(&[]));

        // 120 chars is 30 tokens against a ceiling of 10
        let dialogue = format!("Alex: {}", "x".repeat(114));
        let output = dir.path().join("too-long.wav");
        let result = orch.synthesize_dialogue(&dialogue, &output).await;

        assert!(matches!(
            result,
            Err(PodgenError::TokenLimit { count: 30, limit: 10 })
        ));
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn test_synthesis_failure_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut synthesizer = MockSynthesizer::new(10);
        synthesizer.failures_before_success = 10;
        let orch = orchestrator(test_settings(dir.path()), synthesizer, ScriptedGenerator::new(&[]));

        let output = dir.path().join("failed.wav");
        let result = orch.synthesize_dialogue("Alex: Hello.", &output).await;

        assert!(matches!(result, Err(PodgenError::Api { status: 503, .. })));
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn test_empty_dialogue_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let orch = orchestrator(test_settings(dir.path()), MockSynthesizer::new(10), ScriptedGenerator::new(&[]));
        let result = orch.synthesize_dialogue("  \n\n", &dir.path().join("x.wav")).await;
        assert!(matches!(result, Err(PodgenError::InvalidScript(_))));
    }

    #[tokio::test]
    async fn test_regeneration_walks_budget_ladder() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = test_settings(dir.path());
        // Ceiling of 100 tokens, i.e. 400 characters with the mock counter
        settings.synthesis.token_limit = 600;

        let long = format!("Alex: {}", "a".repeat(600));
        let short = "Alex: Short enough.\nSam: Agreed.".to_string();
        let generator = ScriptedGenerator::new(&[long.clone(), long, short.clone()]);
        let orch = orchestrator(settings, MockSynthesizer::new(10), generator);

        let dialogue = orch.generate_dialogue("lesson", "content").await.unwrap();
        assert_eq!(dialogue.text, short);
        assert_eq!(dialogue.token_count, (short.len() / 4) as u32);
    }

    #[tokio::test]
    async fn test_regeneration_gives_up_after_ladder() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = test_settings(dir.path());
        settings.synthesis.token_limit = 600;

        let long = format!("Alex: {}", "a".repeat(600));
        let generator = ScriptedGenerator::new(&vec![long; 4]);
        let orch = orchestrator(settings, MockSynthesizer::new(10), generator);

        let result = orch.generate_dialogue("lesson", "content").await;
        assert!(matches!(result, Err(PodgenError::Dialogue(_))));
    }

    #[tokio::test]
    async fn test_generate_script_and_process_it() {
        let dir = tempfile::tempdir().unwrap();
        let settings = test_settings(dir.path());
        let docs = dir.path().join("docs").join("module-1");
        std::fs::create_dir_all(&docs).unwrap();
        let doc = docs.join("lesson.mdx");
        std::fs::write(&doc, format!("---\ntitle: Lesson\n---\n# Lesson\n\n{}", "Prose. ".repeat(30))).unwrap();

        let dialogue = "Alex: Today we cover lessons.\nSam: Sounds good.".to_string();
        let orch = orchestrator(settings, MockSynthesizer::new(48_000), ScriptedGenerator::new(&[dialogue.clone()]));

        let (key, entry) = orch.generate_script(&doc).await.unwrap().unwrap();
        assert_eq!(key, "module-1/lesson.mdx");
        assert_eq!(entry.script_path, "module-1/lesson.md");

        let script_path = dir.path().join("scripts/module-1/lesson.md");
        let script = read_script(&script_path).await.unwrap();
        assert_eq!(script.dialogue, dialogue);
        assert_eq!(script.frontmatter.model.as_deref(), Some("scripted"));
        assert_eq!(script.frontmatter.speakers.len(), 2);

        let (key, audio) = orch.process_script(&script_path).await.unwrap();
        assert_eq!(key, "module-1/lesson.mdx");
        assert_eq!(audio.audio_url, "/audio/module-1/lesson.wav");
        assert_eq!(audio.script_source.as_deref(), Some("module-1/lesson.md"));
        assert!(dir.path().join("audio/module-1/lesson.wav").exists());
    }

    #[tokio::test]
    async fn test_short_document_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let docs = dir.path().join("docs");
        std::fs::create_dir_all(&docs).unwrap();
        let doc = docs.join("stub.md");
        std::fs::write(&doc, "# Stub\n\nTODO").unwrap();

        let orch = orchestrator(test_settings(dir.path()), MockSynthesizer::new(10), ScriptedGenerator::new(&[]));
        assert!(orch.generate_script(&doc).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_failed_rename_removes_part_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("occupied.wav");
        std::fs::create_dir_all(target.join("inside")).unwrap();

        assert!(write_atomic(&target, b"RIFF").await.is_err());
        assert!(target.is_dir());
        assert!(!dir.path().join("occupied.wav.part").exists());
    }

    #[test]
    fn test_url_path_and_relative() {
        let rel = relative_to(Path::new("/data/docs/a/b.md"), Path::new("/data/docs"));
        assert_eq!(url_path(&rel), "a/b.md");
        assert_eq!(relative_to(Path::new("/elsewhere/c.md"), Path::new("/data/docs")), PathBuf::from("c.md"));
    }
}
