//! Audio, script and podcast generation commands.

use crate::cli::{preflight, Output};
use crate::config::Settings;
use crate::orchestrator::Orchestrator;
use anyhow::Result;
use std::path::PathBuf;

/// What a generation command produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerateKind {
    /// Scripts to WAV files.
    Audio,
    /// Course documents to scripts.
    Script,
    /// Course documents straight to WAV files.
    Podcast,
}

impl GenerateKind {
    fn label(self) -> &'static str {
        match self {
            GenerateKind::Audio => "script(s) to synthesize",
            GenerateKind::Script => "document(s) to script",
            GenerateKind::Podcast => "document(s) to turn into audio",
        }
    }
}

/// Run a generation command over the given files, or the whole input tree.
pub async fn run_generate(
    kind: GenerateKind,
    files: Vec<PathBuf>,
    concurrency: Option<usize>,
    mut settings: Settings,
) -> Result<()> {
    if let Some(n) = concurrency {
        settings.batch.concurrency = n;
    }

    // Fail before any work when the key or the input tree is missing
    let (api_key, _) = preflight::resolve_api_key(&settings)?;
    let input_dir = match kind {
        GenerateKind::Audio => settings.scripts_dir(),
        GenerateKind::Script | GenerateKind::Podcast => settings.docs_dir(),
    };
    if files.is_empty() {
        preflight::check_input_dir(&input_dir)?;
    }

    let orchestrator = Orchestrator::new(settings, api_key)?;

    let files = if files.is_empty() {
        match kind {
            GenerateKind::Audio => orchestrator.script_files()?,
            GenerateKind::Script | GenerateKind::Podcast => orchestrator.doc_files()?,
        }
    } else {
        files
    };

    if files.is_empty() {
        Output::warning(&format!("Nothing to do: no files found in {}", input_dir.display()));
        return Ok(());
    }

    Output::info(&format!(
        "Found {} {} (batches of {})",
        files.len(),
        kind.label(),
        orchestrator.settings().batch.concurrency.max(1)
    ));

    let spinner = Output::spinner("Generating...");
    let result = match kind {
        GenerateKind::Audio => orchestrator.run_audio_batch(&files).await,
        GenerateKind::Script => orchestrator.run_script_batch(&files).await,
        GenerateKind::Podcast => orchestrator.run_podcast_batch(&files).await,
    };
    spinner.finish_and_clear();

    let summary = result?;
    Output::batch_summary(&summary);

    let manifest = match kind {
        GenerateKind::Script => orchestrator.settings().script_manifest_path(),
        GenerateKind::Audio | GenerateKind::Podcast => orchestrator.settings().audio_manifest_path(),
    };
    if summary.processed > 0 {
        Output::kv("Manifest", &manifest.display().to_string());
    }

    Ok(())
}
