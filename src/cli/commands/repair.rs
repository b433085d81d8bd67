//! Repair command - add WAV headers to headerless PCM files.

use crate::audio::{find_wav_files, repair_wav_file, RepairOutcome};
use crate::cli::{preflight, Output};
use crate::config::Settings;
use anyhow::Result;
use std::path::PathBuf;

/// Run the repair command.
pub fn run_repair(dir: Option<PathBuf>, settings: &Settings) -> Result<()> {
    let dir = dir.unwrap_or_else(|| settings.audio_dir());
    preflight::check_input_dir(&dir)?;

    let files = find_wav_files(&dir)?;
    if files.is_empty() {
        Output::info(&format!("No WAV files in {}", dir.display()));
        return Ok(());
    }

    let pb = Output::progress_bar(files.len() as u64, "Checking headers");
    let mut fixed = 0;
    let mut skipped = 0;
    let mut failed = 0;

    for path in &files {
        match repair_wav_file(path) {
            Ok(RepairOutcome::Fixed { backup }) => {
                fixed += 1;
                pb.println(format!("  fixed {} (backup: {})", path.display(), backup.display()));
            }
            Ok(RepairOutcome::Skipped) => skipped += 1,
            Ok(RepairOutcome::Failed) => {
                failed += 1;
                pb.println(format!("  could not repair {}", path.display()));
            }
            Err(e) => {
                failed += 1;
                pb.println(format!("  error on {}: {}", path.display(), e));
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    Output::kv("Fixed", &fixed.to_string());
    Output::kv("Already valid", &skipped.to_string());
    Output::kv("Failed", &failed.to_string());

    if failed > 0 {
        anyhow::bail!("{} file(s) could not be repaired", failed);
    }
    Output::success("Repair complete");
    Ok(())
}
