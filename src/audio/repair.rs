//! Repair of WAV files that were written as headerless PCM.

use super::wav::{encode_wav, is_valid_wav};
use crate::error::Result;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

/// Outcome of repairing a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepairOutcome {
    /// Header added; the original bytes were kept at `backup`.
    Fixed { backup: PathBuf },
    /// The file already had a valid header.
    Skipped,
    /// The rewritten file did not validate; the original was restored.
    Failed,
}

/// Recursively list `.wav` files under a directory, sorted.
pub fn find_wav_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    collect_wav_files(dir, &mut files)?;
    files.sort();
    Ok(files)
}

fn collect_wav_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_wav_files(&path, files)?;
        } else if path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("wav"))
        {
            files.push(path);
        }
    }
    Ok(())
}

/// Add a canonical header to a file holding raw PCM.
#[instrument(fields(path = %path.display()))]
pub fn repair_wav_file(path: &Path) -> Result<RepairOutcome> {
    let bytes = std::fs::read(path)?;

    if is_valid_wav(&bytes) {
        return Ok(RepairOutcome::Skipped);
    }

    let wav = encode_wav(&bytes)?;

    let mut backup = path.as_os_str().to_owned();
    backup.push(".bak");
    let backup = PathBuf::from(backup);
    std::fs::rename(path, &backup)?;

    std::fs::write(path, &wav)?;

    if is_valid_wav(&std::fs::read(path)?) {
        info!("Added WAV header ({} bytes of PCM)", bytes.len());
        Ok(RepairOutcome::Fixed { backup })
    } else {
        warn!("Repaired file failed validation, restoring backup");
        std::fs::rename(&backup, path)?;
        Ok(RepairOutcome::Failed)
    }
}
