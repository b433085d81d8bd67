//! JSON manifests mapping source documents to generated outputs.

use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Entry describing one generated WAV file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioEntry {
    pub audio_url: String,
    pub size: u64,
    pub format: String,
    pub token_count: u32,
    #[serde(default)]
    pub chunks: usize,
    pub generated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script_source: Option<String>,
}

/// Entry describing one generated script file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptEntry {
    pub script_path: String,
    pub size: u64,
    pub token_count: u32,
    pub generated_at: DateTime<Utc>,
}

/// Manifest keyed by source path.
///
/// Entries are inserted or overwritten, never removed.
#[derive(Debug, Clone)]
pub struct Manifest<E> {
    path: PathBuf,
    entries: BTreeMap<String, E>,
}

impl<E> Manifest<E>
where
    E: Serialize + DeserializeOwned,
{
    /// Load a manifest, starting empty if the file does not exist.
    pub async fn load(path: &Path) -> Result<Self> {
        let entries = match tokio::fs::read_to_string(path).await {
            Ok(content) => {
                let entries: BTreeMap<String, E> = serde_json::from_str(&content)?;
                info!("Loaded {} manifest entries from {}", entries.len(), path.display());
                entries
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No manifest at {}, starting fresh", path.display());
                BTreeMap::new()
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path: path.to_path_buf(),
            entries,
        })
    }

    /// Write the manifest as pretty JSON, creating parent directories.
    pub async fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_string_pretty(&self.entries)?;
        tokio::fs::write(&self.path, json).await?;
        info!("Saved {} manifest entries to {}", self.entries.len(), self.path.display());
        Ok(())
    }

    /// Insert or overwrite the entry for `key`.
    pub fn insert(&mut self, key: impl Into<String>, entry: E) {
        self.entries.insert(key.into(), entry);
    }

    pub fn get(&self, key: &str) -> Option<&E> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
