//! Pre-flight checks before expensive operations.
//!
//! Validates that the API key and input directories are available before
//! starting a batch that would otherwise fail on every file.

use crate::config::Settings;
use crate::error::{PodgenError, Result};
use crate::gemini::API_KEY_VARS;
use std::path::Path;

/// Where an API key was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeySource {
    Env(&'static str),
    ConfigFile,
}

/// Resolve the Gemini API key from the environment or the config file.
///
/// Environment variables win over `gemini.api_key`; empty values are ignored.
pub fn resolve_api_key(settings: &Settings) -> Result<(String, KeySource)> {
    resolve_api_key_with(settings, |name| std::env::var(name).ok())
}

fn resolve_api_key_with(
    settings: &Settings,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<(String, KeySource)> {
    for &name in API_KEY_VARS {
        if let Some(key) = lookup(name).filter(|k| !k.trim().is_empty()) {
            return Ok((key.trim().to_string(), KeySource::Env(name)));
        }
    }

    if let Some(key) = settings.gemini.api_key.as_deref().filter(|k| !k.trim().is_empty()) {
        return Ok((key.trim().to_string(), KeySource::ConfigFile));
    }

    Err(PodgenError::Config(format!(
        "No API key found. Set one of {} (or gemini.api_key in the config file)",
        API_KEY_VARS.join(", ")
    )))
}

/// Check that an input directory exists.
pub fn check_input_dir(dir: &Path) -> Result<()> {
    if dir.is_dir() {
        Ok(())
    } else {
        Err(PodgenError::InputNotFound(format!(
            "directory {} does not exist",
            dir.display()
        )))
    }
}
