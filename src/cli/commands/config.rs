//! Config command implementation.

use crate::cli::{ConfigAction, Output};
use crate::config::Settings;
use anyhow::Result;
use std::path::PathBuf;

/// Run the config command.
pub fn run_config(action: &ConfigAction, settings: Settings, config_path: Option<PathBuf>) -> Result<()> {
    let config_path = config_path.unwrap_or_else(Settings::default_config_path);

    match action {
        ConfigAction::Show => {
            let mut shown = settings;
            if shown.gemini.api_key.is_some() {
                shown.gemini.api_key = Some("<redacted>".to_string());
            }
            let toml_str = toml::to_string_pretty(&shown)
                .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;
            println!("{}", toml_str);
        }

        ConfigAction::Path => {
            println!("{}", config_path.display());
        }

        ConfigAction::Init { force } => {
            if config_path.exists() && !force {
                Output::warning(&format!(
                    "Config already exists at {} (use --force to overwrite)",
                    config_path.display()
                ));
                return Ok(());
            }
            Settings::default().save_to(&config_path)?;
            Output::success(&format!("Wrote default config to {}", config_path.display()));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_writes_and_respects_existing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("podgen").join("config.toml");

        run_config(&ConfigAction::Init { force: false }, Settings::default(), Some(path.clone())).unwrap();
        assert!(path.exists());

        std::fs::write(&path, "[batch]\nconcurrency = 9\n").unwrap();
        run_config(&ConfigAction::Init { force: false }, Settings::default(), Some(path.clone())).unwrap();
        let kept = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(kept.batch.concurrency, 9);

        run_config(&ConfigAction::Init { force: true }, Settings::default(), Some(path.clone())).unwrap();
        let reset = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(reset.batch.concurrency, 3);
    }
}
