//! Doctor command - verify configuration and input directories.

use crate::cli::output::format_size;
use crate::cli::preflight::{resolve_api_key, KeySource};
use crate::cli::Output;
use crate::config::Settings;
use crate::script::{find_files, DOC_EXTENSIONS, EXCLUDED_DOCS};
use console::style;
use std::path::Path;

/// Check result for a single item.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks.
pub fn run_doctor(settings: &Settings) -> anyhow::Result<()> {
    Output::header("podgen Doctor");
    println!();

    let mut checks = Vec::new();

    let sections: [(&str, Vec<CheckResult>); 4] = [
        ("API Configuration", vec![check_api_key(settings)]),
        ("Directories", check_directories(settings)),
        ("Synthesis Limits", check_limits(settings)),
        ("Configuration", vec![check_config_file()]),
    ];

    for (title, results) in sections {
        println!("{}", style(title).bold());
        for check in &results {
            check.print();
        }
        println!();
        checks.extend(results);
    }

    let errors = checks.iter().filter(|c| c.status == CheckStatus::Error).count();
    let warnings = checks.iter().filter(|c| c.status == CheckStatus::Warning).count();

    if errors > 0 {
        anyhow::bail!("{} error(s) found. Please fix them before generating audio.", errors);
    } else if warnings > 0 {
        Output::warning(&format!("All checks passed with {} warning(s).", warnings));
    } else {
        Output::success("All checks passed! podgen is ready to use.");
    }

    Ok(())
}

fn mask(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() > 12 {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", head, tail)
    } else {
        "****".to_string()
    }
}

/// Check that an API key can be resolved.
fn check_api_key(settings: &Settings) -> CheckResult {
    match resolve_api_key(settings) {
        Ok((key, KeySource::Env(var))) => {
            CheckResult::ok("API key", &format!("from {} ({})", var, mask(&key)))
        }
        Ok((key, KeySource::ConfigFile)) => {
            CheckResult::ok("API key", &format!("from config file ({})", mask(&key)))
        }
        Err(_) => CheckResult::error(
            "API key",
            "not set",
            "Set with: export GOOGLE_API_KEY='...' (or add it to a .env file)",
        ),
    }
}

fn check_dir(name: &str, dir: &Path, count: Option<usize>, hint: &str) -> CheckResult {
    if !dir.is_dir() {
        return CheckResult::warning(name, &format!("{} (missing)", dir.display()), hint);
    }
    match count {
        Some(n) => CheckResult::ok(name, &format!("{} ({} files)", dir.display(), n)),
        None => CheckResult::ok(name, &dir.display().to_string()),
    }
}

/// Check input and output directories.
fn check_directories(settings: &Settings) -> Vec<CheckResult> {
    let docs = settings.docs_dir();
    let scripts = settings.scripts_dir();
    let audio = settings.audio_dir();

    let doc_count = find_files(&docs, DOC_EXTENSIONS, EXCLUDED_DOCS).ok().map(|f| f.len());
    let script_count = find_files(&scripts, &["md"], &[]).ok().map(|f| f.len());

    let mut results = vec![
        check_dir("Docs", &docs, doc_count, "Set paths.docs_dir in the config file"),
        check_dir("Scripts", &scripts, script_count, "Created by: podgen script"),
        check_dir("Audio", &audio, None, "Created by: podgen audio"),
    ];

    let manifest = settings.audio_manifest_path();
    if let Ok(meta) = std::fs::metadata(&manifest) {
        results.push(CheckResult::ok(
            "Audio manifest",
            &format!("{} ({})", manifest.display(), format_size(meta.len())),
        ));
    }

    results
}

/// Check chunking and token settings for contradictions.
fn check_limits(settings: &Settings) -> Vec<CheckResult> {
    let mut results = Vec::new();

    let chunking = &settings.chunking;
    if chunking.target_chunk_seconds >= chunking.max_chunk_seconds {
        results.push(CheckResult::error(
            "Chunk durations",
            &format!(
                "target {}s is not below max {}s",
                chunking.target_chunk_seconds, chunking.max_chunk_seconds
            ),
            "Set chunking.target_chunk_seconds below chunking.max_chunk_seconds",
        ));
    } else {
        results.push(CheckResult::ok(
            "Chunk durations",
            &format!(
                "target {}s, max {}s at {} chars/min",
                chunking.target_chunk_seconds, chunking.max_chunk_seconds, chunking.chars_per_minute
            ),
        ));
    }

    let max_tokens = settings.synthesis.max_chunk_tokens();
    if max_tokens == 0 {
        results.push(CheckResult::error(
            "Token ceiling",
            "safety margin leaves no room for dialogue",
            "Lower synthesis.token_safety_margin",
        ));
    } else {
        results.push(CheckResult::ok(
            "Token ceiling",
            &format!("{} tokens per chunk", max_tokens),
        ));
    }

    results
}

/// Check if config file exists.
fn check_config_file() -> CheckResult {
    let config_path = Settings::default_config_path();
    if config_path.exists() {
        CheckResult::ok("Config file", &format!("{}", config_path.display()))
    } else {
        CheckResult::warning(
            "Config file",
            "using defaults",
            "Create with: podgen config init",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_result_error() {
        let result = CheckResult::error("test", "failed", "fix it");
        assert_eq!(result.status, CheckStatus::Error);
        assert_eq!(result.hint, Some("fix it".to_string()));
    }

    #[test]
    fn test_mask() {
        assert_eq!(mask("AIzaSyExampleKey1234"), "AIza...1234");
        assert_eq!(mask("short"), "****");
        assert_eq!(mask("€€€€-key-with-euros-€€€€"), "€€€€...€€€€");
        assert_eq!(mask("€€€€€€€€€€€€"), "****");
    }

    #[test]
    fn test_inverted_chunk_limits_flagged() {
        let mut settings = Settings::default();
        settings.chunking.target_chunk_seconds = 700;
        let results = check_limits(&settings);
        assert_eq!(results[0].status, CheckStatus::Error);
        assert_eq!(results[1].status, CheckStatus::Ok);
    }

    #[test]
    fn test_missing_dir_is_warning() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("none");
        assert_eq!(check_dir("Docs", &missing, None, "hint").status, CheckStatus::Warning);
        assert_eq!(check_dir("Docs", dir.path(), Some(0), "hint").status, CheckStatus::Ok);
    }
}
