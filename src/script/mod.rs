//! Podcast script files and course document discovery.
//!
//! A script is a markdown file with a `---` frontmatter block describing where
//! the dialogue came from, followed by the dialogue itself.

mod markdown;

pub use markdown::{extract_dialogue, MarkdownCleaner};

use crate::config::SpeakerVoice;
use crate::error::{PodgenError, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use std::path::{Path, PathBuf};

/// Course documents extensions picked up by `script` and `podcast`.
pub const DOC_EXTENSIONS: &[&str] = &["md", "mdx"];

/// File names never treated as course content.
pub const EXCLUDED_DOCS: &[&str] = &["CLAUDE.md"];

/// Recursively list files under `dir` with one of `extensions`, sorted.
///
/// Files whose name appears in `excluded` are skipped.
pub fn find_files(dir: &Path, extensions: &[&str], excluded: &[&str]) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(PodgenError::InputNotFound(format!(
            "directory {} does not exist",
            dir.display()
        )));
    }

    let mut files = Vec::new();
    collect_files(dir, extensions, excluded, &mut files)?;
    files.sort();
    Ok(files)
}

fn collect_files(
    dir: &Path,
    extensions: &[&str],
    excluded: &[&str],
    files: &mut Vec<PathBuf>,
) -> Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_files(&path, extensions, excluded, files)?;
            continue;
        }

        let matches_ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)));
        let is_excluded = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| excluded.contains(&name));

        if matches_ext && !is_excluded {
            files.push(path);
        }
    }
    Ok(())
}

/// Metadata block at the top of a script file.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptFrontmatter {
    /// Course document the dialogue was generated from, relative to the docs dir.
    pub source: String,
    pub speakers: Vec<SpeakerVoice>,
    pub generated_at: Option<DateTime<Utc>>,
    pub model: Option<String>,
    pub token_count: Option<u32>,
}

/// A parsed script file.
#[derive(Debug, Clone, PartialEq)]
pub struct PodcastScript {
    pub frontmatter: ScriptFrontmatter,
    pub dialogue: String,
}

impl PodcastScript {
    /// Parse script file content.
    pub fn parse(content: &str) -> Result<Self> {
        let rest = content
            .strip_prefix("---\n")
            .or_else(|| content.strip_prefix("---\r\n"))
            .ok_or_else(|| PodgenError::InvalidScript("missing frontmatter".into()))?;

        let mut lines = rest.split_inclusive('\n');
        let mut block = Vec::new();
        let mut closed = false;
        for line in lines.by_ref() {
            if line.trim_end() == "---" {
                closed = true;
                break;
            }
            block.push(line.trim_end_matches(['\r', '\n']));
        }
        if !closed {
            return Err(PodgenError::InvalidScript("unterminated frontmatter".into()));
        }

        let dialogue: String = lines.collect();
        Ok(Self {
            frontmatter: parse_frontmatter(&block)?,
            dialogue: dialogue.trim().to_string(),
        })
    }

    /// Render the script back to file content.
    pub fn render(&self) -> String {
        let fm = &self.frontmatter;
        let mut out = String::from("---\n");
        out.push_str(&format!("source: {}\n", fm.source));
        if !fm.speakers.is_empty() {
            out.push_str("speakers:\n");
            for s in &fm.speakers {
                out.push_str(&format!("  - name: {}\n", s.speaker));
                out.push_str(&format!("    role: {}\n", s.role));
                out.push_str(&format!("    voice: {}\n", s.voice));
            }
        }
        if let Some(at) = fm.generated_at {
            out.push_str(&format!(
                "generatedAt: {}\n",
                at.to_rfc3339_opts(SecondsFormat::Millis, true)
            ));
        }
        if let Some(model) = &fm.model {
            out.push_str(&format!("model: {}\n", model));
        }
        if let Some(count) = fm.token_count {
            out.push_str(&format!("tokenCount: {}\n", count));
        }
        out.push_str("---\n\n");
        out.push_str(&self.dialogue);
        out.push('\n');
        out
    }
}

/// Read and parse a script file.
pub async fn read_script(path: &Path) -> Result<PodcastScript> {
    let content = tokio::fs::read_to_string(path).await?;
    PodcastScript::parse(&content)
        .map_err(|e| PodgenError::InvalidScript(format!("{}: {}", path.display(), e)))
}

fn unquote(value: &str) -> &str {
    let value = value.trim();
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
        .unwrap_or(value)
}

fn parse_frontmatter(lines: &[&str]) -> Result<ScriptFrontmatter> {
    let mut source = None;
    let mut speakers: Vec<SpeakerVoice> = Vec::new();
    let mut generated_at = None;
    let mut model = None;
    let mut token_count = None;

    for line in lines {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        // Speaker list items: "  - name: X" then "    role: Y" / "    voice: Z"
        if line.starts_with(' ') {
            if let Some(item) = trimmed.strip_prefix("- ") {
                speakers.push(SpeakerVoice::new("", "", ""));
                set_speaker_field(&mut speakers, item);
            } else {
                set_speaker_field(&mut speakers, trimmed);
            }
            continue;
        }

        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value = unquote(value);
        match key.trim() {
            "source" => source = Some(value.to_string()),
            "model" => model = Some(value.to_string()),
            "generatedAt" => {
                let at = DateTime::parse_from_rfc3339(value).map_err(|e| {
                    PodgenError::InvalidScript(format!("bad generatedAt '{}': {}", value, e))
                })?;
                generated_at = Some(at.with_timezone(&Utc));
            }
            "tokenCount" => {
                token_count = Some(value.parse().map_err(|_| {
                    PodgenError::InvalidScript(format!("bad tokenCount '{}'", value))
                })?)
            }
            _ => {}
        }
    }

    let source = source
        .filter(|s| !s.is_empty())
        .ok_or_else(|| PodgenError::InvalidScript("frontmatter has no source".into()))?;

    Ok(ScriptFrontmatter {
        source,
        speakers,
        generated_at,
        model,
        token_count,
    })
}

fn set_speaker_field(speakers: &mut [SpeakerVoice], item: &str) {
    let (Some(current), Some((key, value))) = (speakers.last_mut(), item.split_once(':')) else {
        return;
    };
    let value = unquote(value).to_string();
    match key.trim() {
        "name" => current.speaker = value,
        "role" => current.role = value,
        "voice" => current.voice = value,
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_script() -> PodcastScript {
        PodcastScript {
            frontmatter: ScriptFrontmatter {
                source: "fundamentals/lesson-1.md".to_string(),
                speakers: vec![
                    SpeakerVoice::new("Alex", "Kore", "Instructor"),
                    SpeakerVoice::new("Sam", "Charon", "Senior Engineer"),
                ],
                generated_at: Some(Utc.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).unwrap()),
                model: Some("gemini-2.5-flash".to_string()),
                token_count: Some(4321),
            },
            dialogue: "Alex: Welcome back.\n\nSam: Glad to be here.".to_string(),
        }
    }

    #[test]
    fn test_render_parse_roundtrip() {
        let script = sample_script();
        let rendered = script.render();
        assert!(rendered.starts_with("---\nsource: fundamentals/lesson-1.md\n"));
        assert!(rendered.contains("generatedAt: 2025-03-14T09:26:53.000Z\n"));

        let parsed = PodcastScript::parse(&rendered).unwrap();
        assert_eq!(parsed, script);
    }

    #[test]
    fn test_parse_quoted_values_and_crlf() {
        let content = "---\r\nsource: \"intro.md\"\r\ntokenCount: 12\r\n---\r\n\r\nAlex: Hi\r\n";
        let script = PodcastScript::parse(content).unwrap();
        assert_eq!(script.frontmatter.source, "intro.md");
        assert_eq!(script.frontmatter.token_count, Some(12));
        assert!(script.frontmatter.speakers.is_empty());
        assert_eq!(script.dialogue, "Alex: Hi");
    }

    #[test]
    fn test_parse_rejects_invalid_scripts() {
        let cases = [
            "Alex: no frontmatter",
            "---\nsource: a.md\nAlex: never closed",
            "---\nmodel: x\n---\nAlex: Hi",
            "---\nsource: a.md\ntokenCount: many\n---\nAlex: Hi",
        ];
        for case in cases {
            assert!(
                matches!(PodcastScript::parse(case), Err(PodgenError::InvalidScript(_))),
                "accepted: {:?}",
                case
            );
        }
    }

    #[test]
    fn test_find_files_recursive_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("b-module");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join("z.md"), "z").unwrap();
        std::fs::write(dir.path().join("a.mdx"), "a").unwrap();
        std::fs::write(dir.path().join("CLAUDE.md"), "ignore").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignore").unwrap();
        std::fs::write(nested.join("lesson.md"), "l").unwrap();

        let files = find_files(dir.path(), DOC_EXTENSIONS, EXCLUDED_DOCS).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.mdx", "b-module/lesson.md", "z.md"]);
    }

    #[test]
    fn test_find_files_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let result = find_files(&dir.path().join("missing"), &["md"], &[]);
        assert!(matches!(result, Err(PodgenError::InputNotFound(_))));
    }

    #[tokio::test]
    async fn test_read_script() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lesson.md");
        tokio::fs::write(&path, sample_script().render()).await.unwrap();

        let script = read_script(&path).await.unwrap();
        assert_eq!(script.frontmatter.source, "fundamentals/lesson-1.md");
    }
}
