//! Speaker-turn chunking implementation.

use super::{chars_to_seconds, ChunkingConfig, DialogueChunk};
use std::iter::Peekable;
use std::str::Split;
use tracing::warn;

/// Splits dialogue at speaker-turn boundaries.
///
/// A new chunk starts before a line that opens a speaker turn when adding it
/// would push the open chunk past the soft ceiling. A chunk is never closed
/// before it holds a non-blank line, and blank lines always stay with the
/// open chunk. If the open chunk grows past the hard ceiling it is closed
/// immediately, together with any blank lines that follow, which can cut a
/// long turn in two.
pub struct SpeakerTurnChunker {
    config: ChunkingConfig,
    prefixes: Vec<String>,
}

impl SpeakerTurnChunker {
    pub fn new(config: ChunkingConfig) -> Self {
        let prefixes = config.speakers.iter().map(|s| format!("{}:", s)).collect();
        Self { config, prefixes }
    }

    pub fn config(&self) -> &ChunkingConfig {
        &self.config
    }

    /// Whether a line opens a new speaker turn.
    pub fn is_speaker_turn(&self, line: &str) -> bool {
        let trimmed = line.trim();
        self.prefixes.iter().any(|p| trimmed.starts_with(p.as_str()))
    }

    /// Iterate over the chunks of `text`. Each call starts from the beginning.
    pub fn chunks<'a>(&'a self, text: &'a str) -> Chunks<'a> {
        Chunks {
            chunker: self,
            lines: text.split('\n').peekable(),
            order: 0,
        }
    }

    fn seconds(&self, chars: usize) -> f64 {
        chars_to_seconds(chars, self.config.chars_per_minute)
    }
}

/// Iterator over the chunks of one dialogue.
pub struct Chunks<'a> {
    chunker: &'a SpeakerTurnChunker,
    lines: Peekable<Split<'a, char>>,
    order: usize,
}

impl Chunks<'_> {
    fn emit(&mut self, lines: &[&str], chars: usize, forced_split: bool) -> DialogueChunk {
        let chunk = DialogueChunk {
            text: lines.join("\n"),
            estimated_seconds: self.chunker.seconds(chars),
            order: self.order,
            forced_split,
        };
        self.order += 1;
        chunk
    }
}

impl Iterator for Chunks<'_> {
    type Item = DialogueChunk;

    fn next(&mut self) -> Option<DialogueChunk> {
        let chunker = self.chunker;
        let config = &chunker.config;
        let mut lines: Vec<&str> = Vec::new();
        let mut chars = 0usize;

        while let Some(&line) = self.lines.peek() {
            if line.trim().is_empty() {
                lines.push(line);
                self.lines.next();
                continue;
            }

            let line_chars = line.chars().count();
            let would_exceed_target = chunker.seconds(chars + line_chars) > config.target_seconds;

            if would_exceed_target && chars > 0 && chunker.is_speaker_turn(line) {
                // Leave the line for the next chunk.
                return Some(self.emit(&lines, chars, false));
            }

            lines.push(line);
            chars += line_chars;
            self.lines.next();

            if chunker.seconds(chars) > config.max_seconds {
                warn!(
                    "Chunk exceeds max duration ({:.1} min), forcing split",
                    chunker.seconds(chars) / 60.0
                );
                while let Some(&blank) = self.lines.peek().filter(|l| l.trim().is_empty()) {
                    lines.push(blank);
                    self.lines.next();
                }
                return Some(self.emit(&lines, chars, true));
            }
        }

        if lines.is_empty() {
            None
        } else {
            Some(self.emit(&lines, chars, false))
        }
    }
}
