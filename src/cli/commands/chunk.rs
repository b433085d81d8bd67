//! Chunk command - show the chunk plan for a dialogue without calling the API.

use crate::chunking::{estimate_duration, DialogueChunk, SpeakerTurnChunker};
use crate::cli::Output;
use crate::config::Settings;
use crate::script::PodcastScript;
use anyhow::{Context, Result};
use std::path::Path;

/// Run the chunk command.
pub fn run_chunk(input: &Path, target: Option<u32>, show_text: bool, settings: &Settings) -> Result<()> {
    let content = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;

    // Scripts carry frontmatter; anything else is taken as bare dialogue
    let dialogue = if content.starts_with("---") {
        PodcastScript::parse(&content)?.dialogue
    } else {
        content
    };

    let mut config = settings.chunking_config();
    if let Some(seconds) = target {
        config.target_seconds = seconds as f64;
    }

    let chunker = SpeakerTurnChunker::new(config);
    let chunks: Vec<DialogueChunk> = chunker.chunks(&dialogue).collect();

    Output::header(&format!("Chunk plan for {}", input.display()));
    Output::kv(
        "Estimated duration",
        &format!(
            "{:.1} min",
            estimate_duration(&dialogue, chunker.config().chars_per_minute) / 60.0
        ),
    );
    Output::kv(
        "Target / max",
        &format!(
            "{}s / {}s",
            chunker.config().target_seconds,
            chunker.config().max_seconds
        ),
    );
    println!();

    for chunk in &chunks {
        Output::chunk_info(
            chunk.order,
            chunk.text.chars().count(),
            &chunk.format_duration(),
            chunk.forced_split,
        );
        if show_text {
            for line in chunk.text.lines() {
                println!("      {}", line);
            }
            println!();
        }
    }

    let forced = chunks.iter().filter(|c| c.forced_split).count();
    if forced > 0 {
        Output::warning(&format!(
            "{} chunk(s) hit the hard ceiling and may split a speaker turn",
            forced
        ));
    }
    Output::success(&format!("{} chunk(s)", chunks.len()));

    Ok(())
}
