//! CLI module for podgen.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// podgen - course markdown to two-host podcast audio
///
/// Generates dialogue scripts from course documentation and synthesizes them
/// into WAV files with Gemini multi-speaker text-to-speech.
#[derive(Parser, Debug)]
#[command(name = "podgen")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Synthesize audio from generated podcast scripts
    Audio {
        /// Script files to synthesize (default: every script in the scripts directory)
        files: Vec<PathBuf>,

        /// Number of files processed concurrently
        #[arg(short = 'j', long)]
        concurrency: Option<usize>,
    },

    /// Generate podcast scripts from course documentation
    Script {
        /// Documents to convert (default: every document in the docs directory)
        files: Vec<PathBuf>,

        /// Number of files processed concurrently
        #[arg(short = 'j', long)]
        concurrency: Option<usize>,
    },

    /// Generate audio directly from course documentation
    Podcast {
        /// Documents to convert (default: every document in the docs directory)
        files: Vec<PathBuf>,

        /// Number of files processed concurrently
        #[arg(short = 'j', long)]
        concurrency: Option<usize>,
    },

    /// Show how a script or dialogue file would be chunked (no API calls)
    Chunk {
        /// Script (with frontmatter) or plain dialogue file
        input: PathBuf,

        /// Override the target chunk duration in seconds
        #[arg(long)]
        target: Option<u32>,

        /// Print the text of each chunk
        #[arg(long)]
        show_text: bool,
    },

    /// Add missing WAV headers to raw PCM files
    Repair {
        /// Directory to scan (default: the audio output directory)
        dir: Option<PathBuf>,
    },

    /// Check API key, directories and configuration
    Doctor,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_audio_with_files() {
        let cli = Cli::try_parse_from(["podgen", "-vv", "audio", "a.md", "b.md", "-j", "2"]).unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Audio { files, concurrency } => {
                assert_eq!(files, vec![PathBuf::from("a.md"), PathBuf::from("b.md")]);
                assert_eq!(concurrency, Some(2));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_config_init() {
        let cli = Cli::try_parse_from(["podgen", "config", "init", "--force", "-c", "x.toml"]).unwrap();
        assert_eq!(cli.config.as_deref(), Some("x.toml"));
        assert!(matches!(
            cli.command,
            Commands::Config {
                action: ConfigAction::Init { force: true }
            }
        ));
    }
}
