//! podgen - course markdown to two-host podcast audio
//!
//! Turns technical course documentation into natural two-speaker podcast
//! episodes using the Gemini API for dialogue writing and multi-speaker
//! text-to-speech.
//!
//! # Overview
//!
//! podgen allows you to:
//! - Generate dialogue scripts from markdown/MDX course documents
//! - Synthesize scripts into WAV files, chunked to stay inside the TTS limits
//! - Process whole documentation trees in concurrency-limited batches
//! - Keep JSON manifests of everything generated
//! - Repair WAV files that were written without a header
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration and prompt templates
//! - `audio` - WAV container assembly and repair
//! - `chunking` - Speaker-turn dialogue chunking
//! - `retry` - Exponential backoff for transient API failures
//! - `gemini` - Gemini REST client
//! - `synthesis` - Speech synthesis
//! - `dialogue` - Dialogue generation
//! - `script` - Script files and markdown cleanup
//! - `manifest` - Output manifests
//! - `batch` - Concurrency-limited batch runner
//! - `orchestrator` - Pipeline coordination
//!
//! # Example
//!
//! ```rust,no_run
//! use podgen::config::Settings;
//! use podgen::orchestrator::Orchestrator;
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let orchestrator = Orchestrator::new(settings, std::env::var("GOOGLE_API_KEY")?)?;
//!
//!     let summary = orchestrator
//!         .synthesize_dialogue("Alex: Welcome!\nSam: Glad to be here.", Path::new("episode.wav"))
//!         .await?;
//!     println!("Wrote {} bytes in {} chunk(s)", summary.size, summary.chunks);
//!
//!     Ok(())
//! }
//! ```

pub mod audio;
pub mod batch;
pub mod chunking;
pub mod cli;
pub mod config;
pub mod dialogue;
pub mod error;
pub mod gemini;
pub mod manifest;
pub mod orchestrator;
pub mod retry;
pub mod script;
pub mod synthesis;

pub use error::{PodgenError, Result};
