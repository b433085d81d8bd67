//! podgen CLI entry point.

use anyhow::Result;
use clap::Parser;
use podgen::cli::{commands, Cli, Commands};
use podgen::config::Settings;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // API keys may live in a local .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Load configuration
    let config_path = cli.config.as_ref().map(PathBuf::from);
    let settings = Settings::load_from(config_path.as_ref())?;

    // Initialize logging
    let log_level = match cli.verbose {
        0 => settings.general.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("podgen={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Execute command
    match cli.command {
        Commands::Audio { files, concurrency } => {
            commands::run_generate(commands::GenerateKind::Audio, files, concurrency, settings).await?;
        }

        Commands::Script { files, concurrency } => {
            commands::run_generate(commands::GenerateKind::Script, files, concurrency, settings).await?;
        }

        Commands::Podcast { files, concurrency } => {
            commands::run_generate(commands::GenerateKind::Podcast, files, concurrency, settings).await?;
        }

        Commands::Chunk {
            input,
            target,
            show_text,
        } => {
            commands::run_chunk(&input, target, show_text, &settings)?;
        }

        Commands::Repair { dir } => {
            commands::run_repair(dir, &settings)?;
        }

        Commands::Doctor => {
            commands::run_doctor(&settings)?;
        }

        Commands::Config { action } => {
            commands::run_config(&action, settings, config_path)?;
        }
    }

    Ok(())
}
