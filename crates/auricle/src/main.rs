// SPDX-FileCopyrightText: 2026 Auricle Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Auricle - streaming transcription aggregation engine.
//!
//! This is the binary entry point for the Auricle aggregator.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod feed;
mod sampler;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Auricle - streaming transcription aggregation engine.
#[derive(Parser, Debug)]
#[command(name = "auricle", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Replay an NDJSON event stream through the aggregator and print the
    /// final snapshot as JSON.
    Feed {
        /// Event file to read; stdin when omitted.
        file: Option<PathBuf>,
    },
    /// Print the resolved configuration.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup.
    let config = match auricle_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            auricle_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.agent.log_level);

    match cli.command {
        Some(Commands::Feed { file }) => {
            if let Err(e) = feed::run_feed(config, file).await {
                tracing::error!(error = %e, "feed failed");
                std::process::exit(1);
            }
        }
        Some(Commands::Config) => match toml::to_string_pretty(&config) {
            Ok(rendered) => print!("{rendered}"),
            Err(e) => {
                eprintln!("error: cannot render config: {e}");
                std::process::exit(1);
            }
        },
        None => {
            println!("auricle: use --help for available commands");
        }
    }
}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "warn,auricle={log_level},auricle_core={log_level},\
             auricle_config={log_level},auricle_aggregate={log_level}"
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
