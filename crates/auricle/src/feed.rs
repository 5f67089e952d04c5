// SPDX-FileCopyrightText: 2026 Auricle Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `auricle feed` command implementation.
//!
//! Replays an NDJSON event stream (one engine payload per line) through a
//! live aggregator actor, then prints the final snapshot as JSON. A
//! malformed line is skipped with a warning, mirroring the facade's
//! never-interrupt contract for bad payloads.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

use tracing::{info, warn};

use auricle_aggregate::AggregatorHandle;
use auricle_config::AuricleConfig;
use auricle_core::{AuricleError, MemorySampler, Snapshot};

/// Counters for one feed run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct FeedStats {
    pub submitted: u64,
    pub skipped: u64,
}

/// Runs the `auricle feed` command.
pub async fn run_feed(config: AuricleConfig, file: Option<PathBuf>) -> Result<(), AuricleError> {
    let reader: Box<dyn BufRead> = match &file {
        Some(path) => Box::new(BufReader::new(File::open(path).map_err(|e| {
            AuricleError::Config(format!("cannot open {}: {e}", path.display()))
        })?)),
        None => Box::new(BufReader::new(io::stdin())),
    };

    let (snapshot, stats) = collect_feed(&config, crate::sampler::host_sampler(), reader).await?;

    info!(
        submitted = stats.submitted,
        skipped = stats.skipped,
        "feed complete"
    );

    let rendered = serde_json::to_string_pretty(&snapshot)
        .map_err(|e| AuricleError::Internal(format!("cannot render snapshot: {e}")))?;
    println!("{rendered}");
    Ok(())
}

/// Feeds every NDJSON line through a spawned aggregator and returns the
/// final snapshot plus line counters.
async fn collect_feed(
    config: &AuricleConfig,
    sampler: Box<dyn MemorySampler>,
    reader: impl BufRead,
) -> Result<(Snapshot, FeedStats), AuricleError> {
    let handle = AggregatorHandle::spawn(config, sampler);
    let mut stats = FeedStats::default();

    for line in reader.lines() {
        let line = line.map_err(|e| AuricleError::Internal(format!("read error: {e}")))?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        match serde_json::from_str::<serde_json::Value>(trimmed) {
            Ok(value) => {
                handle.submit(value).await?;
                stats.submitted += 1;
            }
            Err(e) => {
                warn!(error = %e, "skipping malformed NDJSON line");
                stats.skipped += 1;
            }
        }
    }

    let snapshot = handle.snapshot().await?;
    handle.shutdown().await;
    Ok((snapshot, stats))
}
