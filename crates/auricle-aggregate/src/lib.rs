// SPDX-FileCopyrightText: 2026 Auricle Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Streaming aggregation pipeline for the Auricle engine.
//!
//! The [`Aggregator`] facade owns all conversation state: the reconciled
//! transcript, the rolling caption window, the bounded topic/research
//! stores, and the memory-pressure controller. [`AggregatorHandle`] wraps
//! it in an actor: commands arrive on an mpsc queue and the sampling tick
//! runs in the same `select!` loop, so every mutation -- including
//! emergency truncation -- is serialized without locks. Snapshot readers
//! receive a copy and can never stall ingestion.

pub mod captions;
pub mod classify;
pub mod pressure;
pub mod records;
pub mod session;
pub mod transcript;

use std::time::Duration;

use serde_json::Value;
use tokio::sync::{mpsc, oneshot};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use auricle_config::AuricleConfig;
use auricle_core::{AuricleError, MemorySampler, Snapshot};

pub use classify::classify;
pub use pressure::PressureState;
pub use session::Aggregator;

/// Commands accepted by the aggregator actor.
enum Command {
    Submit(Value),
    Snapshot(oneshot::Sender<Snapshot>),
    Reset,
}

/// Handle to a spawned aggregator actor.
///
/// The actor processes one command at a time to completion; `submit`
/// calls from concurrent producers are serialized by the queue. Dropping
/// the handle (or calling [`shutdown`](Self::shutdown)) stops the actor.
pub struct AggregatorHandle {
    tx: mpsc::Sender<Command>,
    cancel: CancellationToken,
    join: tokio::task::JoinHandle<()>,
}

impl AggregatorHandle {
    /// Spawns the actor task that owns the [`Aggregator`].
    ///
    /// The memory-sampling tick runs on the actor's own loop at
    /// `daemon.sample_interval_ms`, never on a separate thread.
    pub fn spawn(config: &AuricleConfig, sampler: Box<dyn MemorySampler>) -> Self {
        let (tx, mut rx) = mpsc::channel(512);
        let cancel = CancellationToken::new();
        let loop_cancel = cancel.clone();

        let mut aggregator = Aggregator::new(&config.aggregate, &config.daemon, sampler);
        let interval_ms = config.daemon.sample_interval_ms;

        let join = tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_millis(interval_ms));
            // Skip the first immediate tick.
            interval.tick().await;

            loop {
                tokio::select! {
                    cmd = rx.recv() => match cmd {
                        Some(Command::Submit(raw)) => aggregator.submit(&raw),
                        Some(Command::Snapshot(reply)) => {
                            // Receiver may be gone; a dropped reply is fine.
                            let _ = reply.send(aggregator.snapshot());
                        }
                        Some(Command::Reset) => aggregator.reset_session(),
                        None => {
                            debug!("all handles dropped, aggregator stopping");
                            break;
                        }
                    },
                    _ = interval.tick() => aggregator.tick(),
                    _ = loop_cancel.cancelled() => {
                        info!("aggregator shutting down");
                        break;
                    }
                }
            }
        });

        Self { tx, cancel, join }
    }

    /// Enqueues one raw engine payload.
    ///
    /// Returns an error only when the actor is gone -- never for a
    /// malformed payload, which the actor logs and drops.
    pub async fn submit(&self, raw: Value) -> Result<(), AuricleError> {
        self.tx
            .send(Command::Submit(raw))
            .await
            .map_err(|_| AuricleError::Unavailable("command queue closed".into()))
    }

    /// Requests a point-in-time snapshot, delivered by value.
    pub async fn snapshot(&self) -> Result<Snapshot, AuricleError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(Command::Snapshot(reply_tx))
            .await
            .map_err(|_| AuricleError::Unavailable("command queue closed".into()))?;
        reply_rx
            .await
            .map_err(|_| AuricleError::Unavailable("aggregator dropped snapshot request".into()))
    }

    /// Starts a fresh recording session, clearing all state.
    pub async fn reset_session(&self) -> Result<(), AuricleError> {
        self.tx
            .send(Command::Reset)
            .await
            .map_err(|_| AuricleError::Unavailable("command queue closed".into()))
    }

    /// Cancels the actor and waits for it to exit.
    pub async fn shutdown(self) {
        self.cancel.cancel();
        let _ = self.join.await;
    }
}
