// SPDX-FileCopyrightText: 2026 Auricle Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Auricle aggregation engine.

use thiserror::Error;

/// The primary error type used across the Auricle workspace.
///
/// None of these are fatal to a host application: classification failures
/// are logged and the offending payload dropped, and a missing memory
/// sampler degrades the pressure controller to a no-op. Capacity overflow
/// is deliberately absent -- it is handled silently by truncation policy,
/// not surfaced as an error.
#[derive(Debug, Error)]
pub enum AuricleError {
    /// Configuration errors (invalid TOML, out-of-range knobs).
    #[error("configuration error: {0}")]
    Config(String),

    /// An inbound event payload had no recognizable shape.
    #[error("unclassifiable event payload: {0}")]
    Classification(String),

    /// The host runtime does not expose managed-memory sampling.
    #[error("memory sampling unavailable: {0}")]
    Sampling(String),

    /// The aggregator actor is gone (its command queue is closed).
    #[error("aggregator unavailable: {0}")]
    Unavailable(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
