// SPDX-FileCopyrightText: 2026 Auricle Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Auricle aggregation engine.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Auricle configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment
/// variable overrides. All sections are optional and default to sensible
/// values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AuricleConfig {
    /// Process identity and logging settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Aggregation store capacities and transcript budgets.
    #[serde(default)]
    pub aggregate: AggregateConfig,

    /// Memory-pressure sampling settings.
    #[serde(default)]
    pub daemon: DaemonConfig,
}

/// Process identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name of this instance.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_agent_name() -> String {
    "auricle".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Capacities and budgets for the aggregation stores.
///
/// These bound what an open-ended recording session may hold in memory;
/// overflow is resolved by dropping the oldest content, never the newest.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AggregateConfig {
    /// Committed-transcript size (chars) that triggers front truncation.
    #[serde(default = "default_max_transcript_chars")]
    pub max_transcript_chars: usize,

    /// Line count the transcript is cut back to when over the char budget.
    #[serde(default = "default_max_transcript_lines")]
    pub max_transcript_lines: usize,

    /// Rolling caption window capacity.
    #[serde(default = "default_max_captions")]
    pub max_captions: usize,

    /// Topic store capacity.
    #[serde(default = "default_max_topics")]
    pub max_topics: usize,

    /// Research store capacity.
    #[serde(default = "default_max_research")]
    pub max_research: usize,
}

impl Default for AggregateConfig {
    fn default() -> Self {
        Self {
            max_transcript_chars: default_max_transcript_chars(),
            max_transcript_lines: default_max_transcript_lines(),
            max_captions: default_max_captions(),
            max_topics: default_max_topics(),
            max_research: default_max_research(),
        }
    }
}

fn default_max_transcript_chars() -> usize {
    8000
}

fn default_max_transcript_lines() -> usize {
    80
}

fn default_max_captions() -> usize {
    5
}

fn default_max_topics() -> usize {
    10
}

fn default_max_research() -> usize {
    5
}

/// Memory-pressure sampling configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DaemonConfig {
    /// Heap usage (MB) above which pressure cleanup triggers.
    #[serde(default = "default_memory_warn_mb")]
    pub memory_warn_mb: u64,

    /// Used-to-limit ratio above which pressure cleanup triggers.
    #[serde(default = "default_memory_warn_ratio")]
    pub memory_warn_ratio: f64,

    /// Interval between memory samples, in milliseconds.
    #[serde(default = "default_sample_interval_ms")]
    pub sample_interval_ms: u64,
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            memory_warn_mb: default_memory_warn_mb(),
            memory_warn_ratio: default_memory_warn_ratio(),
            sample_interval_ms: default_sample_interval_ms(),
        }
    }
}

fn default_memory_warn_mb() -> u64 {
    100
}

fn default_memory_warn_ratio() -> f64 {
    0.7
}

fn default_sample_interval_ms() -> u64 {
    30_000
}
