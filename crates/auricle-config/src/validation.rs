// SPDX-FileCopyrightText: 2026 Auricle Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as non-zero capacities and in-range ratios.

use crate::diagnostic::ConfigError;
use crate::model::AuricleConfig;

const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)`
/// with all collected validation errors (does not fail fast).
pub fn validate_config(config: &AuricleConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if !VALID_LOG_LEVELS.contains(&config.agent.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "agent.log_level must be one of {}, got `{}`",
                VALID_LOG_LEVELS.join(", "),
                config.agent.log_level
            ),
        });
    }

    // Every capacity must be at least 1: a zero-capacity store would drop
    // each insert immediately and a zero transcript budget would truncate
    // on every final segment.
    let capacities = [
        ("aggregate.max_transcript_chars", config.aggregate.max_transcript_chars),
        ("aggregate.max_transcript_lines", config.aggregate.max_transcript_lines),
        ("aggregate.max_captions", config.aggregate.max_captions),
        ("aggregate.max_topics", config.aggregate.max_topics),
        ("aggregate.max_research", config.aggregate.max_research),
    ];
    for (key, value) in capacities {
        if value == 0 {
            errors.push(ConfigError::Validation {
                message: format!("{key} must be at least 1, got 0"),
            });
        }
    }

    if config.daemon.memory_warn_mb == 0 {
        errors.push(ConfigError::Validation {
            message: "daemon.memory_warn_mb must be at least 1, got 0".to_string(),
        });
    }

    let ratio = config.daemon.memory_warn_ratio;
    if !(ratio > 0.0 && ratio <= 1.0) {
        errors.push(ConfigError::Validation {
            message: format!(
                "daemon.memory_warn_ratio must be in (0.0, 1.0], got {ratio}"
            ),
        });
    }

    if config.daemon.sample_interval_ms == 0 {
        errors.push(ConfigError::Validation {
            message: "daemon.sample_interval_ms must be at least 1, got 0".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
