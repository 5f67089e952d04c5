// SPDX-FileCopyrightText: 2026 Auricle Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./auricle.toml` > `~/.config/auricle/auricle.toml`
//! > `/etc/auricle/auricle.toml` with environment variable overrides via the
//! `AURICLE_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::AuricleConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/auricle/auricle.toml` (system-wide)
/// 3. `~/.config/auricle/auricle.toml` (user XDG config)
/// 4. `./auricle.toml` (local directory)
/// 5. `AURICLE_*` environment variables
pub fn load_config() -> Result<AuricleConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(AuricleConfig::default()))
        .merge(Toml::file("/etc/auricle/auricle.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("auricle/auricle.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("auricle.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<AuricleConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(AuricleConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<AuricleConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(AuricleConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `AURICLE_AGGREGATE_MAX_TOPICS` must map
/// to `aggregate.max_topics`, not `aggregate.max.topics`.
fn env_provider() -> Env {
    Env::prefixed("AURICLE_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: AURICLE_AGGREGATE_MAX_TOPICS -> "aggregate_max_topics"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("agent_", "agent.", 1)
            .replacen("aggregate_", "aggregate.", 1)
            .replacen("daemon_", "daemon.", 1);
        mapped.into()
    })
}
