// SPDX-FileCopyrightText: 2026 Auricle Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Auricle aggregation engine.
//!
//! This crate provides the error type, shared domain types, and capability
//! traits used throughout the Auricle workspace. The aggregation pipeline
//! itself lives in `auricle-aggregate`; host-specific adapters (memory
//! samplers) implement traits defined here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::AuricleError;
pub use traits::{MemorySampler, NoopSampler};
pub use types::{
    CaptionEntry, EngineEvent, MemoryReading, ResearchRecord, SessionId, Snapshot, TopicRecord,
};
