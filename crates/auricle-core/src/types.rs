// SPDX-FileCopyrightText: 2026 Auricle Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared across the Auricle workspace.

use serde::{Deserialize, Serialize};

/// Unique identifier for a recording session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

/// A typed event produced by the classifier from an opaque engine payload.
///
/// This is the closed set of shapes the rest of the pipeline understands.
/// Anything the classifier cannot map into one of these is dropped at the
/// facade boundary with a warning.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// A transcription segment the engine will not revise.
    Final { text: String },
    /// A provisional segment, superseded by a final or a newer interim.
    Interim { text: String },
    /// An engine-side system or error message, shown inline.
    System { text: String },
    /// A transient status indicator ("listening", "researching...").
    Status { text: Option<String> },
    /// A batch of extracted topics, questions, and terms.
    Topics(TopicRecord),
    /// A batch of research summaries.
    Research(Vec<ResearchRecord>),
}

/// Topics, questions, and notable terms extracted from a stretch of
/// transcript. Keyed by `timestamp_ms` for deduplication on redelivery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicRecord {
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub questions: Vec<String>,
    #[serde(default)]
    pub terms: Vec<String>,
    #[serde(rename = "timestamp")]
    pub timestamp_ms: i64,
}

/// A research result for one topic. Keyed by `(topic, timestamp_ms)`;
/// two summaries for the same topic with distinct timestamps are both
/// kept, never merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchRecord {
    pub topic: String,
    pub summary: String,
    #[serde(default)]
    pub sources: Vec<serde_json::Value>,
    #[serde(rename = "timestamp")]
    pub timestamp_ms: i64,
}

/// One line of the rolling caption window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionEntry {
    pub text: String,
    #[serde(rename = "timestamp")]
    pub timestamp_ms: i64,
}

/// An immutable point-in-time copy of aggregated conversation state.
///
/// Consumers receive this by value -- never a handle into live stores --
/// so a slow reader cannot stall ingestion or observe a half-applied
/// mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub session_id: SessionId,
    /// The working transcript view: committed text plus the pending
    /// interim line, if any.
    pub transcript: String,
    /// Word count of committed text (interim text is provisional and
    /// excluded).
    pub word_count: usize,
    /// The latest engine status indicator, if one is pending.
    pub status: Option<String>,
    pub captions: Vec<CaptionEntry>,
    pub topics: Vec<TopicRecord>,
    pub research: Vec<ResearchRecord>,
}

/// A single managed-memory sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryReading {
    /// Bytes currently allocated on the managed heap.
    pub used_bytes: u64,
    /// Upper bound the host considers available to this process.
    pub limit_bytes: u64,
}

impl MemoryReading {
    /// Used-to-limit ratio, `0.0` when the limit is unknown or zero.
    pub fn ratio(&self) -> f64 {
        if self.limit_bytes == 0 {
            0.0
        } else {
            self.used_bytes as f64 / self.limit_bytes as f64
        }
    }
}
