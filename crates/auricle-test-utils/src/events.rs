// SPDX-FileCopyrightText: 2026 Auricle Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Builders for the JSON payload shapes the engine delivers.
//!
//! Each builder returns a `serde_json::Value` ready to pass to
//! `Aggregator::submit` / `AggregatorHandle::submit`.

use serde_json::{json, Value};

/// `{type: "final", text}` -- a committed transcription segment.
pub fn final_text(text: &str) -> Value {
    json!({"type": "final", "text": text})
}

/// `{type: "interim", text}` -- a provisional segment.
pub fn interim_text(text: &str) -> Value {
    json!({"type": "interim", "text": text})
}

/// `{type: "system", text}` -- an engine system message.
pub fn system_text(text: &str) -> Value {
    json!({"type": "system", "text": text})
}

/// `{type: "error", text}` -- an engine error report.
pub fn error_text(text: &str) -> Value {
    json!({"type": "error", "text": text})
}

/// `{type: "status"}` ping, with an optional indicator text.
pub fn status(text: Option<&str>) -> Value {
    match text {
        Some(t) => json!({"type": "status", "text": t}),
        None => json!({"type": "status"}),
    }
}

/// A topic extraction batch.
pub fn topic_batch(
    topics: &[&str],
    questions: &[&str],
    terms: &[&str],
    timestamp_ms: i64,
) -> Value {
    json!({
        "topics": topics,
        "questions": questions,
        "terms": terms,
        "timestamp": timestamp_ms,
    })
}

/// A research batch from `(topic, summary, timestamp)` triples.
pub fn research_batch(summaries: &[(&str, &str, i64)]) -> Value {
    let entries: Vec<Value> = summaries
        .iter()
        .map(|(topic, summary, ts)| {
            json!({
                "topic": topic,
                "summary": summary,
                "sources": [],
                "timestamp": ts,
            })
        })
        .collect();
    json!({"summaries": entries})
}
