// SPDX-FileCopyrightText: 2026 Auricle Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Event classifier: normalizes opaque engine payloads into typed events.
//!
//! The upstream engine delivers a heterogeneous stream: bare strings
//! (legacy final text), `type`-tagged text events, topic batches, and
//! research batches. Everything is mapped into the closed [`EngineEvent`]
//! set; payloads with no recognizable shape yield
//! [`AuricleError::Classification`], which the facade logs and drops.

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use auricle_core::{AuricleError, EngineEvent, ResearchRecord, TopicRecord};

/// `type`-tagged text payloads.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum TaggedPayload {
    Final {
        text: String,
    },
    Interim {
        text: String,
    },
    System {
        text: String,
    },
    Error {
        text: String,
    },
    Status {
        #[serde(default)]
        text: Option<String>,
    },
}

/// Research batch: a list of per-topic summaries.
#[derive(Debug, Deserialize)]
struct ResearchBatchPayload {
    summaries: Vec<ResearchRecord>,
}

/// Classifies a raw engine payload into a typed event.
///
/// A bare string is treated identically to `{type: "final"}`. An `error`
/// payload folds into the system-message path (the output set stays
/// closed). Classification never mutates state; a failure here cannot
/// corrupt anything downstream.
pub fn classify(raw: &Value) -> Result<EngineEvent, AuricleError> {
    if let Value::String(text) = raw {
        // Legacy engines deliver bare strings as committed text.
        return Ok(EngineEvent::Final { text: text.clone() });
    }

    let Some(obj) = raw.as_object() else {
        return Err(AuricleError::Classification(format!(
            "expected string or object, got {}",
            json_kind(raw)
        )));
    };

    if obj.contains_key("type") {
        let tagged: TaggedPayload = serde_json::from_value(raw.clone())
            .map_err(|e| AuricleError::Classification(e.to_string()))?;
        return Ok(match tagged {
            TaggedPayload::Final { text } => EngineEvent::Final { text },
            TaggedPayload::Interim { text } => EngineEvent::Interim { text },
            TaggedPayload::System { text } => EngineEvent::System { text },
            TaggedPayload::Error { text } => {
                warn!(text = text.as_str(), "engine reported an error event");
                EngineEvent::System { text }
            }
            TaggedPayload::Status { text } => EngineEvent::Status { text },
        });
    }

    if obj.contains_key("summaries") {
        let batch: ResearchBatchPayload = serde_json::from_value(raw.clone())
            .map_err(|e| AuricleError::Classification(e.to_string()))?;
        return Ok(EngineEvent::Research(batch.summaries));
    }

    if obj.contains_key("topics") || obj.contains_key("questions") || obj.contains_key("terms") {
        let record: TopicRecord = serde_json::from_value(raw.clone())
            .map_err(|e| AuricleError::Classification(e.to_string()))?;
        return Ok(EngineEvent::Topics(record));
    }

    Err(AuricleError::Classification(
        "object has no recognizable event shape".to_string(),
    ))
}

/// Human-readable JSON value kind for error messages.
fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
