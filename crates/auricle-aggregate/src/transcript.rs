// SPDX-FileCopyrightText: 2026 Auricle Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Transcript reconciler: merges final and interim text into one logical
//! buffer with a front-truncation budget.
//!
//! Committed text is append-only and newline-joined. The interim line is a
//! distinct optional field rather than a marked substring of the buffer,
//! which makes "at most one provisional line" structural: a new interim
//! replaces the old one by assignment, and a final clears it.
//!
//! Truncation is an explicit, lossy policy: a long-running session must
//! bound memory over correctness of complete history. Content is only ever
//! dropped from the front (the oldest lines), never the middle or end.

use tracing::info;

/// The reconciled transcript buffer.
#[derive(Debug)]
pub struct TranscriptBuffer {
    /// Newline-joined final and system lines. Append-only between
    /// truncations.
    committed: String,
    /// At most one pending provisional line.
    interim: Option<String>,
    /// Word count of committed text, recomputed on every mutation.
    word_count: usize,
    /// Committed size (bytes) that triggers truncation on the next final.
    max_chars: usize,
    /// Line count the buffer is cut back to when over budget.
    max_lines: usize,
}

impl TranscriptBuffer {
    pub fn new(max_chars: usize, max_lines: usize) -> Self {
        Self {
            committed: String::new(),
            interim: None,
            word_count: 0,
            max_chars,
            max_lines,
        }
    }

    /// Commits a final segment.
    ///
    /// Any pending interim line is superseded and removed -- the final is
    /// authoritative. The size budget is enforced before appending, so the
    /// new segment is never part of what gets dropped.
    pub fn append_final(&mut self, text: &str) {
        self.interim = None;
        self.enforce_budget();
        self.push_line(text);
    }

    /// Appends a system line.
    ///
    /// System lines bypass the interim-replacement rule and are never
    /// deduplicated.
    pub fn append_system(&mut self, text: &str) {
        self.push_line(text);
    }

    /// Replaces the pending interim line.
    ///
    /// Committed text is never mutated by interim updates; only the
    /// working view changes until a matching final arrives. Valid as the
    /// first event of a session.
    pub fn set_interim(&mut self, text: &str) {
        self.interim = Some(text.to_string());
    }

    /// Clears committed text and interim state (session start).
    pub fn reset(&mut self) {
        self.committed.clear();
        self.interim = None;
        self.word_count = 0;
    }

    /// Keeps only the last `n` lines of committed text.
    ///
    /// Used by emergency pressure cleanup: the transcript is reset to a
    /// trailing suffix, not to empty. Idempotent for a fixed `n`.
    pub fn truncate_to_last(&mut self, n: usize) {
        let lines: Vec<&str> = self.committed.lines().collect();
        if lines.len() > n {
            self.committed = lines[lines.len() - n..].join("\n");
            self.word_count = self.committed.split_whitespace().count();
        }
    }

    /// The working view: committed text plus the pending interim line.
    pub fn rendered(&self) -> String {
        match &self.interim {
            None => self.committed.clone(),
            Some(line) if self.committed.is_empty() => line.clone(),
            Some(line) => format!("{}\n{}", self.committed, line),
        }
    }

    pub fn committed(&self) -> &str {
        &self.committed
    }

    pub fn interim(&self) -> Option<&str> {
        self.interim.as_deref()
    }

    pub fn word_count(&self) -> usize {
        self.word_count
    }

    fn enforce_budget(&mut self) {
        if self.committed.len() > self.max_chars {
            let before = self.committed.lines().count();
            self.truncate_to_last(self.max_lines);
            info!(
                dropped_lines = before.saturating_sub(self.max_lines),
                kept_lines = self.max_lines,
                "transcript over size budget, dropped oldest lines"
            );
        }
    }

    fn push_line(&mut self, text: &str) {
        if !self.committed.is_empty() {
            self.committed.push('\n');
        }
        self.committed.push_str(text);
        self.word_count = self.committed.split_whitespace().count();
    }
}
