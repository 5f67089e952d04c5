// SPDX-FileCopyrightText: 2026 Auricle Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rolling caption window: a small FIFO of recently spoken lines.
//!
//! Captions are a display aid with their own retention policy,
//! independent of the full transcript. Purely additive, no
//! deduplication -- identical short utterances are expected.

use std::collections::VecDeque;

use auricle_core::CaptionEntry;

/// Fixed-capacity FIFO of recent caption lines.
#[derive(Debug)]
pub struct CaptionWindow {
    entries: VecDeque<CaptionEntry>,
    capacity: usize,
}

impl CaptionWindow {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends an entry, evicting from the front until within capacity.
    pub fn push(&mut self, text: &str, timestamp_ms: i64) {
        self.entries.push_back(CaptionEntry {
            text: text.to_string(),
            timestamp_ms,
        });
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    /// Current entries in arrival order, most recent last.
    pub fn snapshot(&self) -> Vec<CaptionEntry> {
        self.entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overflow_evicts_oldest_first() {
        let mut window = CaptionWindow::new(5);
        for i in 0..10 {
            window.push(&format!("line {i}"), i);
        }
        assert_eq!(window.len(), 5);
        let entries = window.snapshot();
        // Arrival order preserved, oldest 5 evicted.
        let texts: Vec<&str> = entries.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["line 5", "line 6", "line 7", "line 8", "line 9"]);
    }

    #[test]
    fn duplicates_are_kept() {
        let mut window = CaptionWindow::new(5);
        window.push("yeah", 1);
        window.push("yeah", 2);
        window.push("yeah", 3);
        assert_eq!(window.len(), 3);
    }

    #[test]
    fn clear_empties_window() {
        let mut window = CaptionWindow::new(5);
        window.push("a", 1);
        window.clear();
        assert!(window.is_empty());
        assert!(window.snapshot().is_empty());
    }
}
