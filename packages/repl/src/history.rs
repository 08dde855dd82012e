//! Line history that survives between sessions.
//!
//! The persisted record is newest-first with a trailing newline; in memory
//! the entries are kept oldest-first, the order a terminal recall list wants.
//! Recording follows the line editor's recall list rules exactly, so the
//! persisted record and the recall list never disagree.

use std::collections::VecDeque;

/// Store key for the persisted history.
pub const HISTORY_KEY: &str = "repl/history";

/// Default number of entries kept.
pub const DEFAULT_HISTORY_SIZE: usize = 1000;

/// Previously submitted lines, oldest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRecord {
    entries: VecDeque<String>,
    capacity: usize,
}

impl HistoryRecord {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity,
        }
    }

    /// Parse a persisted record (newest first) into chronological order.
    ///
    /// Empty entries are dropped; only the newest `capacity` entries are kept.
    /// Whitespace inside an entry is preserved.
    pub fn from_stored(text: &str, capacity: usize) -> Self {
        let mut record = Self::new(capacity);
        record.entries = text
            .trim_matches(['\r', '\n'])
            .split('\n')
            .filter(|line| !line.is_empty())
            .take(record.capacity)
            .map(str::to_string)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        record
    }

    /// Render the record for storage: newest first, newline-terminated.
    ///
    /// Works on a snapshot; the live entries are not touched.
    pub fn to_stored(&self) -> String {
        let snapshot: Vec<&str> = self.entries.iter().rev().map(String::as_str).collect();
        let mut text = snapshot.join("\n");
        text.push('\n');
        text
    }

    /// Record a submitted line. Returns whether the history changed.
    ///
    /// Empty lines and repeats of the most recent entry are not recorded,
    /// and a zero-capacity record stays empty.
    pub fn record(&mut self, line: &str) -> bool {
        if line.is_empty()
            || self.capacity == 0
            || self.entries.back().is_some_and(|last| last == line)
        {
            return false;
        }

        self.entries.push_back(line.to_string());
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
        true
    }

    /// Entries oldest first.
    pub fn entries(&self) -> Vec<String> {
        self.entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for HistoryRecord {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_text_loads_oldest_first() {
        let record = HistoryRecord::from_stored("b\na\n", DEFAULT_HISTORY_SIZE);
        assert_eq!(record.entries(), vec!["a", "b"]);
    }

    #[test]
    fn round_trip_after_new_line() {
        let mut record = HistoryRecord::from_stored("b\na\n", DEFAULT_HISTORY_SIZE);
        assert!(record.record("c"));
        assert_eq!(record.to_stored(), "c\nb\na\n");
    }

    #[test]
    fn empty_stored_text_is_empty_history() {
        assert!(HistoryRecord::from_stored("", 10).is_empty());
        assert!(HistoryRecord::from_stored("\n\n", 10).is_empty());
    }

    #[test]
    fn empty_lines_are_not_recorded() {
        let mut record = HistoryRecord::new(10);
        assert!(!record.record(""));
        assert!(record.is_empty());
    }

    #[test]
    fn whitespace_lines_are_recorded_like_the_recall_list() {
        let mut record = HistoryRecord::new(10);
        for line in ["x", "  ", "y"] {
            assert!(record.record(line));
        }
        assert_eq!(record.entries(), vec!["x", "  ", "y"]);
        assert_eq!(record.to_stored(), "y\n  \nx\n");

        let reloaded = HistoryRecord::from_stored(&record.to_stored(), 10);
        assert_eq!(reloaded.entries(), vec!["x", "  ", "y"]);
    }

    #[test]
    fn matches_line_editor_recall_list() {
        use reedline::{FileBackedHistory, History, HistoryItem, SearchDirection, SearchQuery};

        let lines = ["x", "  ", "y", "y", "", "x", " y ", "z"];
        for capacity in [0, 3, 10] {
            let mut recall = FileBackedHistory::new(capacity).unwrap();
            let mut record = HistoryRecord::new(capacity);
            for line in lines {
                recall.save(HistoryItem::from_command_line(line)).unwrap();
                record.record(line);
            }

            let recalled: Vec<String> = recall
                .search(SearchQuery::everything(SearchDirection::Forward, None))
                .unwrap()
                .into_iter()
                .map(|item| item.command_line)
                .collect();
            assert_eq!(record.entries(), recalled, "capacity {capacity}");
        }
    }

    #[test]
    fn zero_capacity_records_nothing() {
        let mut record = HistoryRecord::new(0);
        assert!(!record.record("x"));
        assert!(record.is_empty());
        assert!(HistoryRecord::from_stored("b\na\n", 0).is_empty());
    }

    #[test]
    fn consecutive_repeats_are_not_recorded() {
        let mut record = HistoryRecord::new(10);
        assert!(record.record("x"));
        assert!(!record.record("x"));
        assert!(record.record("y"));
        assert!(record.record("x"));
        assert_eq!(record.entries(), vec!["x", "y", "x"]);
    }

    #[test]
    fn capacity_drops_oldest() {
        let mut record = HistoryRecord::new(2);
        record.record("a");
        record.record("b");
        record.record("c");
        assert_eq!(record.entries(), vec!["b", "c"]);
        assert_eq!(record.to_stored(), "c\nb\n");
    }

    #[test]
    fn loading_keeps_newest_entries() {
        let record = HistoryRecord::from_stored("d\nc\nb\na\n", 2);
        assert_eq!(record.entries(), vec!["c", "d"]);
    }

    #[test]
    fn snapshot_does_not_alias_entries() {
        let mut record = HistoryRecord::new(10);
        record.record("a");
        let mut snapshot = record.entries();
        snapshot.reverse();
        snapshot.push("z".to_string());
        assert_eq!(record.entries(), vec!["a"]);
        assert_eq!(record.to_stored(), "a\n");
    }
}
