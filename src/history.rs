//! Command history for whisperterm
//!
//! In-memory history storage (most recent first) with a bounded navigation
//! cursor. Nothing is persisted; the history dies with the session.

/// Result of a history navigation step
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HistoryNav {
    /// Load this entry into the input line
    Recall(String),
    /// Walked off the newest entry: clear the input line
    ClearInput,
    /// Nothing to do
    Unchanged,
}

/// Command history storage with navigation cursor
///
/// Entries are stored most-recent-first. The cursor is either `None`
/// (no selection) or a valid index into the entries.
#[derive(Debug, Default)]
pub struct CommandHistory {
    /// All entries, newest at index 0
    entries: Vec<String>,
    /// Current navigation position
    cursor: Option<usize>,
}

impl CommandHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a command at the front of the history
    pub fn push(&mut self, command: &str) {
        self.entries.insert(0, command.to_string());
    }

    /// Step to an older entry (Up arrow)
    pub fn previous(&mut self) -> HistoryNav {
        let next_index = match self.cursor {
            None if self.entries.is_empty() => return HistoryNav::Unchanged,
            None => 0,
            Some(i) if i + 1 < self.entries.len() => i + 1,
            // Already at the oldest entry
            Some(_) => return HistoryNav::Unchanged,
        };
        self.cursor = Some(next_index);
        HistoryNav::Recall(self.entries[next_index].clone())
    }

    /// Step back toward the newest entry (Down arrow)
    pub fn next(&mut self) -> HistoryNav {
        match self.cursor {
            None => HistoryNav::Unchanged,
            Some(0) => {
                self.cursor = None;
                HistoryNav::ClearInput
            }
            Some(i) => {
                self.cursor = Some(i - 1);
                HistoryNav::Recall(self.entries[i - 1].clone())
            }
        }
    }

    /// Drop the navigation position (submit, Escape)
    pub fn reset_cursor(&mut self) {
        self.cursor = None;
    }

    /// Entries, newest first
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history(cmds: &[&str]) -> CommandHistory {
        let mut h = CommandHistory::new();
        for cmd in cmds {
            h.push(cmd);
        }
        h
    }

    #[test]
    fn test_newest_first() {
        let h = history(&["first", "second", "third"]);
        let entries: Vec<&str> = h.iter().collect();
        assert_eq!(entries, vec!["third", "second", "first"]);
    }

    #[test]
    fn test_previous_walks_to_oldest_and_stops() {
        let mut h = history(&["a", "b"]);

        assert_eq!(h.previous(), HistoryNav::Recall("b".to_string()));
        assert_eq!(h.previous(), HistoryNav::Recall("a".to_string()));
        // Bounded at the oldest entry
        assert_eq!(h.previous(), HistoryNav::Unchanged);
        assert_eq!(h.cursor(), Some(1));
    }

    #[test]
    fn test_next_without_selection_is_noop() {
        let mut h = history(&["a"]);
        assert_eq!(h.next(), HistoryNav::Unchanged);
        assert_eq!(h.cursor(), None);
    }

    #[test]
    fn test_next_at_newest_clears_input() {
        let mut h = history(&["a", "b"]);
        h.previous();
        assert_eq!(h.next(), HistoryNav::ClearInput);
        assert_eq!(h.cursor(), None);
    }

    #[test]
    fn test_bounded_walk_returns_to_empty() {
        // previous() N times then next() N times must end with a cleared input
        let mut h = history(&["one", "two", "three"]);
        let n = h.len();

        for _ in 0..n {
            assert!(matches!(h.previous(), HistoryNav::Recall(_)));
        }
        for i in 0..n {
            let step = h.next();
            if i + 1 == n {
                assert_eq!(step, HistoryNav::ClearInput);
            } else {
                assert!(matches!(step, HistoryNav::Recall(_)));
            }
        }
        assert_eq!(h.cursor(), None);
    }

    #[test]
    fn test_empty_history_navigation() {
        let mut h = CommandHistory::new();
        assert_eq!(h.previous(), HistoryNav::Unchanged);
        assert_eq!(h.next(), HistoryNav::Unchanged);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let h = history(&["help", "help"]);
        assert_eq!(h.len(), 2);
    }
}
