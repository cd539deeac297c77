//! # Undo/Redo History
//!
//! Linear history of whole editor-state snapshots.
//!
//! ## Design
//!
//! - Starts with one seed snapshot at index 0
//! - Recording truncates everything after the current index, appends, and
//!   points the index at the new last entry
//! - Undo and redo only move the index; nothing is discarded until the next
//!   recording after an undo
//! - An optional limit drops the oldest snapshots once exceeded
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut history = History::new(EditorState::default());
//!
//! history.record(next_state, "ADD_ELEMENT");
//!
//! let previous = history.undo();
//! let again = history.redo();
//! ```

use crate::EditorState;

/// One recorded snapshot
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub state: EditorState,

    /// Name of the intent that produced this snapshot
    pub label: Option<String>,
}

#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<HistoryEntry>,

    current: usize,

    /// Maximum number of retained snapshots (0 = unlimited)
    max_levels: usize,
}

impl History {
    /// Create a history seeded with `seed`, without a limit
    pub fn new(seed: EditorState) -> Self {
        Self::with_max_levels(seed, 0)
    }

    pub fn with_max_levels(seed: EditorState, max_levels: usize) -> Self {
        Self {
            entries: vec![HistoryEntry {
                state: seed,
                label: None,
            }],
            current: 0,
            max_levels,
        }
    }

    /// Append a snapshot after the current one, discarding any redo tail
    ///
    /// Returns the index of the new snapshot.
    pub fn record(&mut self, state: EditorState, label: impl Into<String>) -> usize {
        self.entries.truncate(self.current + 1);
        self.entries.push(HistoryEntry {
            state,
            label: Some(label.into()),
        });

        if self.max_levels > 0 && self.entries.len() > self.max_levels {
            let excess = self.entries.len() - self.max_levels;
            self.entries.drain(..excess);
        }

        self.current = self.entries.len() - 1;
        self.current
    }

    /// Step back one snapshot
    pub fn undo(&mut self) -> Option<&EditorState> {
        if !self.can_undo() {
            return None;
        }
        self.current -= 1;
        Some(self.current())
    }

    /// Step forward one snapshot
    pub fn redo(&mut self) -> Option<&EditorState> {
        if !self.can_redo() {
            return None;
        }
        self.current += 1;
        Some(self.current())
    }

    /// Throw everything away and start over from `seed`
    pub fn reset(&mut self, seed: EditorState) {
        self.entries.clear();
        self.entries.push(HistoryEntry {
            state: seed,
            label: None,
        });
        self.current = 0;
    }

    pub fn current(&self) -> &EditorState {
        &self.entries[self.current].state
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn can_undo(&self) -> bool {
        self.current > 0
    }

    pub fn can_redo(&self) -> bool {
        self.current + 1 < self.entries.len()
    }

    pub fn undo_levels(&self) -> usize {
        self.current
    }

    pub fn redo_levels(&self) -> usize {
        self.entries.len() - 1 - self.current
    }

    /// Label of the snapshot an undo would leave
    pub fn undo_description(&self) -> Option<&str> {
        if !self.can_undo() {
            return None;
        }
        self.entries[self.current].label.as_deref()
    }

    /// Label of the snapshot a redo would reach
    pub fn redo_description(&self) -> Option<&str> {
        self.entries.get(self.current + 1)?.label.as_deref()
    }

    pub fn max_levels(&self) -> usize {
        self.max_levels
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(EditorState::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use easel_model::{Node, NodeKind};

    fn state_with(name: &str) -> EditorState {
        let mut state = EditorState::default();
        state.elements[0].name = name.to_string();
        state
    }

    fn live_name(history: &History) -> &str {
        &history.current().elements[0].name
    }

    #[test]
    fn test_history_creation() {
        let history = History::default();
        assert_eq!(history.len(), 1);
        assert_eq!(history.current_index(), 0);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_record_undo_redo() {
        let mut history = History::default();
        history.record(state_with("v1"), "UPDATE_ELEMENT");
        history.record(state_with("v2"), "UPDATE_ELEMENT");
        assert_eq!(history.undo_levels(), 2);

        assert_eq!(history.undo().unwrap().elements[0].name, "v1");
        assert_eq!(history.redo_levels(), 1);
        assert_eq!(history.redo().unwrap().elements[0].name, "v2");
        assert!(history.redo().is_none());
        assert_eq!(live_name(&history), "v2");
    }

    #[test]
    fn test_undo_at_seed_is_none() {
        let mut history = History::default();
        assert!(history.undo().is_none());
        assert_eq!(history.current_index(), 0);
    }

    #[test]
    fn test_record_after_undo_truncates() {
        let mut history = History::default();
        for i in 1..=4 {
            history.record(state_with(&format!("v{}", i)), "UPDATE_ELEMENT");
        }
        history.undo();
        history.undo();
        assert_eq!(history.redo_levels(), 2);

        let index = history.record(state_with("branch"), "UPDATE_ELEMENT");
        assert_eq!(index, 3);
        assert_eq!(history.len(), 4);
        assert_eq!(history.redo_levels(), 0);
        assert_eq!(live_name(&history), "branch");
    }

    #[test]
    fn test_max_levels_drops_oldest() {
        let mut history = History::with_max_levels(state_with("seed"), 3);
        for i in 1..=5 {
            history.record(state_with(&format!("v{}", i)), "UPDATE_ELEMENT");
        }

        assert_eq!(history.len(), 3);
        assert_eq!(history.current_index(), 2);
        history.undo();
        history.undo();
        assert_eq!(live_name(&history), "v3");
        assert!(!history.can_undo());
    }

    #[test]
    fn test_descriptions() {
        let mut history = History::default();
        assert!(history.undo_description().is_none());

        history.record(state_with("v1"), "ADD_ELEMENT");
        assert_eq!(history.undo_description(), Some("ADD_ELEMENT"));

        history.undo();
        assert_eq!(history.redo_description(), Some("ADD_ELEMENT"));
        assert!(history.undo_description().is_none());
    }

    #[test]
    fn test_reset_discards_everything() {
        let mut history = History::default();
        history.record(state_with("v1"), "ADD_ELEMENT");

        let loaded = EditorState::with_elements(vec![
            Node::body().with_child(Node::new("t1", NodeKind::Text))
        ]);
        history.reset(loaded.clone());

        assert_eq!(history.len(), 1);
        assert_eq!(history.current(), &loaded);
    }
}
