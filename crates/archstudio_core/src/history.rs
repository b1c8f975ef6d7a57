//! crates/archstudio_core/src/history.rs
//!
//! A linear undo/redo stack of image states for the active canvas. Pushing
//! a new state discards any redo entries beyond the cursor; there is never a
//! tree of branches.

use crate::domain::ImageData;

/// The edit history for one canvas. The cursor, when present, always points
/// at a valid entry.
#[derive(Debug, Clone, Default)]
pub struct EditHistory {
    entries: Vec<ImageData>,
    cursor: Option<usize>,
}

impl EditHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// A history seeded with a single initial state (a freshly uploaded
    /// image) with the cursor on it.
    pub fn seeded(initial: ImageData) -> Self {
        Self {
            entries: vec![initial],
            cursor: Some(0),
        }
    }

    /// Truncates everything after the cursor, appends the new state and
    /// moves the cursor onto it.
    pub fn push(&mut self, state: ImageData) {
        let keep = match self.cursor {
            Some(cursor) => cursor + 1,
            None => 0,
        };
        self.entries.truncate(keep);
        self.entries.push(state);
        self.cursor = Some(self.entries.len() - 1);
    }

    /// Steps the cursor back one entry and returns it. No-op at the start of
    /// the timeline or on an empty stack.
    pub fn undo(&mut self) -> Option<&ImageData> {
        match self.cursor {
            Some(cursor) if cursor > 0 => {
                self.cursor = Some(cursor - 1);
                self.entries.get(cursor - 1)
            }
            _ => None,
        }
    }

    /// Steps the cursor forward one entry and returns it. No-op at the end
    /// of the timeline.
    pub fn redo(&mut self) -> Option<&ImageData> {
        match self.cursor {
            Some(cursor) if cursor + 1 < self.entries.len() => {
                self.cursor = Some(cursor + 1);
                self.entries.get(cursor + 1)
            }
            _ => None,
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = None;
    }

    /// The state under the cursor, if any.
    pub fn current(&self) -> Option<&ImageData> {
        self.cursor.and_then(|c| self.entries.get(c))
    }

    pub fn can_undo(&self) -> bool {
        matches!(self.cursor, Some(c) if c > 0)
    }

    pub fn can_redo(&self) -> bool {
        matches!(self.cursor, Some(c) if c + 1 < self.entries.len())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn img(tag: &str) -> ImageData {
        ImageData::new("image/png", tag.as_bytes().to_vec())
    }

    #[test]
    fn push_after_undo_discards_redo_branch() {
        let mut history = EditHistory::new();
        history.push(img("s1"));
        history.push(img("s2"));
        assert_eq!(history.undo(), Some(&img("s1")));

        history.push(img("s3"));
        assert_eq!(history.len(), 2);
        assert_eq!(history.current(), Some(&img("s3")));
        // s2 is gone for good; redo must be a no-op now.
        assert_eq!(history.redo(), None);
        assert_eq!(history.undo(), Some(&img("s1")));
    }

    #[test]
    fn undo_is_noop_on_empty_and_at_position_zero() {
        let mut history = EditHistory::new();
        assert_eq!(history.undo(), None);

        history.push(img("only"));
        assert_eq!(history.undo(), None);
        assert_eq!(history.current(), Some(&img("only")));
    }

    #[test]
    fn redo_is_noop_at_last_index() {
        let mut history = EditHistory::new();
        history.push(img("a"));
        history.push(img("b"));
        assert_eq!(history.redo(), None);

        history.undo();
        assert_eq!(history.redo(), Some(&img("b")));
        assert_eq!(history.redo(), None);
    }

    #[test]
    fn clear_resets_to_empty() {
        let mut history = EditHistory::seeded(img("base"));
        history.push(img("next"));
        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.current(), None);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn seeded_history_starts_at_the_initial_state() {
        let history = EditHistory::seeded(img("upload"));
        assert_eq!(history.current(), Some(&img("upload")));
        assert!(!history.can_undo());
    }
}
