//! Selection set scoped to the visible page.
//!
//! # Design
//! - Members are always a subset of the rows currently on screen.
//! - `set_visible_context` is the one place that reacts to page, filter, or list changes.
//! - Bulk eligibility is derived, never stored.

use std::collections::BTreeSet;

/// Page and filter that define what is visible.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VisibleContext {
    /// One-based page number.
    pub page: usize,
    /// Active filter term as typed.
    pub filter: String,
}

impl Default for VisibleContext {
    fn default() -> Self {
        Self {
            page: 1,
            filter: String::new(),
        }
    }
}

/// Checked entries for bulk actions.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionController {
    selected: BTreeSet<String>,
    context: VisibleContext,
}

impl SelectionController {
    /// Flip membership of `id`; returns whether it is now selected.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.selected.remove(id) {
            false
        } else {
            self.selected.insert(id.to_string());
            true
        }
    }

    /// Select every visible entry, or clear when they are all already selected.
    pub fn select_all_visible<S: AsRef<str>>(&mut self, visible: &[S]) {
        if self.all_selected(visible) {
            self.selected.clear();
        } else {
            self.selected = visible.iter().map(|id| id.as_ref().to_string()).collect();
        }
    }

    /// Whether the selection equals the visible set exactly.
    #[must_use]
    pub fn all_selected<S: AsRef<str>>(&self, visible: &[S]) -> bool {
        if visible.is_empty() || self.selected.len() != visible.len() {
            return false;
        }
        visible
            .iter()
            .all(|id| self.selected.contains(id.as_ref()))
    }

    /// Empty the selection.
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Sync with the visible rows.
    ///
    /// A new page or filter clears the selection. The same context prunes
    /// members that dropped off the page after a list refresh. Returns whether
    /// the selection changed.
    pub fn set_visible_context<S: AsRef<str>>(
        &mut self,
        context: VisibleContext,
        visible: &[S],
    ) -> bool {
        let before = self.selected.len();
        if context == self.context {
            self.selected
                .retain(|id| visible.iter().any(|row| row.as_ref() == id));
        } else {
            self.context = context;
            self.selected.clear();
        }
        before != self.selected.len()
    }

    /// Drop one entry after it was removed; non-members are ignored.
    pub fn forget(&mut self, id: &str) -> bool {
        self.selected.remove(id)
    }

    /// Empty the selection once a bulk action consumed it.
    pub fn complete_bulk(&mut self) {
        self.selected.clear();
    }

    /// Selected entries in sorted order, as submitted to bulk endpoints.
    #[must_use]
    pub fn selected(&self) -> Vec<String> {
        self.selected.iter().cloned().collect()
    }

    /// Membership test.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    /// Number of selected entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Whether nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Bulk actions are enabled for a non-empty selection with nothing in flight.
    #[must_use]
    pub fn can_bulk_act(&self, in_flight: bool) -> bool {
        !in_flight && !self.selected.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|id| (*id).to_string()).collect()
    }

    #[test]
    fn toggle_adds_and_removes() {
        let mut selection = SelectionController::default();
        assert!(selection.toggle("a.com"));
        assert!(selection.contains("a.com"));
        assert!(!selection.toggle("a.com"));
        assert!(selection.is_empty());
    }

    #[test]
    fn select_all_twice_restores_empty() {
        let visible = page(&["a.com", "b.com", "c.com"]);
        let mut selection = SelectionController::default();
        selection.select_all_visible(&visible);
        assert_eq!(selection.len(), 3);
        selection.select_all_visible(&visible);
        assert_eq!(selection.len(), 0);
    }

    #[test]
    fn select_all_replaces_partial_selection() {
        let visible = page(&["a.com", "b.com"]);
        let mut selection = SelectionController::default();
        selection.toggle("a.com");
        selection.select_all_visible(&visible);
        assert_eq!(selection.selected(), visible);
        assert!(selection.all_selected(&visible));
    }

    #[test]
    fn context_change_clears_selection() {
        let visible = page(&["a.com", "b.com"]);
        let mut selection = SelectionController::default();
        selection.select_all_visible(&visible);
        let changed = selection.set_visible_context(
            VisibleContext {
                page: 2,
                filter: String::new(),
            },
            &page(&["c.com"]),
        );
        assert!(changed);
        assert!(selection.is_empty());

        selection.toggle("c.com");
        selection.set_visible_context(
            VisibleContext {
                page: 1,
                filter: "c".into(),
            },
            &page(&["c.com"]),
        );
        assert!(selection.is_empty());
    }

    #[test]
    fn same_context_prunes_vanished_rows() {
        let mut selection = SelectionController::default();
        selection.select_all_visible(&page(&["a.com", "b.com"]));
        let changed =
            selection.set_visible_context(VisibleContext::default(), &page(&["b.com", "c.com"]));
        assert!(changed);
        assert_eq!(selection.selected(), page(&["b.com"]));
        assert!(!selection.set_visible_context(VisibleContext::default(), &page(&["b.com"])));
    }

    #[test]
    fn forgetting_absent_entry_is_harmless() {
        let mut selection = SelectionController::default();
        selection.toggle("a.com");
        assert!(!selection.forget("missing.com"));
        assert_eq!(selection.selected(), page(&["a.com"]));
        assert!(selection.forget("a.com"));
        assert!(selection.is_empty());
    }

    #[test]
    fn bulk_eligibility_tracks_selection_and_flight() {
        let mut selection = SelectionController::default();
        assert!(!selection.can_bulk_act(false));
        selection.toggle("a.com");
        assert!(selection.can_bulk_act(false));
        assert!(!selection.can_bulk_act(true));
        selection.complete_bulk();
        assert!(!selection.can_bulk_act(false));
    }

    #[test]
    fn empty_page_is_never_all_selected() {
        let selection = SelectionController::default();
        assert!(!selection.all_selected::<String>(&[]));
    }
}
