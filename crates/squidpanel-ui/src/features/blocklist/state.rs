//! Blocklist manager state.
//!
//! # Design
//! - Holds the last fetched list so page and selection can be derived without the hook.
//! - Every action ends in `sync`, which is the only caller of `set_visible_context`.
//! - Per-row busy flags live in a set so several removals can run at once.

use crate::core::pagination::{PageView, Paginator};
use crate::core::selection::{SelectionController, VisibleContext};
use crate::features::blocklist::actions::BlocklistAction;
use std::collections::BTreeSet;
use std::rc::Rc;
use yew::Reducible;

/// Everything the blocklist manager renders besides the fetch tri-state.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct BlocklistState {
    entries: Vec<String>,
    /// Page and filter.
    pub pager: Paginator,
    /// Checked rows on the visible page.
    pub selection: SelectionController,
    /// Rows with a removal in flight.
    pub removing: BTreeSet<String>,
    /// Add request in flight.
    pub adding: bool,
    /// Bulk removal in flight.
    pub bulk_removing: bool,
    /// Add-form text.
    pub draft: String,
}

impl BlocklistState {
    /// Empty state with the given page size.
    #[must_use]
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            pager: Paginator::new(page_size),
            ..Self::default()
        }
    }

    /// Last fetched list.
    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Visible page of the filtered list.
    #[must_use]
    pub fn page(&self) -> PageView<'_> {
        self.pager.view(&self.entries)
    }

    /// Whether bulk removal can be triggered now.
    #[must_use]
    pub fn can_bulk_remove(&self) -> bool {
        self.selection.can_bulk_act(self.bulk_removing)
    }

    /// Apply one action and restore the page and selection invariants.
    pub fn apply(&mut self, action: BlocklistAction) {
        match action {
            BlocklistAction::Loaded(entries) => self.entries = entries,
            BlocklistAction::Draft(text) => self.draft = text,
            BlocklistAction::Filter(term) => {
                self.pager.set_filter(term);
            }
            BlocklistAction::NextPage => {
                let total = self.page().total_pages;
                self.pager.next(total);
            }
            BlocklistAction::PrevPage => {
                self.pager.prev();
            }
            BlocklistAction::Toggle(url) => {
                if self.page().items.iter().any(|item| **item == url) {
                    self.selection.toggle(&url);
                }
            }
            BlocklistAction::SelectAllVisible => {
                let visible = self.page().visible_ids();
                self.selection.select_all_visible(&visible);
            }
            BlocklistAction::ClearSelection => self.selection.clear(),
            BlocklistAction::AddStarted => self.adding = true,
            BlocklistAction::AddFinished { ok } => {
                self.adding = false;
                if ok {
                    self.draft.clear();
                }
            }
            BlocklistAction::RemoveStarted(url) => {
                self.removing.insert(url);
            }
            BlocklistAction::RemoveFinished { url, ok } => {
                self.removing.remove(&url);
                if ok {
                    self.selection.forget(&url);
                }
            }
            BlocklistAction::BulkStarted => {
                if self.can_bulk_remove() {
                    self.bulk_removing = true;
                }
            }
            BlocklistAction::BulkFinished { ok } => {
                if !self.bulk_removing {
                    return;
                }
                self.bulk_removing = false;
                if ok {
                    self.selection.complete_bulk();
                }
            }
        }
        self.sync();
    }

    fn sync(&mut self) {
        let total = self.page().total_pages;
        self.pager.reconcile(total);
        let context = VisibleContext {
            page: self.pager.page(),
            filter: self.pager.filter().to_string(),
        };
        let visible = self.page().visible_ids();
        self.selection.set_visible_context(context, &visible);
    }
}

impl Reducible for BlocklistState {
    type Action = BlocklistAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        next.apply(action);
        Rc::new(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(count: usize) -> BlocklistState {
        let mut state = BlocklistState::default();
        state.apply(BlocklistAction::Loaded(
            (1..=count).map(|n| format!("site{n}.com")).collect(),
        ));
        state
    }

    #[test]
    fn page_change_clears_selection() {
        let mut state = loaded(25);
        state.apply(BlocklistAction::SelectAllVisible);
        assert_eq!(state.selection.len(), 10);
        state.apply(BlocklistAction::NextPage);
        assert_eq!(state.pager.page(), 2);
        assert!(state.selection.is_empty());
    }

    #[test]
    fn filter_change_resets_page_and_clears_selection() {
        let mut state = loaded(25);
        state.apply(BlocklistAction::NextPage);
        state.apply(BlocklistAction::Toggle("site11.com".into()));
        assert_eq!(state.selection.len(), 1);
        state.apply(BlocklistAction::Filter("site1".into()));
        assert_eq!(state.pager.page(), 1);
        assert!(state.selection.is_empty());
    }

    #[test]
    fn toggle_ignores_rows_not_on_page() {
        let mut state = loaded(25);
        state.apply(BlocklistAction::Toggle("site20.com".into()));
        assert!(state.selection.is_empty());
    }

    #[test]
    fn refresh_prunes_removed_rows_from_selection() {
        let mut state = loaded(3);
        state.apply(BlocklistAction::SelectAllVisible);
        state.apply(BlocklistAction::Loaded(vec![
            "site1.com".into(),
            "site3.com".into(),
        ]));
        assert_eq!(
            state.selection.selected(),
            vec!["site1.com".to_string(), "site3.com".to_string()]
        );
    }

    #[test]
    fn shrinking_list_clamps_page() {
        let mut state = loaded(25);
        state.apply(BlocklistAction::NextPage);
        state.apply(BlocklistAction::NextPage);
        assert_eq!(state.pager.page(), 3);
        state.apply(BlocklistAction::Loaded(
            (1..=12).map(|n| format!("site{n}.com")).collect(),
        ));
        assert_eq!(state.pager.page(), 2);
        assert_eq!(state.page().items.len(), 2);
    }

    #[test]
    fn bulk_flow_disables_and_consumes_selection() {
        let mut state = loaded(5);
        assert!(!state.can_bulk_remove());
        state.apply(BlocklistAction::SelectAllVisible);
        assert!(state.can_bulk_remove());
        state.apply(BlocklistAction::BulkStarted);
        assert!(!state.can_bulk_remove());
        state.apply(BlocklistAction::BulkFinished { ok: false });
        assert_eq!(state.selection.len(), 5);
        state.apply(BlocklistAction::BulkStarted);
        state.apply(BlocklistAction::BulkFinished { ok: true });
        assert!(state.selection.is_empty());
        assert!(!state.bulk_removing);
    }

    #[test]
    fn bulk_start_needs_selection_and_idle() {
        let mut state = loaded(5);
        state.apply(BlocklistAction::BulkStarted);
        assert!(!state.bulk_removing);

        state.apply(BlocklistAction::SelectAllVisible);
        state.apply(BlocklistAction::BulkStarted);
        state.apply(BlocklistAction::BulkStarted);
        assert!(state.bulk_removing);
        state.apply(BlocklistAction::BulkFinished { ok: true });
        assert!(state.selection.is_empty());

        state.apply(BlocklistAction::Toggle("site1.com".into()));
        state.apply(BlocklistAction::BulkFinished { ok: true });
        assert_eq!(state.selection.len(), 1);
    }

    #[test]
    fn removing_absent_url_keeps_selection() {
        let mut state = loaded(3);
        state.apply(BlocklistAction::Toggle("site1.com".into()));
        state.apply(BlocklistAction::RemoveStarted("ghost.com".into()));
        assert!(state.removing.contains("ghost.com"));
        state.apply(BlocklistAction::RemoveFinished {
            url: "ghost.com".into(),
            ok: true,
        });
        assert!(state.removing.is_empty());
        assert_eq!(state.selection.selected(), vec!["site1.com".to_string()]);
    }

    #[test]
    fn add_success_clears_draft() {
        let mut state = loaded(0);
        state.apply(BlocklistAction::Draft("ads.net".into()));
        state.apply(BlocklistAction::AddStarted);
        assert!(state.adding);
        state.apply(BlocklistAction::AddFinished { ok: false });
        assert_eq!(state.draft, "ads.net");
        state.apply(BlocklistAction::AddFinished { ok: true });
        assert!(state.draft.is_empty());
        assert!(!state.adding);
    }
}
