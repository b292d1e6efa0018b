//! Blocklist feature actions.
//!
//! # Design
//! - Capture user intent and request outcomes separate from rendering.
//! - Actions are reduced by `BlocklistState` and never perform side effects.

/// Events that drive the blocklist manager.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BlocklistAction {
    /// A fresh list arrived from the backend.
    Loaded(Vec<String>),
    /// The add-form text changed.
    Draft(String),
    /// The filter text changed.
    Filter(String),
    /// Go forward one page.
    NextPage,
    /// Go back one page.
    PrevPage,
    /// Flip one row's checkbox.
    Toggle(String),
    /// Header checkbox: select the page, or clear when it is already selected.
    SelectAllVisible,
    /// Drop the whole selection.
    ClearSelection,
    /// Single add started.
    AddStarted,
    /// Single add finished; `ok` clears the draft.
    AddFinished {
        /// Whether the backend accepted the entry.
        ok: bool,
    },
    /// Single remove started for a row.
    RemoveStarted(String),
    /// Single remove finished for a row.
    RemoveFinished {
        /// Row that was being removed.
        url: String,
        /// Whether the backend removed it.
        ok: bool,
    },
    /// Bulk remove started.
    BulkStarted,
    /// Bulk remove finished.
    BulkFinished {
        /// Whether the batch succeeded.
        ok: bool,
    },
}
