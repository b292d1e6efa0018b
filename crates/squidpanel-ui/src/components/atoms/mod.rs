//! Shared UI atoms used across the shell and views.

pub(crate) mod bulk_action_bar;
pub(crate) mod empty_state;
pub(crate) mod pagination;
pub(crate) mod search_input;

pub(crate) use bulk_action_bar::BulkActionBar;
pub(crate) use empty_state::EmptyState;
pub(crate) use pagination::Pagination;
pub(crate) use search_input::SearchInput;
