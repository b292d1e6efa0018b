//! Shared presentational components.

pub(crate) mod atoms;
pub(crate) mod modal;
pub(crate) mod toast;
