//! Browser-side service bindings.
pub mod api;
