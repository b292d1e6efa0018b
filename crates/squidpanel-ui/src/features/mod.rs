//! Feature slices for the dashboard.
//!
//! # Design
//! - Each slice keeps host-testable state next to a wasm-only view.
//! - Slices talk to the backend only through the shared `ApiCtx`.

pub mod blocklist;
pub mod logs;
pub mod service;
pub mod status;
