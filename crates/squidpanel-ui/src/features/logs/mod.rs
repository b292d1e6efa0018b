//! Log viewer.
//!
//! # Design
//! - Query state is plain Rust; the raw tail and summaries are fetched by the view.

pub mod state;
#[cfg(target_arch = "wasm32")]
pub mod view;
