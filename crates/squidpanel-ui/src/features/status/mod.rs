//! System status feature.
//!
//! # Design
//! - Map the free-text health label into a closed enum in one place.
//! - Keep the card and the header badge on the same fetch semantics.

pub mod state;
#[cfg(target_arch = "wasm32")]
pub mod view;
