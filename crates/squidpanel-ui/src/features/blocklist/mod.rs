//! Blocklist manager.
//!
//! # Design
//! - Reducer state and bulk-result helpers are plain Rust and tested on the host.
//! - Views and the upload dialog only exist in the browser build.

pub mod actions;
pub mod logic;
pub mod state;
#[cfg(target_arch = "wasm32")]
pub mod upload;
#[cfg(target_arch = "wasm32")]
pub mod view;
