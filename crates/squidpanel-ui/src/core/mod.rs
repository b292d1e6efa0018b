//! Core, DOM-free primitives and helpers for the Web UI.
pub mod config;
pub mod error;
pub mod ingest;
pub mod pagination;
pub mod request;
pub mod selection;
pub mod stats;
pub mod toast;
pub mod validation;
