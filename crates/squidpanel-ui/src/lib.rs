#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::multiple_crate_versions)]
//! Squid proxy admin dashboard.
//!
//! The browser app lives behind `wasm32`; request bookkeeping, selection,
//! pagination, upload flow, validation, and log statistics are plain Rust so
//! they run under the host test harness.

pub mod core;
pub mod features;
pub mod i18n;

#[cfg(target_arch = "wasm32")]
pub mod services;

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod components;

#[cfg(target_arch = "wasm32")]
pub use app::run_app;

#[cfg(test)]
mod tests {
    use crate::core::config::UiConfig;
    use crate::i18n::{LocaleCode, TranslationBundle};

    #[test]
    fn translation_fallbacks_work() {
        let bundle = TranslationBundle::new(LocaleCode::Pt);
        assert_eq!(bundle.text("nav.missing_key", "Default"), "Default");
        assert!(!bundle.text("nav.status", "").is_empty());
    }

    #[test]
    fn every_tab_label_resolves_in_every_locale() {
        for locale in LocaleCode::all() {
            let bundle = TranslationBundle::new(locale);
            for key in ["nav.status", "nav.service", "nav.blocklist", "nav.logs"] {
                assert!(!bundle.text(key, "").is_empty(), "{key} missing for {locale:?}");
            }
        }
    }

    #[test]
    fn default_config_matches_backend_contract() {
        let config = UiConfig::default();
        assert_eq!(config.request_timeout_secs(), 50);
        assert_eq!(config.page_size, 10);
        assert_eq!(config.default_log_lines, 100);
    }
}
