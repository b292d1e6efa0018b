//! Persistence and environment helpers for the app shell.

use crate::core::config::{BUILD_TIME_API_BASE_URL, UiConfig, resolve_api_base_url};
use crate::i18n::{DEFAULT_LOCALE, LocaleCode};
use gloo::console;
use gloo::storage::{LocalStorage, Storage};
use gloo::utils::window;
use serde::Serialize;

pub(crate) const LOCALE_KEY: &str = "squidpanel.locale";
pub(crate) const API_BASE_URL_KEY: &str = "squidpanel.api_base_url";

pub(crate) fn load_locale() -> LocaleCode {
    if let Ok(value) = LocalStorage::get::<String>(LOCALE_KEY)
        && let Some(locale) = LocaleCode::from_lang_tag(&value)
    {
        return locale;
    }
    if let Some(nav) = window().navigator().language()
        && let Some(locale) = LocaleCode::from_lang_tag(&nav)
    {
        return locale;
    }
    DEFAULT_LOCALE
}

pub(crate) fn persist_locale(locale: LocaleCode) {
    set_storage(LOCALE_KEY, locale.code());
}

/// Resolve the runtime configuration from storage and build-time values.
pub(crate) fn load_config() -> UiConfig {
    let stored = LocalStorage::get::<String>(API_BASE_URL_KEY).ok();
    let base_url = resolve_api_base_url(stored.as_deref(), BUILD_TIME_API_BASE_URL);
    console::debug!("api base url", base_url.clone());
    UiConfig::with_base_url(base_url)
}

fn set_storage<T: Serialize>(key: &'static str, value: T) {
    if let Err(err) = LocalStorage::set(key, value) {
        log_storage_error("set", key, &err.to_string());
    }
}

fn log_storage_error(operation: &'static str, key: &'static str, detail: &str) {
    console::error!("storage operation failed", operation, key, detail);
}
