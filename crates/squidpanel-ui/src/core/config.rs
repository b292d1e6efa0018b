//! Runtime tunables and backend address resolution.
//!
//! # Design
//! - All knobs live in one `UiConfig` shared through context; defaults match the backend contract.
//! - Base URL resolution is pure so the precedence rules stay host-testable.

use squidpanel_api_models::DEFAULT_LOG_LINES;

/// Backend root used when nothing overrides it.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api/v1/squid";

/// Base URL baked in at build time, if any.
pub const BUILD_TIME_API_BASE_URL: Option<&str> = option_env!("SQUIDPANEL_API_BASE_URL");

/// Tunables shared by every view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UiConfig {
    /// Backend root without trailing slash.
    pub api_base_url: String,
    /// Abort requests after this many milliseconds.
    pub request_timeout_ms: u32,
    /// Blocklist rows per page.
    pub page_size: usize,
    /// Upload preview length.
    pub preview_lines: usize,
    /// Toast lifetime before auto-dismiss.
    pub toast_timeout_ms: u32,
    /// Log lines requested when the input is empty.
    pub default_log_lines: u32,
    /// Delay before re-reading status after a service action.
    pub status_refresh_delay_ms: u32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_ms: 50_000,
            page_size: crate::core::pagination::DEFAULT_PAGE_SIZE,
            preview_lines: crate::core::ingest::PREVIEW_LINES,
            toast_timeout_ms: 4_000,
            default_log_lines: DEFAULT_LOG_LINES,
            status_refresh_delay_ms: 1_000,
        }
    }
}

impl UiConfig {
    /// Defaults with the given base URL.
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Timeout expressed in whole seconds, for error messages.
    #[must_use]
    pub const fn request_timeout_secs(&self) -> u32 {
        self.request_timeout_ms.div_ceil(1_000)
    }
}

/// Pick the backend root: stored override, then build-time value, then the default.
/// Blank candidates are skipped and trailing slashes removed.
#[must_use]
pub fn resolve_api_base_url(stored: Option<&str>, build_time: Option<&str>) -> String {
    [stored, build_time]
        .into_iter()
        .flatten()
        .map(|candidate| candidate.trim().trim_end_matches('/'))
        .find(|candidate| !candidate.is_empty())
        .unwrap_or(DEFAULT_API_BASE_URL)
        .to_string()
}

/// Parse the log-lines input; empty, zero, or junk fall back to `default`.
#[must_use]
pub fn parse_line_count(input: &str, default: u32) -> u32 {
    match input.trim().parse::<u32>() {
        Ok(0) | Err(_) => default,
        Ok(lines) => lines,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_backend_contract() {
        let config = UiConfig::default();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.request_timeout_secs(), 50);
        assert_eq!(config.page_size, 10);
        assert_eq!(config.preview_lines, 10);
        assert_eq!(config.default_log_lines, 100);
    }

    #[test]
    fn stored_override_wins() {
        assert_eq!(
            resolve_api_base_url(Some("https://proxy.lan/api/"), Some("http://build")),
            "https://proxy.lan/api"
        );
    }

    #[test]
    fn blank_override_falls_through() {
        assert_eq!(
            resolve_api_base_url(Some("  "), Some("http://build/squid//")),
            "http://build/squid"
        );
        assert_eq!(resolve_api_base_url(None, None), DEFAULT_API_BASE_URL);
        assert_eq!(resolve_api_base_url(Some("/"), None), DEFAULT_API_BASE_URL);
    }

    #[test]
    fn line_count_defaults_when_unusable() {
        assert_eq!(parse_line_count("", 100), 100);
        assert_eq!(parse_line_count("0", 100), 100);
        assert_eq!(parse_line_count("abc", 100), 100);
        assert_eq!(parse_line_count(" 250 ", 100), 250);
    }
}
