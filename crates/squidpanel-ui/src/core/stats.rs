//! Summary figures derived from parsed log pages.
//!
//! # Design
//! - Numeric transport strings that fail to parse count as zero.
//! - Stats cover only the lines the backend returned, not the whole log.

use squidpanel_api_models::{AccessLogEntry, CacheLogEntry};
use std::collections::BTreeSet;

/// Totals over a page of access log entries.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AccessStats {
    /// Entries examined.
    pub total_requests: usize,
    /// Distinct client addresses.
    pub unique_clients: usize,
    /// Distinct requested URLs.
    pub unique_urls: usize,
    /// Replies with HTTP 200.
    pub ok_count: usize,
    /// Replies with a 4xx or 5xx status.
    pub error_count: usize,
    /// Sum of reply sizes.
    pub total_bytes: u64,
    /// Mean elapsed time in milliseconds.
    pub mean_duration_ms: f64,
}

/// Counts over a page of cache log entries.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Entries examined.
    pub total: usize,
    /// `ERROR` lines.
    pub errors: usize,
    /// `WARN` lines.
    pub warnings: usize,
    /// `INFO` lines.
    pub infos: usize,
}

/// HTTP status part of a Squid result code such as `TCP_MISS/200`.
#[must_use]
pub fn http_status(result_code: &str) -> &str {
    match result_code.split_once('/') {
        Some((_, status)) if !status.is_empty() => status,
        _ => result_code,
    }
}

fn parse_or_zero<T: std::str::FromStr + Default>(raw: &str) -> T {
    raw.trim().parse().unwrap_or_default()
}

impl AccessStats {
    /// Summarise `entries`.
    #[must_use]
    pub fn from_entries(entries: &[AccessLogEntry]) -> Self {
        let total_requests = entries.len();
        let unique_clients = entries
            .iter()
            .map(|entry| entry.client_ip.as_str())
            .collect::<BTreeSet<_>>()
            .len();
        let unique_urls = entries
            .iter()
            .map(|entry| entry.url.as_str())
            .collect::<BTreeSet<_>>()
            .len();
        let mut ok_count = 0;
        let mut error_count = 0;
        for entry in entries {
            let status = http_status(&entry.result_code);
            if status == "200" {
                ok_count += 1;
            }
            if status.starts_with('4') || status.starts_with('5') {
                error_count += 1;
            }
        }
        let total_bytes = entries
            .iter()
            .map(|entry| parse_or_zero::<u64>(&entry.bytes))
            .sum();
        let duration_sum: f64 = entries
            .iter()
            .map(|entry| parse_or_zero::<f64>(&entry.duration))
            .filter(|value| value.is_finite())
            .sum();
        #[allow(clippy::cast_precision_loss)]
        let mean_duration_ms = if total_requests == 0 {
            0.0
        } else {
            duration_sum / total_requests as f64
        };
        Self {
            total_requests,
            unique_clients,
            unique_urls,
            ok_count,
            error_count,
            total_bytes,
            mean_duration_ms,
        }
    }
}

impl CacheStats {
    /// Count `entries` by level.
    #[must_use]
    pub fn from_entries(entries: &[CacheLogEntry]) -> Self {
        let count = |level: &str| entries.iter().filter(|entry| entry.level == level).count();
        Self {
            total: entries.len(),
            errors: count("ERROR"),
            warnings: count("WARN"),
            infos: count("INFO"),
        }
    }
}

/// Human-readable byte count (`B`, `KB`, `MB`, `GB`).
#[must_use]
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    #[allow(clippy::cast_precision_loss)]
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn access(ip: &str, url: &str, code: &str, bytes: &str, duration: &str) -> AccessLogEntry {
        AccessLogEntry {
            client_ip: ip.into(),
            url: url.into(),
            result_code: code.into(),
            bytes: bytes.into(),
            duration: duration.into(),
            ..AccessLogEntry::default()
        }
    }

    #[test]
    fn access_stats_count_and_average() {
        let entries = vec![
            access("10.0.0.1", "http://a.com/", "TCP_MISS/200", "1000", "10"),
            access("10.0.0.1", "http://b.com/", "TCP_DENIED/403", "300", "4"),
            access("10.0.0.2", "http://a.com/", "TCP_MISS/503", "oops", "x"),
        ];
        let stats = AccessStats::from_entries(&entries);
        assert_eq!(stats.total_requests, 3);
        assert_eq!(stats.unique_clients, 2);
        assert_eq!(stats.unique_urls, 2);
        assert_eq!(stats.ok_count, 1);
        assert_eq!(stats.error_count, 2);
        assert_eq!(stats.total_bytes, 1300);
        assert!((stats.mean_duration_ms - 14.0 / 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_page_has_zero_mean() {
        let stats = AccessStats::from_entries(&[]);
        assert_eq!(stats, AccessStats::default());
    }

    #[test]
    fn status_without_slash_is_used_whole() {
        assert_eq!(http_status("TCP_MISS/200"), "200");
        assert_eq!(http_status("404"), "404");
        assert_eq!(http_status("NONE/"), "NONE/");
    }

    #[test]
    fn cache_stats_count_levels() {
        let entries: Vec<CacheLogEntry> = ["ERROR", "WARN", "INFO", "INFO", "DEBUG"]
            .into_iter()
            .map(|level| CacheLogEntry {
                level: level.into(),
                ..CacheLogEntry::default()
            })
            .collect();
        let stats = CacheStats::from_entries(&entries);
        assert_eq!(
            stats,
            CacheStats {
                total: 5,
                errors: 1,
                warnings: 1,
                infos: 2
            }
        );
    }

    #[test]
    fn bytes_format_scales() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.0 KB");
        assert_eq!(format_bytes(5 * 1024 * 1024), "5.0 MB");
    }
}
