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
//! Shared HTTP DTOs for the Squid proxy admin API.
//!
//! These types mirror the JSON contract of the backend service under
//! `/api/v1/squid`. The UI decodes every response through them so field
//! names and defaults live in one place. Transport fields the backend emits
//! as strings (byte counts, durations) stay strings here; parsing belongs to
//! the consumer.
use std::fmt::Write as _;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default number of log lines requested when the caller does not specify one.
pub const DEFAULT_LOG_LINES: u32 = 100;

/// Error document returned by the backend on non-2xx responses.
///
/// The backend is a FastAPI service and reports failures as `{"detail": ...}`;
/// some handlers also emit a top-level `message`. Both are optional so any
/// JSON object decodes.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Human-readable message when the handler supplies one.
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// FastAPI `detail` payload (free text or validation issues).
    pub detail: Option<ErrorDetail>,
}

/// Shape of the FastAPI `detail` field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ErrorDetail {
    /// Plain message raised via `HTTPException(detail=...)`.
    Text(String),
    /// Request validation failures.
    Issues(Vec<ValidationIssue>),
    /// Anything else, kept verbatim.
    Other(Value),
}

/// One request validation failure reported by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidationIssue {
    #[serde(default)]
    /// Location of the offending input (e.g. `["body", "url"]`).
    pub loc: Vec<Value>,
    /// Description of the failure.
    pub msg: String,
}

impl ErrorBody {
    /// Best human-readable message carried by the body, if any.
    ///
    /// `message` wins over `detail`; blank strings count as absent.
    #[must_use]
    pub fn summary(&self) -> Option<String> {
        if let Some(message) = self.message.as_deref().map(str::trim)
            && !message.is_empty()
        {
            return Some(message.to_string());
        }
        match self.detail.as_ref()? {
            ErrorDetail::Text(text) => {
                let text = text.trim();
                (!text.is_empty()).then(|| text.to_string())
            }
            ErrorDetail::Issues(issues) => {
                let joined = issues
                    .iter()
                    .map(|issue| issue.msg.trim())
                    .filter(|msg| !msg.is_empty())
                    .collect::<Vec<_>>()
                    .join("; ");
                (!joined.is_empty()).then_some(joined)
            }
            ErrorDetail::Other(Value::Null) => None,
            ErrorDetail::Other(value) => Some(value.to_string()),
        }
    }
}

/// Health snapshot returned by `GET /status`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SystemStatus {
    /// Whether the proxy container is up.
    pub container_running: bool,
    /// Whether a proxy process is running inside the container.
    pub squid_process_running: bool,
    /// Whether the proxy configuration parses cleanly.
    pub config_valid: bool,
    /// Container status line (e.g. `Up 3 hours`).
    #[serde(default)]
    pub container_status: String,
    /// Process listing captured by the backend.
    #[serde(default)]
    pub squid_processes: String,
    /// Configuration problems detected by the backend.
    #[serde(default)]
    pub config_errors: Vec<String>,
    /// Aggregate status label (`healthy`, `unhealthy`, ...).
    #[serde(default)]
    pub overall_status: String,
}

/// Lifecycle commands accepted by `POST /service/{action}`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ServiceAction {
    /// Start the proxy.
    Start,
    /// Stop the proxy.
    Stop,
    /// Restart the proxy.
    Restart,
}

impl ServiceAction {
    /// Every action in display order.
    #[must_use]
    pub const fn all() -> [Self; 3] {
        [Self::Start, Self::Stop, Self::Restart]
    }

    /// Path segment used by the backend route.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Stop => "stop",
            Self::Restart => "restart",
        }
    }
}

/// Generic acknowledgement returned by mutating endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActionAck {
    #[serde(default)]
    /// Outcome label, usually `success`.
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Optional backend message.
    pub message: Option<String>,
}

/// Blocklist listing returned by `GET /blocklist`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlocklistResponse {
    /// Blocked domains in file order.
    #[serde(default)]
    pub blocked_urls: Vec<String>,
}

/// Body for single-entry add and remove.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlocklistEntryRequest {
    /// Domain to add or remove.
    pub url: String,
}

/// Body for `DELETE /blocklist/bulk`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BulkRemoveRequest {
    /// Domains to remove.
    pub urls: Vec<String>,
}

/// Per-entry failure reported inside a bulk add summary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BulkFailure {
    /// Rejected entry.
    pub url: String,
    /// Backend reason.
    pub reason: String,
}

/// Summary nested under `result` for bulk add.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BulkAddSummary {
    #[serde(default)]
    /// Entries written to the blocklist.
    pub added: Vec<String>,
    #[serde(default)]
    /// Entries rejected with a reason.
    pub failed: Vec<BulkFailure>,
    #[serde(default)]
    /// Number of candidate entries examined.
    pub total_processed: usize,
    #[serde(default)]
    /// Number of entries written.
    pub successfully_added: usize,
}

/// Aggregate outcome of a bulk add or bulk remove.
///
/// The backend may answer HTTP 200 with `status: "error"` when nothing in the
/// batch was applicable; callers must check [`BulkOutcome::is_error`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BulkOutcome {
    #[serde(default)]
    /// `success` or `error`.
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Backend summary message.
    pub message: Option<String>,
    #[serde(default)]
    /// File lines that failed validation (bulk add).
    pub invalid_entries: Vec<String>,
    #[serde(default)]
    /// Requested entries that were not present (bulk remove).
    pub not_found: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Detailed add summary (bulk add).
    pub result: Option<BulkAddSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Number of entries removed (bulk remove).
    pub successfully_removed: Option<usize>,
}

impl BulkOutcome {
    /// Whether the backend reported the batch as failed.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.status.eq_ignore_ascii_case("error")
    }

    /// Number of entries the backend skipped (invalid, rejected, or missing).
    #[must_use]
    pub fn skipped(&self) -> usize {
        let rejected = self.result.as_ref().map_or(0, |result| result.failed.len());
        self.invalid_entries.len() + self.not_found.len() + rejected
    }
}

/// Log files exposed by the backend.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum LogKind {
    /// `access.log`.
    Access,
    /// `cache.log`.
    Cache,
}

impl LogKind {
    /// Path segment used by the backend routes.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Access => "access",
            Self::Cache => "cache",
        }
    }
}

/// One parsed `access.log` line. Every field is a transport string.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AccessLogEntry {
    /// Epoch timestamp with fraction and the following token.
    pub timestamp: String,
    /// Elapsed milliseconds.
    pub duration: String,
    /// Requesting client address.
    pub client_ip: String,
    /// Squid result code with HTTP status (e.g. `TCP_MISS/200`).
    pub result_code: String,
    /// Reply size in bytes.
    pub bytes: String,
    /// HTTP method.
    pub method: String,
    /// Requested URL.
    pub url: String,
    /// Authenticated user or `-`.
    pub user: String,
    /// Hierarchy code with peer.
    pub hierarchy_code: String,
    /// Reply content type.
    pub content_type: String,
    /// Unmodified log line.
    pub raw_line: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Set by the backend when the line could not be split into fields.
    pub parse_error: Option<String>,
}

/// One parsed `cache.log` line.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CacheLogEntry {
    /// Timestamp prefix.
    pub timestamp: String,
    /// Severity (`ERROR`, `WARN`, `INFO`, ...).
    pub level: String,
    /// Message body.
    pub message: String,
    /// Unmodified log line.
    pub raw_line: String,
}

/// Filters echoed back by `GET /logs/access`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AccessFiltersApplied {
    /// Client address filter.
    pub ip: Option<String>,
    /// URL filter.
    pub url: Option<String>,
}

/// Filters echoed back by `GET /logs/cache`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CacheFiltersApplied {
    /// Severity filter.
    pub level: Option<String>,
    /// Message filter.
    pub message: Option<String>,
}

/// Response of `GET /logs/access`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AccessLogResponse {
    /// Outcome label.
    pub status: String,
    /// Log identifier.
    pub log_type: String,
    /// Lines asked for.
    pub lines_requested: u32,
    /// Lines returned.
    pub lines_returned: u32,
    /// Filters the backend applied.
    pub filters_applied: AccessFiltersApplied,
    /// Parsed entries.
    pub logs: Vec<AccessLogEntry>,
}

/// Response of `GET /logs/cache`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CacheLogResponse {
    /// Outcome label.
    pub status: String,
    /// Log identifier.
    pub log_type: String,
    /// Lines asked for.
    pub lines_requested: u32,
    /// Lines returned.
    pub lines_returned: u32,
    /// Filters the backend applied.
    pub filters_applied: CacheFiltersApplied,
    /// Parsed entries.
    pub logs: Vec<CacheLogEntry>,
}

/// Response of `GET /logs/raw/{kind}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RawLogResponse {
    /// Outcome label.
    pub status: String,
    /// Log identifier (`access_raw`, `cache_raw`).
    pub log_type: String,
    /// Lines asked for.
    pub lines_requested: u32,
    /// Lines returned.
    pub lines_returned: u32,
    /// Unparsed lines, oldest first.
    pub raw_logs: Vec<String>,
}

/// Optional filters for the log endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogFilters {
    /// Tail length; omitted from the query when `None` or zero.
    pub lines: Option<u32>,
    /// Access log client address filter.
    pub filter_ip: Option<String>,
    /// Access log URL filter.
    pub filter_url: Option<String>,
    /// Cache log severity filter.
    pub filter_level: Option<String>,
    /// Cache log message filter.
    pub filter_message: Option<String>,
}

impl LogFilters {
    /// Query string (without `?`) for `GET /logs/access`.
    #[must_use]
    pub fn access_query(&self) -> String {
        build_query(&[
            ("lines", self.lines_param()),
            ("filter_ip", self.filter_ip.clone()),
            ("filter_url", self.filter_url.clone()),
        ])
    }

    /// Query string (without `?`) for `GET /logs/cache`.
    #[must_use]
    pub fn cache_query(&self) -> String {
        build_query(&[
            ("lines", self.lines_param()),
            ("filter_level", self.filter_level.clone()),
            ("filter_message", self.filter_message.clone()),
        ])
    }

    fn lines_param(&self) -> Option<String> {
        self.lines
            .filter(|lines| *lines > 0)
            .map(|lines| lines.to_string())
    }
}

/// Query string for `GET /logs/raw/{kind}`; zero falls back to [`DEFAULT_LOG_LINES`].
#[must_use]
pub fn raw_log_query(lines: u32) -> String {
    let lines = if lines == 0 { DEFAULT_LOG_LINES } else { lines };
    format!("lines={lines}")
}

fn build_query(params: &[(&str, Option<String>)]) -> String {
    let mut query = String::new();
    for (key, value) in params {
        let Some(value) = value.as_deref().map(str::trim) else {
            continue;
        };
        if value.is_empty() {
            continue;
        }
        if !query.is_empty() {
            query.push('&');
        }
        let _ = write!(query, "{key}={}", urlencoding::encode(value));
    }
    query
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_body_prefers_message_over_detail() {
        let body: ErrorBody =
            serde_json::from_value(json!({"message": "invalid domain", "detail": "other"}))
                .expect("body decodes");
        assert_eq!(body.summary().as_deref(), Some("invalid domain"));
    }

    #[test]
    fn error_body_reads_fastapi_detail_variants() {
        let text: ErrorBody =
            serde_json::from_value(json!({"detail": "URL already blocked."})).expect("text");
        assert_eq!(text.summary().as_deref(), Some("URL already blocked."));

        let issues: ErrorBody = serde_json::from_value(json!({
            "detail": [
                {"loc": ["body", "url"], "msg": "field required", "type": "value_error.missing"},
                {"loc": ["body"], "msg": "extra field"}
            ]
        }))
        .expect("issues");
        assert_eq!(
            issues.summary().as_deref(),
            Some("field required; extra field")
        );

        let blank: ErrorBody =
            serde_json::from_value(json!({"message": "  ", "detail": null})).expect("blank");
        assert_eq!(blank.summary(), None);
    }

    #[test]
    fn status_decodes_backend_payload() {
        let status: SystemStatus = serde_json::from_value(json!({
            "container_running": true,
            "squid_process_running": false,
            "config_valid": true,
            "container_status": "Up 2 hours",
            "squid_processes": "No processes found",
            "config_errors": ["Configuration errors detected in logs"],
            "overall_status": "unhealthy"
        }))
        .expect("status decodes");
        assert!(status.container_running);
        assert!(!status.squid_process_running);
        assert_eq!(status.config_errors.len(), 1);
        assert_eq!(status.overall_status, "unhealthy");
    }

    #[test]
    fn bulk_outcome_flags_soft_errors_and_counts_skips() {
        let failed: BulkOutcome = serde_json::from_value(json!({
            "status": "error",
            "message": "Nenhuma URL válida encontrada no arquivo",
            "invalid_entries": ["Linha 3: ???"]
        }))
        .expect("error outcome");
        assert!(failed.is_error());
        assert_eq!(failed.skipped(), 1);

        let added: BulkOutcome = serde_json::from_value(json!({
            "status": "success",
            "message": "Processamento concluído. 2 URLs adicionadas.",
            "result": {
                "added": ["a.com", "b.com"],
                "failed": [{"url": "c.com", "reason": "Already exists"}],
                "conflicts": [],
                "total_processed": 3,
                "successfully_added": 2
            },
            "invalid_entries": []
        }))
        .expect("success outcome");
        assert!(!added.is_error());
        assert_eq!(added.skipped(), 1);
        assert_eq!(
            added.result.as_ref().map(|r| r.successfully_added),
            Some(2)
        );
    }

    #[test]
    fn access_entries_tolerate_unparsed_lines() {
        let response: AccessLogResponse = serde_json::from_value(json!({
            "status": "success",
            "log_type": "access",
            "lines_requested": 2,
            "lines_returned": 2,
            "filters_applied": {"ip": null, "url": "example"},
            "logs": [
                {"raw_line": "garbage", "parse_error": "Formato inválido"},
                {
                    "timestamp": "1700000000.123 5",
                    "duration": "5",
                    "client_ip": "10.0.0.2",
                    "result_code": "TCP_MISS/200",
                    "bytes": "1024",
                    "method": "GET",
                    "url": "http://example.com/",
                    "user": "-",
                    "hierarchy_code": "HIER_DIRECT/1.2.3.4",
                    "content_type": "text/html",
                    "raw_line": "..."
                }
            ]
        }))
        .expect("access logs decode");
        assert_eq!(response.logs.len(), 2);
        assert_eq!(response.logs[0].parse_error.as_deref(), Some("Formato inválido"));
        assert!(response.logs[0].client_ip.is_empty());
        assert_eq!(response.filters_applied.url.as_deref(), Some("example"));
    }

    #[test]
    fn log_queries_skip_empty_filters_and_encode_values() {
        let filters = LogFilters {
            lines: Some(50),
            filter_ip: Some("10.0.0.1".into()),
            filter_url: Some("a b&c".into()),
            filter_level: Some("  ".into()),
            filter_message: None,
        };
        assert_eq!(
            filters.access_query(),
            "lines=50&filter_ip=10.0.0.1&filter_url=a%20b%26c"
        );
        assert_eq!(filters.cache_query(), "lines=50");
        assert_eq!(LogFilters::default().access_query(), "");
        assert_eq!(raw_log_query(0), "lines=100");
        assert_eq!(raw_log_query(25), "lines=25");
    }

    #[test]
    fn request_bodies_match_contract() {
        let single = serde_json::to_value(BlocklistEntryRequest {
            url: "example.com".into(),
        })
        .expect("single");
        assert_eq!(single, json!({"url": "example.com"}));
        let bulk = serde_json::to_value(BulkRemoveRequest {
            urls: vec!["a.com".into(), "b.com".into()],
        })
        .expect("bulk");
        assert_eq!(bulk, json!({"urls": ["a.com", "b.com"]}));
        assert_eq!(ServiceAction::Restart.as_str(), "restart");
        assert_eq!(LogKind::Cache.as_str(), "cache");
    }
}
