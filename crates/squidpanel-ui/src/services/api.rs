//! HTTP client binding for the proxy admin API.
//!
//! # Design
//! - One method per backend operation; each returns the decoded DTO or an [`ApiError`].
//! - Every request is armed with an `AbortController` so the configured timeout
//!   surfaces through the same error channel as any other failure.
//! - Non-2xx bodies are decoded into `ErrorBody` when they are JSON.

pub(crate) use crate::core::error::ApiError;
use crate::features::blocklist::logic::bulk_result;
use gloo::console;
use gloo::timers::callback::Timeout;
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use squidpanel_api_models::{
    AccessLogResponse, ActionAck, BlocklistEntryRequest, BlocklistResponse, BulkOutcome,
    BulkRemoveRequest, CacheLogResponse, LogFilters, LogKind, RawLogResponse, ServiceAction,
    SystemStatus, raw_log_query,
};
use web_sys::{AbortController, File, FormData};

#[derive(Clone, Debug)]
pub(crate) struct ApiClient {
    base_url: String,
    timeout_ms: u32,
}

impl ApiClient {
    pub(crate) fn new(base_url: impl Into<String>, timeout_ms: u32) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_ms,
        }
    }

    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Send `request` with the timeout armed and decode a JSON success body.
    async fn fetch_json<T: DeserializeOwned>(&self, request: Request) -> Result<T, ApiError> {
        let controller = AbortController::new()
            .map_err(|_| ApiError::Transport("abort controller unavailable".to_string()))?;
        let signal = controller.signal();
        let deadline = {
            let controller = controller.clone();
            Timeout::new(self.timeout_ms, move || controller.abort())
        };
        let outcome = match request.abort_signal(Some(&signal)).send().await {
            Ok(response) => decode(response).await,
            Err(err) => Err(ApiError::Transport(err.to_string())),
        };
        drop(deadline);
        match outcome {
            Err(ApiError::Transport(_) | ApiError::Decode(_)) if signal.aborted() => {
                Err(ApiError::Timeout {
                    seconds: self.timeout_ms.div_ceil(1_000),
                })
            }
            other => other,
        }
    }

    pub(crate) async fn fetch_status(&self) -> Result<SystemStatus, ApiError> {
        self.fetch_json(Request::get(&self.url("/status"))).await
    }

    pub(crate) async fn control_service(
        &self,
        action: ServiceAction,
    ) -> Result<ActionAck, ApiError> {
        let path = format!("/service/{}", action.as_str());
        self.fetch_json(Request::post(&self.url(&path))).await
    }

    pub(crate) async fn fetch_blocklist(&self) -> Result<Vec<String>, ApiError> {
        let response: BlocklistResponse =
            self.fetch_json(Request::get(&self.url("/blocklist"))).await?;
        Ok(response.blocked_urls)
    }

    pub(crate) async fn add_entry(&self, url: &str) -> Result<ActionAck, ApiError> {
        let request = Request::post(&self.url("/blocklist"))
            .json(&BlocklistEntryRequest {
                url: url.to_string(),
            })
            .map_err(|err| ApiError::Transport(err.to_string()))?;
        self.fetch_json(request).await
    }

    pub(crate) async fn remove_entry(&self, url: &str) -> Result<ActionAck, ApiError> {
        let request = Request::delete(&self.url("/blocklist"))
            .json(&BlocklistEntryRequest {
                url: url.to_string(),
            })
            .map_err(|err| ApiError::Transport(err.to_string()))?;
        self.fetch_json(request).await
    }

    /// Upload the original file untouched; the backend does the authoritative parse.
    pub(crate) async fn upload_bulk_txt(&self, file: &File) -> Result<BulkOutcome, ApiError> {
        let form = FormData::new()
            .map_err(|_| ApiError::Transport("form-data unavailable".to_string()))?;
        form.append_with_blob_and_filename("file", file, &file.name())
            .map_err(|err| ApiError::Transport(format!("attach file: {err:?}")))?;
        let outcome: BulkOutcome = self
            .fetch_json(Request::post(&self.url("/blocklist/bulk/txt")).body(form))
            .await?;
        bulk_result(outcome)
    }

    pub(crate) async fn remove_bulk(&self, urls: Vec<String>) -> Result<BulkOutcome, ApiError> {
        let request = Request::delete(&self.url("/blocklist/bulk"))
            .json(&BulkRemoveRequest { urls })
            .map_err(|err| ApiError::Transport(err.to_string()))?;
        let outcome: BulkOutcome = self.fetch_json(request).await?;
        bulk_result(outcome)
    }

    pub(crate) async fn fetch_access_logs(
        &self,
        filters: &LogFilters,
    ) -> Result<AccessLogResponse, ApiError> {
        let path = with_query("/logs/access", &filters.access_query());
        self.fetch_json(Request::get(&self.url(&path))).await
    }

    pub(crate) async fn fetch_cache_logs(
        &self,
        filters: &LogFilters,
    ) -> Result<CacheLogResponse, ApiError> {
        let path = with_query("/logs/cache", &filters.cache_query());
        self.fetch_json(Request::get(&self.url(&path))).await
    }

    pub(crate) async fn fetch_raw_logs(
        &self,
        kind: LogKind,
        lines: u32,
    ) -> Result<RawLogResponse, ApiError> {
        let path = with_query(
            &format!("/logs/raw/{}", kind.as_str()),
            &raw_log_query(lines),
        );
        self.fetch_json(Request::get(&self.url(&path))).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    if response.ok() {
        return response
            .json::<T>()
            .await
            .map_err(|err| ApiError::Decode(err.to_string()));
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    console::warn!("request failed", response.url(), status);
    Err(ApiError::from_status(status, &body))
}

fn with_query(path: &str, query: &str) -> String {
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{path}?{query}")
    }
}
