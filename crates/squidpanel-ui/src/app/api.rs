//! API client context for sharing a singleton client instance.
//!
//! # Design
//! - Create exactly one API client per app boot.
//! - Carry the resolved `UiConfig` next to the client so views read one context.

use crate::core::config::UiConfig;
use crate::services::api::ApiClient;
use std::rc::Rc;

/// Shared API client context for UI services.
#[derive(Clone)]
pub(crate) struct ApiCtx {
    /// Singleton API client instance.
    pub(crate) client: Rc<ApiClient>,
    /// Tunables the client was built with.
    pub(crate) config: Rc<UiConfig>,
}

impl ApiCtx {
    /// Build the client from the resolved configuration.
    pub(crate) fn new(config: UiConfig) -> Self {
        Self {
            client: Rc::new(ApiClient::new(
                config.api_base_url.clone(),
                config.request_timeout_ms,
            )),
            config: Rc::new(config),
        }
    }
}

impl PartialEq for ApiCtx {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.client, &other.client)
    }
}
