//! Contexts the shell provides to every view.

use crate::core::error::ApiError;
use crate::core::request::RefreshToken;
use crate::core::toast::ToastKind;
use gloo::console;
use yew::prelude::*;

/// Sink for transient notifications.
#[derive(Clone, PartialEq)]
pub(crate) struct ToastCtx {
    push: Callback<(ToastKind, String)>,
}

impl ToastCtx {
    pub(crate) const fn new(push: Callback<(ToastKind, String)>) -> Self {
        Self { push }
    }

    pub(crate) fn success(&self, message: impl Into<String>) {
        self.push.emit((ToastKind::Success, message.into()));
    }

    pub(crate) fn error(&self, message: impl Into<String>) {
        self.push.emit((ToastKind::Error, message.into()));
    }

    pub(crate) fn info(&self, message: impl Into<String>) {
        self.push.emit((ToastKind::Info, message.into()));
    }

    /// Toast a failure; only failures the backend or network caused are logged.
    pub(crate) fn failure(&self, what: &str, err: &ApiError) {
        if !err.is_client_side() {
            console::warn!(what.to_string(), err.to_string());
        }
        self.error(err.user_message());
    }
}

/// Shared status refresh counter; bumping it re-reads `GET /status` everywhere.
#[derive(Clone, PartialEq)]
pub(crate) struct StatusRefreshCtx {
    pub(crate) token: RefreshToken,
    bump: Callback<()>,
}

impl StatusRefreshCtx {
    pub(crate) const fn new(token: RefreshToken, bump: Callback<()>) -> Self {
        Self { token, bump }
    }

    pub(crate) fn request(&self) {
        self.bump.emit(());
    }
}
