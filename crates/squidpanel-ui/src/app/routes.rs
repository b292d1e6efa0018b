//! Routing definitions for the dashboard.
use yew_router::prelude::*;

#[derive(Clone, Copy, Routable, PartialEq, Eq, Debug)]
pub(crate) enum Route {
    #[at("/")]
    Status,
    #[at("/service")]
    Service,
    #[at("/blocklist")]
    Blocklist,
    #[at("/logs")]
    Logs,
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl Route {
    /// Tabs shown in the navigation bar, in order.
    pub(crate) const fn tabs() -> [Self; 4] {
        [Self::Status, Self::Service, Self::Blocklist, Self::Logs]
    }

    /// Translation key for the tab label.
    pub(crate) const fn label_key(self) -> &'static str {
        match self {
            Self::Status => "nav.status",
            Self::Service => "nav.service",
            Self::Blocklist => "nav.blocklist",
            Self::Logs => "nav.logs",
            Self::NotFound => "nav.not_found",
        }
    }
}
