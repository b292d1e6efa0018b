//! Logs viewer query state.
//!
//! # Design
//! - Inputs are kept as typed text; they only take effect on `apply`.
//! - `apply` always bumps the refresh token so an unchanged query still refetches.
//! - `reset` restores the inputs without fetching.

use crate::core::config::parse_line_count;
use crate::core::request::RefreshToken;
use squidpanel_api_models::{DEFAULT_LOG_LINES, LogFilters, LogKind};
use std::rc::Rc;
use yew::Reducible;

/// Query that the fetches run with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppliedQuery {
    /// Tail length.
    pub lines: u32,
    /// Filters for the parsed summary endpoints.
    pub filters: LogFilters,
    /// Bumped on every apply.
    pub token: RefreshToken,
}

/// Text input on the logs form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogsField {
    /// Line count.
    Lines,
    /// Client address.
    Ip,
    /// Request URL.
    Url,
    /// Cache log level.
    Level,
}

/// Events that drive the logs viewer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogsEvent {
    /// One input changed.
    Edit(LogsField, String),
    /// A tab was picked.
    Select(LogKind),
    /// The form was submitted.
    Apply,
    /// The reset button was pressed.
    Reset,
}

/// Inputs and active tab of the logs viewer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogsQuery {
    /// Raw log tab.
    pub kind: LogKind,
    /// Line-count input.
    pub lines_input: String,
    /// Client address filter input.
    pub filter_ip: String,
    /// URL filter input.
    pub filter_url: String,
    /// Cache level filter input.
    pub filter_level: String,
    default_lines: u32,
    applied: AppliedQuery,
}

impl Default for LogsQuery {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_LINES)
    }
}

impl LogsQuery {
    /// Fresh query on the access tab.
    #[must_use]
    pub fn new(default_lines: u32) -> Self {
        Self {
            kind: LogKind::Access,
            lines_input: default_lines.to_string(),
            filter_ip: String::new(),
            filter_url: String::new(),
            filter_level: String::new(),
            default_lines,
            applied: AppliedQuery {
                lines: default_lines,
                filters: LogFilters {
                    lines: Some(default_lines),
                    ..LogFilters::default()
                },
                token: RefreshToken::default(),
            },
        }
    }

    /// Query the fetches currently use.
    #[must_use]
    pub const fn applied(&self) -> &AppliedQuery {
        &self.applied
    }

    /// Switch tabs; returns whether the tab changed.
    pub fn select(&mut self, kind: LogKind) -> bool {
        if self.kind == kind {
            return false;
        }
        self.kind = kind;
        true
    }

    /// Commit the inputs. Empty or zero line counts fall back to the default.
    pub fn apply(&mut self) {
        let lines = parse_line_count(&self.lines_input, self.default_lines);
        self.lines_input = lines.to_string();
        self.applied = AppliedQuery {
            lines,
            filters: LogFilters {
                lines: Some(lines),
                filter_ip: non_blank(&self.filter_ip),
                filter_url: non_blank(&self.filter_url),
                filter_level: non_blank(&self.filter_level),
                filter_message: None,
            },
            token: self.applied.token.bumped(),
        };
    }

    /// Restore default inputs; the applied query is untouched until the next `apply`.
    pub fn reset(&mut self) {
        self.lines_input = self.default_lines.to_string();
        self.filter_ip.clear();
        self.filter_url.clear();
        self.filter_level.clear();
    }
}

impl LogsQuery {
    /// Apply one event; returns whether anything changed.
    pub fn handle(&mut self, event: LogsEvent) -> bool {
        match event {
            LogsEvent::Edit(field, value) => {
                let slot = match field {
                    LogsField::Lines => &mut self.lines_input,
                    LogsField::Ip => &mut self.filter_ip,
                    LogsField::Url => &mut self.filter_url,
                    LogsField::Level => &mut self.filter_level,
                };
                if *slot == value {
                    return false;
                }
                *slot = value;
                true
            }
            LogsEvent::Select(kind) => self.select(kind),
            LogsEvent::Apply => {
                self.apply();
                true
            }
            LogsEvent::Reset => {
                let before = self.clone();
                self.reset();
                *self != before
            }
        }
    }
}

impl Reducible for LogsQuery {
    type Action = LogsEvent;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        if next.handle(action) { Rc::new(next) } else { self }
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_access_with_default_lines() {
        let query = LogsQuery::default();
        assert_eq!(query.kind, LogKind::Access);
        assert_eq!(query.applied().lines, 100);
        assert_eq!(query.lines_input, "100");
    }

    #[test]
    fn empty_or_zero_lines_fall_back() {
        let mut query = LogsQuery::default();
        query.lines_input = String::new();
        query.apply();
        assert_eq!(query.applied().lines, 100);
        query.lines_input = "0".into();
        query.apply();
        assert_eq!(query.applied().lines, 100);
        query.lines_input = "25".into();
        query.apply();
        assert_eq!(query.applied().lines, 25);
        assert_eq!(query.applied().filters.access_query(), "lines=25");
    }

    #[test]
    fn apply_always_bumps_token() {
        let mut query = LogsQuery::default();
        let before = query.applied().token;
        query.apply();
        assert_ne!(query.applied().token, before);
    }

    #[test]
    fn filters_are_trimmed_and_blank_dropped() {
        let mut query = LogsQuery::default();
        query.filter_ip = " 10.0.0.1 ".into();
        query.filter_level = "  ".into();
        query.apply();
        let filters = &query.applied().filters;
        assert_eq!(filters.filter_ip.as_deref(), Some("10.0.0.1"));
        assert_eq!(filters.filter_level, None);
    }

    #[test]
    fn reset_restores_inputs_without_applying() {
        let mut query = LogsQuery::default();
        query.lines_input = "30".into();
        query.apply();
        query.lines_input = "500".into();
        query.filter_url = "ads".into();
        query.reset();
        assert_eq!(query.lines_input, "100");
        assert!(query.filter_url.is_empty());
        assert_eq!(query.applied().lines, 30);
    }

    #[test]
    fn queued_edits_all_land() {
        let query = Rc::new(LogsQuery::default());
        let query = query.reduce(LogsEvent::Edit(LogsField::Ip, "10.0.0.1".into()));
        let query = query.reduce(LogsEvent::Edit(LogsField::Url, "ads".into()));
        let query = query.reduce(LogsEvent::Apply);
        let filters = &query.applied().filters;
        assert_eq!(filters.filter_ip.as_deref(), Some("10.0.0.1"));
        assert_eq!(filters.filter_url.as_deref(), Some("ads"));
    }

    #[test]
    fn unchanged_events_keep_the_same_state() {
        let query = Rc::new(LogsQuery::default());
        let same = Rc::clone(&query).reduce(LogsEvent::Edit(LogsField::Lines, "100".into()));
        assert!(Rc::ptr_eq(&query, &same));
        let same = Rc::clone(&query).reduce(LogsEvent::Reset);
        assert!(Rc::ptr_eq(&query, &same));
        let switched = Rc::clone(&query).reduce(LogsEvent::Select(LogKind::Cache));
        assert_eq!(switched.kind, LogKind::Cache);
    }

    #[test]
    fn select_reports_tab_change() {
        let mut query = LogsQuery::default();
        assert!(!query.select(LogKind::Access));
        assert!(query.select(LogKind::Cache));
        assert_eq!(query.kind, LogKind::Cache);
    }
}
