//! Service control panel state.
//!
//! # Design
//! - One lifecycle action at a time; every button is disabled while one runs.

use squidpanel_api_models::ServiceAction;

/// Tracks the action currently in flight.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ServicePanel {
    busy: Option<ServiceAction>,
}

impl ServicePanel {
    /// Claim the panel for `action`; refused while another action runs.
    pub fn begin(&mut self, action: ServiceAction) -> bool {
        if self.busy.is_some() {
            return false;
        }
        self.busy = Some(action);
        true
    }

    /// Release the panel.
    pub fn finish(&mut self) {
        self.busy = None;
    }

    /// Action in flight, if any.
    #[must_use]
    pub const fn busy(&self) -> Option<ServiceAction> {
        self.busy
    }

    /// Whether buttons must be disabled.
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        self.busy.is_some()
    }
}

/// Translation key for an action's button label.
#[must_use]
pub const fn action_label_key(action: ServiceAction) -> &'static str {
    match action {
        ServiceAction::Start => "service.start",
        ServiceAction::Stop => "service.stop",
        ServiceAction::Restart => "service.restart",
    }
}

/// Translation key for the success toast.
#[must_use]
pub const fn action_done_key(action: ServiceAction) -> &'static str {
    match action {
        ServiceAction::Start => "service.started",
        ServiceAction::Stop => "service.stopped",
        ServiceAction::Restart => "service.restarted",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_action_refused_while_busy() {
        let mut panel = ServicePanel::default();
        assert!(panel.begin(ServiceAction::Restart));
        assert!(!panel.begin(ServiceAction::Stop));
        assert_eq!(panel.busy(), Some(ServiceAction::Restart));
        panel.finish();
        assert!(!panel.is_busy());
        assert!(panel.begin(ServiceAction::Stop));
    }

    #[test]
    fn every_action_has_distinct_keys() {
        let labels: Vec<_> = ServiceAction::all().into_iter().map(action_label_key).collect();
        assert_eq!(labels, vec!["service.start", "service.stop", "service.restart"]);
        assert_eq!(action_done_key(ServiceAction::Stop), "service.stopped");
    }
}
