//! Request lifecycle tri-state.
//!
//! # Design
//! - `RequestState` is plain data; the Yew hook only forwards begin/settle events.
//! - Each fetch carries a ticket so stale settlements can be recognised.
//! - `data` survives a `begin` so views can keep showing the previous result.

use std::cell::Cell;

/// Sequence number attached to one fetch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RequestTicket(pub u64);

/// Monotonic ticket source owned by one hook instance.
#[derive(Debug, Default)]
pub struct TicketCounter {
    last: Cell<u64>,
}

impl TicketCounter {
    /// Issue the next ticket.
    pub fn issue(&self) -> RequestTicket {
        let next = self.last.get().wrapping_add(1);
        self.last.set(next);
        RequestTicket(next)
    }
}

/// How overlapping fetches resolve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SettlePolicy {
    /// Whichever fetch settles last overwrites the state.
    #[default]
    LastSettlement,
    /// Settlements from tickets older than the latest `begin` are dropped.
    LatestRequest,
}

/// Loading/data/error view of an asynchronous request.
#[derive(Clone, Debug, PartialEq)]
pub struct RequestState<T> {
    /// Value from the last successful settlement.
    pub data: Option<T>,
    /// Message from the last failed settlement.
    pub error: Option<String>,
    /// Whether a fetch has begun and not yet settled.
    pub loading: bool,
    latest: RequestTicket,
    policy: SettlePolicy,
}

impl<T> Default for RequestState<T> {
    fn default() -> Self {
        Self::new(SettlePolicy::default())
    }
}

impl<T> RequestState<T> {
    /// Fresh state as seen on mount: loading, nothing settled yet.
    #[must_use]
    pub const fn new(policy: SettlePolicy) -> Self {
        Self {
            data: None,
            error: None,
            loading: true,
            latest: RequestTicket(0),
            policy,
        }
    }

    /// Record the start of a fetch.
    pub fn begin(&mut self, ticket: RequestTicket) {
        self.loading = true;
        self.error = None;
        if ticket > self.latest {
            self.latest = ticket;
        }
    }

    /// Record the outcome of a fetch. Returns `false` when the settlement was discarded.
    pub fn settle(&mut self, ticket: RequestTicket, outcome: Result<T, String>) -> bool {
        if self.policy == SettlePolicy::LatestRequest && ticket < self.latest {
            return false;
        }
        match outcome {
            Ok(value) => {
                self.data = Some(value);
                self.error = None;
            }
            Err(message) => {
                self.data = None;
                self.error = Some(message);
            }
        }
        self.loading = false;
        true
    }
}

/// Event applied to a [`RequestState`].
#[derive(Clone, Debug, PartialEq)]
pub enum RequestEvent<T> {
    /// A fetch started.
    Begin(RequestTicket),
    /// A fetch finished.
    Settle(RequestTicket, Result<T, String>),
}

impl<T> RequestState<T> {
    /// Apply an event, returning whether the state changed.
    pub fn apply(&mut self, event: RequestEvent<T>) -> bool {
        match event {
            RequestEvent::Begin(ticket) => {
                self.begin(ticket);
                true
            }
            RequestEvent::Settle(ticket, outcome) => self.settle(ticket, outcome),
        }
    }
}

/// Counter whose bump re-runs any fetch that lists it as a dependency.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct RefreshToken(pub u64);

impl RefreshToken {
    /// Next token value.
    #[must_use]
    pub const fn bumped(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mount_state_is_loading_with_nothing_settled() {
        let state = RequestState::<u32>::default();
        assert!(state.loading);
        assert!(state.data.is_none());
        assert!(state.error.is_none());
    }

    #[test]
    fn each_fetch_toggles_loading_once_and_settles_exclusively() {
        let tickets = TicketCounter::default();
        let mut state = RequestState::<Vec<String>>::default();

        for outcome in [
            Ok(vec!["a.com".to_string()]),
            Err("boom".to_string()),
            Ok(vec![]),
        ] {
            let ticket = tickets.issue();
            state.begin(ticket);
            assert!(state.loading);
            assert!(state.settle(ticket, outcome));
            assert!(!state.loading);
            assert!(state.data.is_some() ^ state.error.is_some());
        }
    }

    #[test]
    fn begin_keeps_previous_data_and_clears_error() {
        let tickets = TicketCounter::default();
        let mut state = RequestState::default();
        let first = tickets.issue();
        state.begin(first);
        state.settle(first, Ok(7));
        let second = tickets.issue();
        state.begin(second);
        assert_eq!(state.data, Some(7));
        assert!(state.loading);

        state.settle(second, Err("down".into()));
        assert_eq!(state.data, None);
        assert_eq!(state.error.as_deref(), Some("down"));

        state.begin(tickets.issue());
        assert!(state.error.is_none());
    }

    #[test]
    fn last_settlement_wins_by_default() {
        let tickets = TicketCounter::default();
        let mut state = RequestState::default();
        let older = tickets.issue();
        let newer = tickets.issue();
        state.begin(older);
        state.begin(newer);
        assert!(state.settle(newer, Ok("fresh")));
        assert!(state.settle(older, Ok("stale")));
        assert_eq!(state.data, Some("stale"));
        assert!(!state.loading);
    }

    #[test]
    fn latest_request_policy_discards_stale_settlements() {
        let tickets = TicketCounter::default();
        let mut state = RequestState::new(SettlePolicy::LatestRequest);
        let older = tickets.issue();
        let newer = tickets.issue();
        state.begin(older);
        state.begin(newer);
        assert!(!state.settle(older, Ok("stale")));
        assert!(state.loading);
        assert!(state.settle(newer, Ok("fresh")));
        assert_eq!(state.data, Some("fresh"));
    }

    #[test]
    fn events_route_to_begin_and_settle() {
        let mut state = RequestState::default();
        assert!(state.apply(RequestEvent::Begin(RequestTicket(1))));
        assert!(state.apply(RequestEvent::Settle(RequestTicket(1), Ok(1u8))));
        assert!(!state.loading);
        assert_eq!(state.data, Some(1));
    }

    #[test]
    fn refresh_token_bumps() {
        let token = RefreshToken::default();
        assert_eq!(token.bumped(), RefreshToken(1));
        assert_ne!(token, token.bumped());
    }
}
