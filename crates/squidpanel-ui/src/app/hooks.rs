//! Request lifecycle hook.
//!
//! # Design
//! - `RequestState` does the bookkeeping; this hook only issues tickets and forwards events.
//! - A fetch runs on mount, whenever `deps` changes, and on `refetch`.
//! - Settlements arriving after unmount are dropped.

use crate::core::error::ApiError;
use crate::core::request::{RequestEvent, RequestState, SettlePolicy, TicketCounter};
use gloo::console;
use std::future::Future;
use std::rc::Rc;
use yew::prelude::*;

impl<T: Clone + 'static> Reducible for RequestState<T> {
    type Action = RequestEvent<T>;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        if next.apply(action) {
            Rc::new(next)
        } else {
            self
        }
    }
}

/// Snapshot of a request plus a manual trigger.
#[derive(Clone)]
pub(crate) struct ApiHandle<T> {
    pub(crate) data: Option<T>,
    pub(crate) error: Option<String>,
    pub(crate) loading: bool,
    pub(crate) refetch: Callback<()>,
}

/// Fetch with the default settle policy.
#[hook]
pub(crate) fn use_api<T, D, F, Fut>(fetch: F, deps: D) -> ApiHandle<T>
where
    T: Clone + PartialEq + 'static,
    D: PartialEq + 'static,
    F: Fn() -> Fut + 'static,
    Fut: Future<Output = Result<T, ApiError>> + 'static,
{
    use_api_with_policy(SettlePolicy::default(), fetch, deps)
}

/// Fetch with an explicit settle policy.
#[hook]
pub(crate) fn use_api_with_policy<T, D, F, Fut>(
    policy: SettlePolicy,
    fetch: F,
    deps: D,
) -> ApiHandle<T>
where
    T: Clone + PartialEq + 'static,
    D: PartialEq + 'static,
    F: Fn() -> Fut + 'static,
    Fut: Future<Output = Result<T, ApiError>> + 'static,
{
    let state = use_reducer(move || RequestState::<T>::new(policy));
    let tickets = use_memo(|_| TicketCounter::default(), ());
    let mounted = use_mut_ref(|| false);
    let latest_fetch = use_mut_ref(|| None::<Rc<F>>);
    *latest_fetch.borrow_mut() = Some(Rc::new(fetch));

    let trigger = {
        let dispatcher = state.dispatcher();
        let mounted = mounted.clone();
        let latest_fetch = latest_fetch.clone();
        Callback::from(move |()| {
            let Some(fetch) = latest_fetch.borrow().clone() else {
                return;
            };
            let ticket = tickets.issue();
            dispatcher.dispatch(RequestEvent::Begin(ticket));
            let dispatcher = dispatcher.clone();
            let mounted = mounted.clone();
            yew::platform::spawn_local(async move {
                let outcome = fetch().await.map_err(|err| err.user_message());
                if *mounted.borrow() {
                    dispatcher.dispatch(RequestEvent::Settle(ticket, outcome));
                } else {
                    console::debug!("request settled after unmount", ticket.0);
                }
            });
        })
    };

    {
        let mounted = mounted.clone();
        use_effect_with_deps(
            move |()| {
                *mounted.borrow_mut() = true;
                move || *mounted.borrow_mut() = false
            },
            (),
        );
    }
    {
        let trigger = trigger.clone();
        use_effect_with_deps(
            move |_| {
                trigger.emit(());
                || ()
            },
            deps,
        );
    }

    ApiHandle {
        data: state.data.clone(),
        error: state.error.clone(),
        loading: state.loading,
        refetch: trigger,
    }
}
