//! Start/stop/restart panel.
//!
//! # Design
//! - The in-flight guard lives in a ref so a double click cannot slip past a pending render.
//! - Status is re-read after a short delay so the backend has time to settle.

use crate::app::api::ApiCtx;
use crate::app::context::{StatusRefreshCtx, ToastCtx};
use crate::features::service::state::{ServicePanel, action_done_key, action_label_key};
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};
use gloo::console;
use gloo::timers::callback::Timeout;
use squidpanel_api_models::ServiceAction;
use yew::prelude::*;

#[function_component(ServicePage)]
pub(crate) fn service_page() -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let api_ctx = use_context::<ApiCtx>();
    let toasts = use_context::<ToastCtx>();
    let status_refresh = use_context::<StatusRefreshCtx>();
    let guard = use_mut_ref(ServicePanel::default);
    let busy = use_state(|| None::<ServiceAction>);

    let run = {
        let bundle = bundle.clone();
        let busy = busy.clone();
        Callback::from(move |action: ServiceAction| {
            let Some(ctx) = api_ctx.clone() else {
                return;
            };
            if !guard.borrow_mut().begin(action) {
                console::debug!("service action ignored while busy", action.as_str());
                return;
            }
            busy.set(Some(action));
            let client = ctx.client.clone();
            let delay = ctx.config.status_refresh_delay_ms;
            let bundle = bundle.clone();
            let guard = guard.clone();
            let busy = busy.clone();
            let toasts = toasts.clone();
            let status_refresh = status_refresh.clone();
            yew::platform::spawn_local(async move {
                let outcome = client.control_service(action).await;
                guard.borrow_mut().finish();
                busy.set(None);
                match outcome {
                    Ok(ack) => {
                        let message = ack
                            .message
                            .filter(|message| !message.trim().is_empty())
                            .unwrap_or_else(|| bundle.text(action_done_key(action), ""));
                        if let Some(toasts) = toasts.as_ref() {
                            toasts.success(message);
                        }
                        if let Some(refresh) = status_refresh {
                            let _ = Timeout::new(delay, move || refresh.request()).forget();
                        }
                    }
                    Err(err) => {
                        console::warn!("service action failed", action.as_str(), err.to_string());
                        if let Some(toasts) = toasts.as_ref() {
                            toasts.error(err.user_message());
                        }
                    }
                }
            });
        })
    };

    let in_flight = *busy;
    html! {
        <section class="panel service-page">
            <div class="panel-head">
                <h3>{bundle.text("service.title", "")}</h3>
            </div>
            <p class="muted">{bundle.text("service.description", "")}</p>
            <div class="service-actions">
                {for ServiceAction::all().into_iter().map(|action| {
                    let onclick = {
                        let run = run.clone();
                        Callback::from(move |_: MouseEvent| run.emit(action))
                    };
                    let running = in_flight == Some(action);
                    html! {
                        <button
                            class={classes!("btn", button_class(action), running.then_some("loading"))}
                            disabled={in_flight.is_some()}
                            {onclick}>
                            {if running {
                                bundle.text("service.working", "")
                            } else {
                                bundle.text(action_label_key(action), "")
                            }}
                        </button>
                    }
                })}
            </div>
        </section>
    }
}

const fn button_class(action: ServiceAction) -> &'static str {
    match action {
        ServiceAction::Start => "btn-success",
        ServiceAction::Stop => "btn-error",
        ServiceAction::Restart => "btn-warning",
    }
}
