//! Status card and header badge.
//!
//! # Design
//! - Both read `GET /status` keyed on the shared refresh token.
//! - The card keeps showing the previous snapshot while a refresh runs.

use crate::app::api::ApiCtx;
use crate::app::context::StatusRefreshCtx;
use crate::app::hooks::use_api;
use crate::components::atoms::EmptyState;
use crate::core::request::RefreshToken;
use crate::features::status::state::{OverallStatus, process_lines, status_flags};
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};
use squidpanel_api_models::SystemStatus;
use yew::prelude::*;

#[hook]
fn use_status() -> crate::app::hooks::ApiHandle<SystemStatus> {
    let api_ctx = use_context::<ApiCtx>();
    let token = use_context::<StatusRefreshCtx>().map_or(RefreshToken::default(), |ctx| ctx.token);
    use_api(
        move || {
            let client = api_ctx.as_ref().map(|ctx| ctx.client.clone());
            async move {
                match client {
                    Some(client) => client.fetch_status().await,
                    None => Err(crate::core::error::ApiError::Unknown),
                }
            }
        },
        token,
    )
}

#[function_component(StatusBadge)]
pub(crate) fn status_badge() -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let status = use_status();
    match status.data {
        Some(snapshot) => {
            let overall = OverallStatus::from_label(&snapshot.overall_status);
            html! {
                <span class={classes!("badge", overall.class())}>
                    {bundle.text(overall.label_key(), &snapshot.overall_status)}
                </span>
            }
        }
        None => html! {
            <span class="badge unknown">{bundle.text("status.loading", "Loading...")}</span>
        },
    }
}

#[function_component(StatusPage)]
pub(crate) fn status_page() -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let t = |key: &str| bundle.text(key, "");
    let status = use_status();

    let body = if let Some(error) = status.error.clone() {
        html! {
            <EmptyState
                title={AttrValue::from(t("status.load_failed"))}
                description={Some(AttrValue::from(error))}
                error={true}
                retry_label={Some(AttrValue::from(t("common.retry")))}
                on_retry={Some(status.refetch.clone())}
            />
        }
    } else if let Some(snapshot) = status.data.as_ref() {
        render_snapshot(snapshot, &bundle)
    } else {
        html! { <div class="skeleton-list">{for (0..4).map(|_| html! { <div class="skeleton-row"></div> })}</div> }
    };

    let on_refresh = {
        let refetch = status.refetch.clone();
        Callback::from(move |_: MouseEvent| refetch.emit(()))
    };

    html! {
        <section class="panel status-page">
            <div class="panel-head">
                <h3>{t("status.title")}</h3>
                <button class="btn btn-ghost btn-sm" disabled={status.loading} onclick={on_refresh}>
                    {if status.loading { t("common.loading") } else { t("common.refresh") }}
                </button>
            </div>
            {body}
        </section>
    }
}

fn render_snapshot(snapshot: &SystemStatus, bundle: &TranslationBundle) -> Html {
    let t = |key: &str| bundle.text(key, "");
    let overall = OverallStatus::from_label(&snapshot.overall_status);
    let processes = process_lines(snapshot);
    html! {
        <div class="status-grid">
            <ul class="status-flags">
                {for status_flags(snapshot).into_iter().map(|flag| html! {
                    <li class={classes!("status-flag", if flag.ok { "ok" } else { "error" })}>
                        <span>{t(flag.label_key)}</span>
                        <strong>{if flag.ok { t("status.ok") } else { t("status.failing") }}</strong>
                    </li>
                })}
            </ul>
            <div class="status-overall">
                <span class="muted">{t("status.overall.title")}</span>
                <span class={classes!("badge", overall.class())}>
                    {bundle.text(overall.label_key(), &snapshot.overall_status)}
                </span>
            </div>
            {if snapshot.container_status.trim().is_empty() {
                html! {}
            } else {
                html! {
                    <div class="status-detail">
                        <span class="muted">{t("status.container_status")}</span>
                        <code>{snapshot.container_status.clone()}</code>
                    </div>
                }
            }}
            {if processes.is_empty() {
                html! {}
            } else {
                html! {
                    <div class="status-detail">
                        <span class="muted">{t("status.processes")}</span>
                        <pre>{processes.join("\n")}</pre>
                    </div>
                }
            }}
            {if snapshot.config_errors.is_empty() {
                html! {}
            } else {
                html! {
                    <div class="status-detail error">
                        <span class="muted">{t("status.config_errors")}</span>
                        <ul>
                            {for snapshot.config_errors.iter().map(|line| html! { <li><code>{line.clone()}</code></li> })}
                        </ul>
                    </div>
                }
            }}
        </div>
    }
}
