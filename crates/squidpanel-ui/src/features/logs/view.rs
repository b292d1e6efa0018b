//! Logs page view.
//!
//! # Design
//! - Raw tail per tab; only the newest request may settle so a slow tab switch cannot win.
//! - Inputs take effect on apply; reset restores them without fetching.
//! - The summary strip reads the parsed endpoint for the active tab with the applied filters.

use crate::app::api::ApiCtx;
use crate::app::hooks::{use_api, use_api_with_policy};
use crate::components::atoms::EmptyState;
use crate::core::error::ApiError;
use crate::core::request::{RefreshToken, SettlePolicy};
use crate::core::stats::{AccessStats, CacheStats, format_bytes};
use crate::features::logs::state::{AppliedQuery, LogsEvent, LogsField, LogsQuery};
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};
use squidpanel_api_models::{LogFilters, LogKind};
use wasm_bindgen::JsCast;
use web_sys::HtmlInputElement;
use yew::prelude::*;

fn input_value(event: &InputEvent) -> Option<String> {
    event
        .target()
        .and_then(|target| target.dyn_into::<HtmlInputElement>().ok())
        .map(|input| input.value())
}

const fn tab_label_key(kind: LogKind) -> &'static str {
    match kind {
        LogKind::Access => "logs.access",
        LogKind::Cache => "logs.cache",
    }
}

#[function_component(LogsPage)]
pub(crate) fn logs_page() -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let api_ctx = use_context::<ApiCtx>();
    let default_lines = api_ctx
        .as_ref()
        .map_or(squidpanel_api_models::DEFAULT_LOG_LINES, |ctx| ctx.config.default_log_lines);
    let query = use_reducer(move || LogsQuery::new(default_lines));
    let kind = query.kind;
    let lines = query.applied().lines;
    let token = query.applied().token;

    let raw = use_api_with_policy(
        SettlePolicy::LatestRequest,
        move || {
            let client = api_ctx.as_ref().map(|ctx| ctx.client.clone());
            async move {
                match client {
                    Some(client) => client.fetch_raw_logs(kind, lines).await,
                    None => Err(ApiError::Unknown),
                }
            }
        },
        (kind, lines, token),
    );

    let t = |key: &str| bundle.text(key, "");

    let edit = |field: LogsField| {
        let dispatcher = query.dispatcher();
        Callback::from(move |event: InputEvent| {
            if let Some(value) = input_value(&event) {
                dispatcher.dispatch(LogsEvent::Edit(field, value));
            }
        })
    };
    let on_lines = edit(LogsField::Lines);
    let on_ip = edit(LogsField::Ip);
    let on_url = edit(LogsField::Url);
    let on_level = edit(LogsField::Level);

    let on_apply = {
        let dispatcher = query.dispatcher();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            dispatcher.dispatch(LogsEvent::Apply);
        })
    };
    let on_reset = {
        let dispatcher = query.dispatcher();
        Callback::from(move |_: MouseEvent| dispatcher.dispatch(LogsEvent::Reset))
    };

    let tabs = [LogKind::Access, LogKind::Cache].into_iter().map(|tab| {
        let onclick = {
            let dispatcher = query.dispatcher();
            Callback::from(move |_: MouseEvent| dispatcher.dispatch(LogsEvent::Select(tab)))
        };
        html! {
            <button
                role="tab"
                class={classes!("tab", (tab == kind).then_some("tab-active"))}
                aria-selected={(tab == kind).to_string()}
                {onclick}>
                {t(tab_label_key(tab))}
            </button>
        }
    });

    let filter_inputs = match kind {
        LogKind::Access => html! {
            <>
                <input class="input" type="text" placeholder={t("logs.filter_ip")}
                    aria-label={t("logs.filter_ip")} value={query.filter_ip.clone()} oninput={on_ip} />
                <input class="input" type="text" placeholder={t("logs.filter_url")}
                    aria-label={t("logs.filter_url")} value={query.filter_url.clone()} oninput={on_url} />
            </>
        },
        LogKind::Cache => html! {
            <input class="input" type="text" placeholder={t("logs.filter_level")}
                aria-label={t("logs.filter_level")} value={query.filter_level.clone()} oninput={on_level} />
        },
    };

    let body = if let Some(error) = raw.error.clone() {
        html! {
            <EmptyState
                title={AttrValue::from(t("logs.load_failed"))}
                description={Some(AttrValue::from(error))}
                error={true}
                retry_label={Some(AttrValue::from(t("common.retry")))}
                on_retry={Some(raw.refetch.clone())}
            />
        }
    } else {
        match raw.data.as_ref() {
            None => html! { <div class="skeleton-list"><div class="skeleton-row"></div></div> },
            Some(response) if response.raw_logs.is_empty() => html! {
                <EmptyState title={AttrValue::from(t("logs.empty"))} />
            },
            Some(response) => html! {
                <>
                    <p class="muted">
                        {t("logs.showing").replace("{count}", &response.raw_logs.len().to_string())}
                    </p>
                    <pre class="log-output">{response.raw_logs.join("\n")}</pre>
                </>
            },
        }
    };

    html! {
        <section class="panel logs-page">
            <div class="panel-head">
                <h3>{t("logs.title")}</h3>
                <button class="btn btn-ghost btn-sm" disabled={raw.loading} onclick={{
                    let refetch = raw.refetch.clone();
                    Callback::from(move |_: MouseEvent| refetch.emit(()))
                }}>
                    {if raw.loading { t("common.loading") } else { t("common.refresh") }}
                </button>
            </div>
            <div role="tablist" class="tabs">{for tabs}</div>
            <form class="logs-controls" onsubmit={on_apply}>
                <label class="logs-lines">
                    <span>{t("logs.lines")}</span>
                    <input class="input" type="number" min="1" value={query.lines_input.clone()} oninput={on_lines} />
                </label>
                {filter_inputs}
                <button class="btn btn-primary btn-sm" type="submit">{t("logs.apply")}</button>
                <button class="btn btn-ghost btn-sm" type="button" onclick={on_reset}>{t("logs.reset")}</button>
            </form>
            <LogSummary kind={kind} applied={query.applied().clone()} />
            {body}
        </section>
    }
}

#[derive(Properties, PartialEq)]
struct LogSummaryProps {
    kind: LogKind,
    applied: AppliedQuery,
}

#[function_component(LogSummary)]
fn log_summary(props: &LogSummaryProps) -> Html {
    let filters = props.applied.filters.clone();
    let token = props.applied.token;
    match props.kind {
        LogKind::Access => html! { <AccessSummary {filters} {token} /> },
        LogKind::Cache => html! { <CacheSummary {filters} {token} /> },
    }
}

#[derive(Properties, PartialEq)]
struct SummaryProps {
    filters: LogFilters,
    token: RefreshToken,
}

#[function_component(AccessSummary)]
fn access_summary(props: &SummaryProps) -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let api_ctx = use_context::<ApiCtx>();
    let filters = props.filters.clone();
    let summary = use_api(
        move || {
            let client = api_ctx.as_ref().map(|ctx| ctx.client.clone());
            let filters = filters.clone();
            async move {
                match client {
                    Some(client) => client.fetch_access_logs(&filters).await,
                    None => Err(ApiError::Unknown),
                }
            }
        },
        (props.filters.clone(), props.token),
    );
    let Some(response) = summary.data.as_ref() else {
        return summary_placeholder(&bundle, summary.error.as_deref());
    };
    let stats = AccessStats::from_entries(&response.logs);
    let t = |key: &str| bundle.text(key, "");
    html! {
        <dl class="log-summary">
            {stat(t("logs.stats.requests"), stats.total_requests.to_string())}
            {stat(t("logs.stats.clients"), stats.unique_clients.to_string())}
            {stat(t("logs.stats.urls"), stats.unique_urls.to_string())}
            {stat(t("logs.stats.ok"), stats.ok_count.to_string())}
            {stat(t("logs.stats.errors"), stats.error_count.to_string())}
            {stat(t("logs.stats.bytes"), format_bytes(stats.total_bytes))}
            {stat(t("logs.stats.duration"), format!("{:.1} ms", stats.mean_duration_ms))}
        </dl>
    }
}

#[function_component(CacheSummary)]
fn cache_summary(props: &SummaryProps) -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let api_ctx = use_context::<ApiCtx>();
    let filters = props.filters.clone();
    let summary = use_api(
        move || {
            let client = api_ctx.as_ref().map(|ctx| ctx.client.clone());
            let filters = filters.clone();
            async move {
                match client {
                    Some(client) => client.fetch_cache_logs(&filters).await,
                    None => Err(ApiError::Unknown),
                }
            }
        },
        (props.filters.clone(), props.token),
    );
    let Some(response) = summary.data.as_ref() else {
        return summary_placeholder(&bundle, summary.error.as_deref());
    };
    let stats = CacheStats::from_entries(&response.logs);
    let t = |key: &str| bundle.text(key, "");
    html! {
        <dl class="log-summary">
            {stat(t("logs.stats.entries"), stats.total.to_string())}
            {stat(t("logs.stats.errors"), stats.errors.to_string())}
            {stat(t("logs.stats.warnings"), stats.warnings.to_string())}
            {stat(t("logs.stats.infos"), stats.infos.to_string())}
        </dl>
    }
}

fn summary_placeholder(bundle: &TranslationBundle, error: Option<&str>) -> Html {
    error.map_or_else(
        || html! { <div class="log-summary skeleton-row"></div> },
        |error| {
            html! {
                <p class="log-summary muted">
                    {format!("{}: {error}", bundle.text("logs.summary_failed", ""))}
                </p>
            }
        },
    )
}

fn stat(label: String, value: String) -> Html {
    html! {
        <div class="stat">
            <dt>{label}</dt>
            <dd>{value}</dd>
        </div>
    }
}
