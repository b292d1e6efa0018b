//! Blocklist manager page.
//!
//! # Design
//! - The fetch hook owns loading and error; `BlocklistState` owns page, filter and selection.
//! - Every successful mutation refreshes the list and the shared status badge.
//! - Row removals run independently; bulk removal is single-flight, guarded by a ref
//!   so a second click before the next render cannot start another batch.

use crate::app::api::ApiCtx;
use crate::app::context::{StatusRefreshCtx, ToastCtx};
use crate::app::hooks::use_api;
use crate::components::atoms::{BulkActionBar, EmptyState, Pagination, SearchInput};
use crate::core::error::ApiError;
use crate::core::validation::{EntryRejection, normalize_entry};
use crate::features::blocklist::actions::BlocklistAction;
use crate::features::blocklist::logic::{format_entry, format_tally, removal_tally, upload_tally};
use crate::features::blocklist::state::BlocklistState;
use crate::features::blocklist::upload::BulkUploadModal;
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};
use squidpanel_api_models::BulkOutcome;
use wasm_bindgen::JsCast;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[function_component(BlocklistPage)]
pub(crate) fn blocklist_page() -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let api_ctx = use_context::<ApiCtx>();
    let toasts = use_context::<ToastCtx>();
    let status_refresh = use_context::<StatusRefreshCtx>();
    let page_size = api_ctx
        .as_ref()
        .map_or(crate::core::pagination::DEFAULT_PAGE_SIZE, |ctx| ctx.config.page_size);
    let state = use_reducer(move || BlocklistState::with_page_size(page_size));
    let upload_open = use_state(|| false);
    let bulk_guard = use_mut_ref(|| false);

    let list = {
        let api_ctx = api_ctx.clone();
        use_api(
            move || {
                let client = api_ctx.as_ref().map(|ctx| ctx.client.clone());
                async move {
                    match client {
                        Some(client) => client.fetch_blocklist().await,
                        None => Err(ApiError::Unknown),
                    }
                }
            },
            (),
        )
    };

    {
        let dispatcher = state.dispatcher();
        use_effect_with_deps(
            move |data| {
                if let Some(entries) = data.clone() {
                    dispatcher.dispatch(BlocklistAction::Loaded(entries));
                }
                || ()
            },
            list.data.clone(),
        );
    }

    // Re-read the list and the header badge after any accepted mutation.
    let after_change = {
        let refetch = list.refetch.clone();
        Callback::from(move |()| {
            refetch.emit(());
            if let Some(refresh) = status_refresh.as_ref() {
                refresh.request();
            }
        })
    };

    let notify_ok = {
        let toasts = toasts.clone();
        Callback::from(move |message: String| {
            if let Some(toasts) = toasts.as_ref() {
                toasts.success(message);
            }
        })
    };
    let notify_err = {
        let toasts = toasts.clone();
        Callback::from(move |(what, err): (String, ApiError)| {
            if let Some(toasts) = toasts.as_ref() {
                toasts.failure(&what, &err);
            }
        })
    };

    let add = {
        let state = state.clone();
        let api_ctx = api_ctx.clone();
        let bundle = bundle.clone();
        let after_change = after_change.clone();
        let notify_ok = notify_ok.clone();
        let notify_err = notify_err.clone();
        Callback::from(move |()| {
            if state.adding {
                return;
            }
            let url = match normalize_entry(&state.draft) {
                Ok(url) => url,
                Err(rejection) => {
                    notify_err.emit(("add entry rejected".to_string(), entry_rejection(&bundle, rejection)));
                    return;
                }
            };
            let Some(ctx) = api_ctx.clone() else {
                return;
            };
            state.dispatch(BlocklistAction::AddStarted);
            let dispatcher = state.dispatcher();
            let bundle = bundle.clone();
            let after_change = after_change.clone();
            let notify_ok = notify_ok.clone();
            let notify_err = notify_err.clone();
            yew::platform::spawn_local(async move {
                match ctx.client.add_entry(&url).await {
                    Ok(_) => {
                        dispatcher.dispatch(BlocklistAction::AddFinished { ok: true });
                        notify_ok.emit(format_entry(&bundle.text("blocklist.added", ""), &url));
                        after_change.emit(());
                    }
                    Err(err) => {
                        dispatcher.dispatch(BlocklistAction::AddFinished { ok: false });
                        notify_err.emit((format!("add entry failed: {url}"), err));
                    }
                }
            });
        })
    };

    let remove_one = {
        let state = state.clone();
        let api_ctx = api_ctx.clone();
        let bundle = bundle.clone();
        let after_change = after_change.clone();
        let notify_ok = notify_ok.clone();
        let notify_err = notify_err.clone();
        Callback::from(move |url: String| {
            let Some(ctx) = api_ctx.clone() else {
                return;
            };
            if state.removing.contains(&url) {
                return;
            }
            state.dispatch(BlocklistAction::RemoveStarted(url.clone()));
            let dispatcher = state.dispatcher();
            let bundle = bundle.clone();
            let after_change = after_change.clone();
            let notify_ok = notify_ok.clone();
            let notify_err = notify_err.clone();
            yew::platform::spawn_local(async move {
                match ctx.client.remove_entry(&url).await {
                    Ok(_) => {
                        notify_ok.emit(format_entry(&bundle.text("blocklist.removed", ""), &url));
                        dispatcher.dispatch(BlocklistAction::RemoveFinished { url, ok: true });
                        after_change.emit(());
                    }
                    Err(err) => {
                        notify_err.emit((format!("remove entry failed: {url}"), err));
                        dispatcher.dispatch(BlocklistAction::RemoveFinished { url, ok: false });
                    }
                }
            });
        })
    };

    let remove_selected = {
        let state = state.clone();
        let bundle = bundle.clone();
        let after_change = after_change.clone();
        Callback::from(move |_: MouseEvent| {
            if *bulk_guard.borrow() || !state.can_bulk_remove() {
                return;
            }
            let Some(ctx) = api_ctx.clone() else {
                return;
            };
            let urls = state.selection.selected();
            let requested = urls.len();
            *bulk_guard.borrow_mut() = true;
            state.dispatch(BlocklistAction::BulkStarted);
            let dispatcher = state.dispatcher();
            let bulk_guard = bulk_guard.clone();
            let bundle = bundle.clone();
            let after_change = after_change.clone();
            let notify_ok = notify_ok.clone();
            let notify_err = notify_err.clone();
            yew::platform::spawn_local(async move {
                let result = ctx.client.remove_bulk(urls).await;
                *bulk_guard.borrow_mut() = false;
                match result {
                    Ok(outcome) => {
                        let tally = removal_tally(&outcome, requested);
                        dispatcher.dispatch(BlocklistAction::BulkFinished { ok: true });
                        notify_ok.emit(format_tally(&bundle.text("blocklist.bulk_removed", ""), tally));
                        after_change.emit(());
                    }
                    Err(err) => {
                        dispatcher.dispatch(BlocklistAction::BulkFinished { ok: false });
                        notify_err.emit(("bulk remove failed".to_string(), err));
                    }
                }
            });
        })
    };

    let on_uploaded = {
        let upload_open = upload_open.clone();
        let bundle = bundle.clone();
        Callback::from(move |outcome: BulkOutcome| {
            upload_open.set(false);
            let tally = upload_tally(&outcome);
            if let Some(toasts) = toasts.as_ref() {
                toasts.success(format_tally(&bundle.text("upload.done", ""), tally));
                if tally.skipped > 0 {
                    toasts.info(format_tally(&bundle.text("upload.skipped", ""), tally));
                }
            }
            after_change.emit(());
        })
    };

    let t = |key: &str| bundle.text(key, "");
    let view = state.page();

    let on_draft = {
        let state = state.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event
                .target()
                .and_then(|target| target.dyn_into::<HtmlInputElement>().ok())
            {
                state.dispatch(BlocklistAction::Draft(input.value()));
            }
        })
    };
    let on_draft_key = {
        let add = add.clone();
        Callback::from(move |event: KeyboardEvent| {
            if event.key() == "Enter" {
                event.prevent_default();
                add.emit(());
            }
        })
    };
    let on_filter = {
        let state = state.clone();
        Callback::from(move |term: String| state.dispatch(BlocklistAction::Filter(term)))
    };
    let on_toggle_all = {
        let state = state.clone();
        Callback::from(move |()| state.dispatch(BlocklistAction::SelectAllVisible))
    };
    let on_prev = {
        let state = state.clone();
        Callback::from(move |()| state.dispatch(BlocklistAction::PrevPage))
    };
    let on_next = {
        let state = state.clone();
        Callback::from(move |()| state.dispatch(BlocklistAction::NextPage))
    };
    let open_upload = {
        let upload_open = upload_open.clone();
        Callback::from(move |_: MouseEvent| upload_open.set(true))
    };
    let close_upload = {
        let upload_open = upload_open.clone();
        Callback::from(move |()| upload_open.set(false))
    };

    let rows = if let Some(error) = list.error.clone() {
        html! {
            <EmptyState
                title={AttrValue::from(t("blocklist.load_failed"))}
                description={Some(AttrValue::from(error))}
                error={true}
                retry_label={Some(AttrValue::from(t("common.retry")))}
                on_retry={Some(list.refetch.clone())}
            />
        }
    } else if list.data.is_none() {
        html! { <div class="skeleton-list">{for (0..5).map(|_| html! { <div class="skeleton-row"></div> })}</div> }
    } else if view.is_empty() {
        let title = if view.total_count == 0 {
            t("blocklist.empty")
        } else {
            t("blocklist.no_matches")
        };
        html! { <EmptyState title={AttrValue::from(title)} /> }
    } else {
        html! {
            <ul class="blocklist-rows">
                {for view.items.iter().map(|url| {
                    let url = (*url).clone();
                    let checked = state.selection.contains(&url);
                    let busy = state.removing.contains(&url) || state.bulk_removing;
                    let on_toggle = {
                        let state = state.clone();
                        let url = url.clone();
                        Callback::from(move |_: Event| state.dispatch(BlocklistAction::Toggle(url.clone())))
                    };
                    let on_remove = {
                        let remove_one = remove_one.clone();
                        let url = url.clone();
                        Callback::from(move |_: MouseEvent| remove_one.emit(url.clone()))
                    };
                    html! {
                        <li key={url.clone()} class={classes!("blocklist-row", checked.then_some("selected"))}>
                            <input type="checkbox" checked={checked} disabled={busy} onchange={on_toggle} />
                            <code class="blocklist-url">{url.clone()}</code>
                            <button
                                class={classes!("btn", "btn-ghost", "btn-sm", state.removing.contains(&url).then_some("loading"))}
                                disabled={busy}
                                onclick={on_remove}>
                                {t("blocklist.remove")}
                            </button>
                        </li>
                    }
                })}
            </ul>
        }
    };

    let counts = t("blocklist.counts")
        .replace("{shown}", &view.filtered_count.to_string())
        .replace("{total}", &view.total_count.to_string());
    let page_label = t("common.page_of")
        .replace("{page}", &view.page.to_string())
        .replace("{total}", &view.total_pages.to_string());
    let (first, last) = view.shown_range();
    let range = t("blocklist.range")
        .replace("{first}", &first.to_string())
        .replace("{last}", &last.to_string())
        .replace("{count}", &view.filtered_count.to_string());
    let pager = (list.data.is_some() && list.error.is_none() && view.needs_pager()).then(|| {
        html! {
            <Pagination
                page={view.page}
                total_pages={view.total_pages}
                summary={AttrValue::from(range)}
                page_label={AttrValue::from(page_label)}
                prev_label={AttrValue::from(t("common.prev"))}
                next_label={AttrValue::from(t("common.next"))}
                {on_prev}
                {on_next} />
        }
    });

    html! {
        <section class="panel blocklist-page">
            <div class="panel-head">
                <h3>{t("blocklist.title")}</h3>
                <div class="panel-actions">
                    <button class="btn btn-ghost btn-sm" disabled={list.loading} onclick={{
                        let refetch = list.refetch.clone();
                        Callback::from(move |_: MouseEvent| refetch.emit(()))
                    }}>
                        {t("common.refresh")}
                    </button>
                    <button class="btn btn-sm" onclick={open_upload}>{t("blocklist.bulk_upload")}</button>
                </div>
            </div>
            <div class="blocklist-add">
                <input
                    type="text"
                    class="input"
                    placeholder={t("blocklist.add_placeholder")}
                    aria-label={t("blocklist.add_placeholder")}
                    value={state.draft.clone()}
                    disabled={state.adding}
                    oninput={on_draft}
                    onkeydown={on_draft_key} />
                <button
                    class={classes!("btn", "btn-primary", state.adding.then_some("loading"))}
                    disabled={state.adding}
                    onclick={Callback::from(move |_: MouseEvent| add.emit(()))}>
                    {if state.adding { t("blocklist.adding") } else { t("blocklist.add") }}
                </button>
            </div>
            <div class="blocklist-toolbar">
                <SearchInput
                    value={AttrValue::from(state.pager.filter().to_string())}
                    placeholder={Some(AttrValue::from(t("blocklist.filter_placeholder")))}
                    aria_label={Some(AttrValue::from(t("blocklist.filter_placeholder")))}
                    clear_label={Some(AttrValue::from(t("common.clear")))}
                    on_search={on_filter} />
                <span class="muted">{counts}</span>
            </div>
            <BulkActionBar
                select_label={AttrValue::from(t("blocklist.select_page"))}
                selected_label={AttrValue::from(t("blocklist.selected").replace("{count}", &state.selection.len().to_string()))}
                selected_count={state.selection.len()}
                all_selected={state.selection.all_selected(&view.visible_ids())}
                disabled={view.is_empty() || state.bulk_removing}
                on_toggle_all={on_toggle_all}>
                <button
                    class={classes!("btn", "btn-error", "btn-sm", state.bulk_removing.then_some("loading"))}
                    disabled={!state.can_bulk_remove()}
                    onclick={remove_selected}>
                    {if state.bulk_removing { t("blocklist.bulk_removing") } else { t("blocklist.bulk_remove") }}
                </button>
            </BulkActionBar>
            {rows}
            {pager.unwrap_or_default()}
            <BulkUploadModal
                open={*upload_open}
                on_close={close_upload}
                {on_uploaded} />
        </section>
    }
}

fn entry_rejection(bundle: &TranslationBundle, rejection: EntryRejection) -> ApiError {
    let message = match rejection {
        EntryRejection::Empty => bundle.text("blocklist.entry_empty", &rejection.to_string()),
        EntryRejection::Malformed => bundle.text("blocklist.entry_invalid", &rejection.to_string()),
    };
    ApiError::Validation(message)
}
