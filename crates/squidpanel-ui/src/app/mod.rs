//! Application shell: contexts, navigation, and the route switch.
//!
//! # Design
//! - One `ApiCtx` per boot, built from the resolved configuration.
//! - Toasts and the status refresh token are app-wide reducers exposed through context.
//! - Pages own their data; the shell only wires providers and layout.

use crate::app::api::ApiCtx;
use crate::app::context::{StatusRefreshCtx, ToastCtx};
use crate::components::toast::ToastHost;
use crate::core::request::RefreshToken;
use crate::core::toast::{ToastKind, ToastQueue};
use crate::features::blocklist::view::BlocklistPage;
use crate::features::logs::view::LogsPage;
use crate::features::service::view::ServicePage;
use crate::features::status::view::{StatusBadge, StatusPage};
use crate::i18n::{DEFAULT_LOCALE, LocaleCode, TranslationBundle};
use preferences::{load_config, load_locale, persist_locale};
pub(crate) use routes::Route;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::HtmlSelectElement;
use yew::prelude::*;
use yew_router::prelude::*;

pub(crate) mod api;
pub(crate) mod context;
pub(crate) mod hooks;
mod preferences;
mod routes;

enum ToastEvent {
    Push(ToastKind, String),
    Dismiss(u64),
}

#[derive(Clone, Default, PartialEq)]
struct ToastStack(ToastQueue);

impl Reducible for ToastStack {
    type Action = ToastEvent;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        let changed = match action {
            ToastEvent::Push(kind, message) => {
                next.0.push(kind, message);
                true
            }
            ToastEvent::Dismiss(id) => next.0.dismiss(id),
        };
        if changed { Rc::new(next) } else { self }
    }
}

impl Reducible for RefreshToken {
    type Action = ();

    fn reduce(self: Rc<Self>, (): Self::Action) -> Rc<Self> {
        Rc::new(self.bumped())
    }
}

#[function_component(SquidPanelApp)]
pub(crate) fn squidpanel_app() -> Html {
    let locale = use_state(load_locale);
    let api_ctx = use_memo(|_| ApiCtx::new(load_config()), ());
    let toasts = use_reducer(ToastStack::default);
    let status_token = use_reducer(RefreshToken::default);
    let bundle = {
        let locale = *locale;
        use_memo(move |_| TranslationBundle::new(locale), locale)
    };

    let toast_ctx = {
        let dispatcher = toasts.dispatcher();
        use_memo(
            move |_| {
                ToastCtx::new(Callback::from(move |(kind, message): (ToastKind, String)| {
                    dispatcher.dispatch(ToastEvent::Push(kind, message));
                }))
            },
            (),
        )
    };
    let status_ctx = {
        let dispatcher = status_token.dispatcher();
        StatusRefreshCtx::new(*status_token, Callback::from(move |()| dispatcher.dispatch(())))
    };
    let dismiss_toast = {
        let dispatcher = toasts.dispatcher();
        Callback::from(move |id: u64| dispatcher.dispatch(ToastEvent::Dismiss(id)))
    };
    let on_locale = {
        let locale = locale.clone();
        Callback::from(move |next: LocaleCode| {
            persist_locale(next);
            locale.set(next);
        })
    };

    html! {
        <ContextProvider<ApiCtx> context={(*api_ctx).clone()}>
            <ContextProvider<TranslationBundle> context={(*bundle).clone()}>
                <ContextProvider<ToastCtx> context={(*toast_ctx).clone()}>
                    <ContextProvider<StatusRefreshCtx> context={status_ctx}>
                        <BrowserRouter>
                            <Shell locale={*locale} {on_locale} base_url={api_ctx.client.base_url().to_string()}>
                                <Switch<Route> render={switch} />
                            </Shell>
                            <ToastHost
                                toasts={toasts.0.items().to_vec()}
                                on_dismiss={dismiss_toast}
                                timeout_ms={api_ctx.config.toast_timeout_ms} />
                        </BrowserRouter>
                    </ContextProvider<StatusRefreshCtx>>
                </ContextProvider<ToastCtx>>
            </ContextProvider<TranslationBundle>>
        </ContextProvider<ApiCtx>>
    }
}

fn switch(route: Route) -> Html {
    match route {
        Route::Status => html! { <StatusPage /> },
        Route::Service => html! { <ServicePage /> },
        Route::Blocklist => html! { <BlocklistPage /> },
        Route::Logs => html! { <LogsPage /> },
        Route::NotFound => html! { <NotFound /> },
    }
}

#[derive(Properties, PartialEq)]
struct ShellProps {
    locale: LocaleCode,
    on_locale: Callback<LocaleCode>,
    base_url: String,
    #[prop_or_default]
    children: Children,
}

#[function_component(Shell)]
fn shell(props: &ShellProps) -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let active = use_route::<Route>().unwrap_or(Route::NotFound);
    let on_change = {
        let on_locale = props.on_locale.clone();
        Callback::from(move |event: Event| {
            let picked = event
                .target()
                .and_then(|target| target.dyn_into::<HtmlSelectElement>().ok())
                .and_then(|select| LocaleCode::from_lang_tag(&select.value()));
            if let Some(locale) = picked {
                on_locale.emit(locale);
            }
        })
    };

    html! {
        <div class="app-shell">
            <header class="topbar">
                <div class="brand">
                    <h1>{bundle.text("shell.title", "Squid Proxy Manager")}</h1>
                    <StatusBadge />
                </div>
                <nav class="tabs">
                    {for Route::tabs().into_iter().map(|route| nav_item(route, &bundle.text(route.label_key(), ""), active))}
                </nav>
                <select
                    class="select select-sm"
                    aria-label={bundle.text("shell.language", "Language")}
                    onchange={on_change}>
                    {for LocaleCode::all().into_iter().map(|locale| html! {
                        <option value={locale.code()} selected={locale == props.locale}>{locale.label()}</option>
                    })}
                </select>
            </header>
            <main>
                {for props.children.iter()}
            </main>
            <footer class="muted">
                {bundle.text("shell.backend", "Backend")}{": "}<code>{props.base_url.clone()}</code>
            </footer>
        </div>
    }
}

fn nav_item(route: Route, label: &str, active: Route) -> Html {
    let classes = classes!("tab", (active == route).then_some("tab-active"));
    html! {
        <Link<Route> to={route} classes={classes}>{label.to_string()}</Link<Route>>
    }
}

#[function_component(NotFound)]
fn not_found() -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    html! {
        <div class="placeholder">
            <h2>{bundle.text("nav.not_found", "Not found")}</h2>
            <p class="muted">{bundle.text("shell.not_found_body", "")}</p>
            <Link<Route> to={Route::Status}>{bundle.text("nav.status", "Status")}</Link<Route>>
        </div>
    }
}

/// Entrypoint invoked by Trunk for wasm32 builds.
pub fn run_app() {
    console_error_panic_hook::set_once();
    if let Some(root) = gloo::utils::document().get_element_by_id("root") {
        yew::Renderer::<SquidPanelApp>::with_root(root).render();
    } else {
        yew::Renderer::<SquidPanelApp>::new().render();
    }
}
