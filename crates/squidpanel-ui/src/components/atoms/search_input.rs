//! Debounced filter input.
//!
//! # Design
//! - Typing updates the local text at once; the caller only sees the settled value.
//! - Clearing bypasses the debounce and drops any pending emit.
//! - An external `value` change (e.g. a reset) overwrites the local text.

use gloo_timers::callback::Timeout;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct SearchInputProps {
    #[prop_or_default]
    pub value: AttrValue,
    #[prop_or_default]
    pub placeholder: Option<AttrValue>,
    #[prop_or_default]
    pub aria_label: Option<AttrValue>,
    /// Shown on the clear button; no button without it.
    #[prop_or_default]
    pub clear_label: Option<AttrValue>,
    #[prop_or(200)]
    pub debounce_ms: u32,
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub on_search: Callback<String>,
}

#[function_component(SearchInput)]
pub(crate) fn search_input(props: &SearchInputProps) -> Html {
    let text = use_state(|| props.value.to_string());
    let pending = use_mut_ref(|| None::<Timeout>);

    {
        let text = text.clone();
        use_effect_with_deps(
            move |incoming: &AttrValue| {
                if text.as_str() != incoming.as_str() {
                    text.set(incoming.to_string());
                }
                || ()
            },
            props.value.clone(),
        );
    }

    let oninput = {
        let text = text.clone();
        let pending = pending.clone();
        let on_search = props.on_search.clone();
        let delay = props.debounce_ms;
        Callback::from(move |event: InputEvent| {
            let Some(input) = event.target_dyn_into::<web_sys::HtmlInputElement>() else {
                return;
            };
            let next = input.value();
            text.set(next.clone());
            if delay == 0 {
                pending.borrow_mut().take();
                on_search.emit(next);
                return;
            }
            let on_search = on_search.clone();
            *pending.borrow_mut() = Some(Timeout::new(delay, move || on_search.emit(next)));
        })
    };

    let clear = props.clear_label.clone().filter(|_| !text.is_empty()).map(|label| {
        let text = text.clone();
        let on_search = props.on_search.clone();
        let onclick = Callback::from(move |_: MouseEvent| {
            pending.borrow_mut().take();
            text.set(String::new());
            on_search.emit(String::new());
        });
        html! {
            <button type="button" class="btn btn-ghost btn-xs" aria-label={label.clone()} {onclick}>
                {"✕"}
            </button>
        }
    });

    html! {
        <label class={classes!("search", props.class.clone())}>
            <span class="icon search-icon" aria-hidden="true">{"⌕"}</span>
            <input
                type="search"
                placeholder={props.placeholder.clone()}
                aria-label={props.aria_label.clone()}
                value={(*text).clone()}
                {oninput}
            />
            {clear.unwrap_or_default()}
        </label>
    }
}
