//! Placeholder panel for empty lists and failed loads.
//!
//! # Design
//! - One panel for both "nothing here" and "could not load", told apart by `error`.
//! - A retry button appears only when `on_retry` is supplied.

use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct EmptyStateProps {
    pub title: AttrValue,
    #[prop_or_default]
    pub description: Option<AttrValue>,
    #[prop_or_default]
    pub error: bool,
    #[prop_or_default]
    pub retry_label: Option<AttrValue>,
    #[prop_or_default]
    pub on_retry: Option<Callback<()>>,
}

#[function_component(EmptyState)]
pub(crate) fn empty_state(props: &EmptyStateProps) -> Html {
    let retry = match (&props.on_retry, &props.retry_label) {
        (Some(on_retry), Some(label)) => {
            let on_retry = on_retry.clone();
            html! {
                <button class="btn btn-sm" onclick={Callback::from(move |_: MouseEvent| on_retry.emit(()))}>
                    {label.clone()}
                </button>
            }
        }
        _ => html! {},
    };
    html! {
        <div
            class={classes!("empty-state", props.error.then_some("error"))}
            role={props.error.then_some("alert")}
        >
            <h4>{props.title.clone()}</h4>
            {props.description.clone().map(|text| html! {
                <p class="muted">{text}</p>
            }).unwrap_or_default()}
            {retry}
        </div>
    }
}
