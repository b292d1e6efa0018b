//! Previous/next pager.
//!
//! # Design
//! - Buttons are disabled at the bounds rather than wrapping.

use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct PaginationProps {
    pub page: usize,
    pub total_pages: usize,
    pub summary: AttrValue,
    pub page_label: AttrValue,
    pub prev_label: AttrValue,
    pub next_label: AttrValue,
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub on_prev: Callback<()>,
    #[prop_or_default]
    pub on_next: Callback<()>,
}

#[function_component(Pagination)]
pub(crate) fn pagination(props: &PaginationProps) -> Html {
    let go_prev = {
        let on_prev = props.on_prev.clone();
        Callback::from(move |_: MouseEvent| on_prev.emit(()))
    };
    let go_next = {
        let on_next = props.on_next.clone();
        Callback::from(move |_: MouseEvent| on_next.emit(()))
    };

    html! {
        <div class={classes!("pagination", props.class.clone())}>
            <span class="muted">{props.summary.clone()}</span>
            <div class="join">
                <button class="btn join-item" disabled={props.page <= 1} onclick={go_prev}>
                    {format!("« {}", props.prev_label)}
                </button>
                <span class="btn join-item static">{props.page_label.clone()}</span>
                <button class="btn join-item" disabled={props.page >= props.total_pages} onclick={go_next}>
                    {format!("{} »", props.next_label)}
                </button>
            </div>
        </div>
    }
}
