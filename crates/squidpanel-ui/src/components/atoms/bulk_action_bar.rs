//! Bulk action bar for the blocklist toolbar.
//!
//! # Design
//! - Keep labels, counts, and actions fully prop-driven.
//! - Render action buttons through child content.

use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct BulkActionBarProps {
    pub select_label: AttrValue,
    /// Already carries the count; shown only while something is selected.
    pub selected_label: AttrValue,
    pub selected_count: usize,
    #[prop_or_default]
    pub all_selected: bool,
    #[prop_or_default]
    pub disabled: bool,
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub on_toggle_all: Callback<()>,
    #[prop_or_default]
    pub children: Children,
}

#[function_component(BulkActionBar)]
pub(crate) fn bulk_action_bar(props: &BulkActionBarProps) -> Html {
    let on_change = {
        let on_toggle_all = props.on_toggle_all.clone();
        Callback::from(move |_: Event| on_toggle_all.emit(()))
    };
    html! {
        <div class={classes!("bulk-actions", props.class.clone())}>
            <label class="select-all">
                <input
                    type="checkbox"
                    checked={props.all_selected}
                    disabled={props.disabled}
                    onchange={on_change}
                />
                <span>{props.select_label.clone()}</span>
            </label>
            {if props.selected_count > 0 {
                html! { <span class="muted">{props.selected_label.clone()}</span> }
            } else {
                html! {}
            }}
            <div class="bulk-buttons">
                { for props.children.iter() }
            </div>
        </div>
    }
}
