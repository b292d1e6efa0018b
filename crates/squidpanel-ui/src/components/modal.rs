//! Modal dialog frame.

use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct ModalProps {
    pub title: AttrValue,
    #[prop_or_default]
    pub open: bool,
    /// Backdrop and close button do nothing while set.
    #[prop_or_default]
    pub locked: bool,
    #[prop_or_default]
    pub children: Children,
    #[prop_or_default]
    pub on_close: Callback<()>,
}

#[function_component(Modal)]
pub(crate) fn modal(props: &ModalProps) -> Html {
    if !props.open {
        return html! {};
    }
    let on_close = {
        let on_close = props.on_close.clone();
        let locked = props.locked;
        Callback::from(move |_: MouseEvent| {
            if !locked {
                on_close.emit(());
            }
        })
    };

    html! {
        <div class="modal modal-open" role="dialog" aria-modal="true">
            <div class="modal-box">
                <div class="modal-head">
                    <h3>{props.title.clone()}</h3>
                    <button class="ghost" disabled={props.locked} onclick={on_close.clone()}>{"✕"}</button>
                </div>
                { for props.children.iter() }
            </div>
            <button class="modal-backdrop" onclick={on_close}></button>
        </div>
    }
}
