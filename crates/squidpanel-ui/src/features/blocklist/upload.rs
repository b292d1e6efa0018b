//! Bulk `.txt` upload dialog.
//!
//! # Design
//! - `UploadFlow` is the source of truth; it lives in a ref and the view redraws on demand.
//! - The preview is read locally; the original file is what gets posted.
//! - The dialog cannot be dismissed while the upload runs.

use crate::app::api::ApiCtx;
use crate::app::context::ToastCtx;
use crate::components::modal::Modal;
use crate::core::error::ApiError;
use crate::core::ingest::{UploadFlow, UploadRejection, UploadStage, extract_preview};
use crate::core::stats::format_bytes;
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};
use gloo::console;
use gloo::file::callbacks::{FileReader, read_as_text};
use squidpanel_api_models::BulkOutcome;
use wasm_bindgen::JsCast;
use web_sys::{DragEvent, File, HtmlInputElement};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct BulkUploadProps {
    pub open: bool,
    pub on_close: Callback<()>,
    /// Fired with the accepted batch; the dialog has already reset itself.
    pub on_uploaded: Callback<BulkOutcome>,
}

#[function_component(BulkUploadModal)]
pub(crate) fn bulk_upload_modal(props: &BulkUploadProps) -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let api_ctx = use_context::<ApiCtx>();
    let toasts = use_context::<ToastCtx>();
    let flow = use_mut_ref(UploadFlow::<File>::default);
    let reader = use_mut_ref(|| None::<FileReader>);
    let redraw = use_force_update();
    let dragging = use_state(|| false);
    let preview_limit = api_ctx
        .as_ref()
        .map_or(crate::core::ingest::PREVIEW_LINES, |ctx| ctx.config.preview_lines);

    let choose = {
        let flow = flow.clone();
        let reader = reader.clone();
        let redraw = redraw.clone();
        let toasts = toasts.clone();
        let bundle = bundle.clone();
        Callback::from(move |file: File| {
            let name = file.name();
            let blob = gloo::file::File::from(file.clone());
            let size = blob.size();
            let selected = flow
                .borrow_mut()
                .select(file.clone(), &name, &file.type_(), size);
            match selected {
                Ok(generation) => {
                    let flow = flow.clone();
                    let redraw = redraw.clone();
                    let task = read_as_text(&blob, move |content| {
                        match content {
                            Ok(text) => {
                                let lines = extract_preview(&text, preview_limit);
                                if flow.borrow_mut().set_preview(generation, lines) {
                                    redraw.force_update();
                                }
                            }
                            Err(err) => console::warn!("preview read failed", err.to_string()),
                        }
                    });
                    *reader.borrow_mut() = Some(task);
                }
                Err(rejection) => {
                    if let Some(toasts) = toasts.as_ref() {
                        toasts.failure("upload rejected", &upload_rejection(&bundle, &rejection));
                    }
                }
            }
            redraw.force_update();
        })
    };

    let on_input_change = {
        let choose = choose.clone();
        Callback::from(move |event: Event| {
            let Some(input) = event
                .target()
                .and_then(|target| target.dyn_into::<HtmlInputElement>().ok())
            else {
                return;
            };
            if let Some(file) = input.files().and_then(|files| files.get(0)) {
                choose.emit(file);
            }
            input.set_value("");
        })
    };

    let on_drag_over = {
        let dragging = dragging.clone();
        Callback::from(move |event: DragEvent| {
            event.prevent_default();
            dragging.set(true);
        })
    };
    let on_drag_leave = {
        let dragging = dragging.clone();
        Callback::from(move |_: DragEvent| dragging.set(false))
    };
    let on_drop = {
        let dragging = dragging.clone();
        Callback::from(move |event: DragEvent| {
            event.prevent_default();
            dragging.set(false);
            if let Some(file) = event
                .data_transfer()
                .and_then(|transfer| transfer.files())
                .and_then(|files| files.get(0))
            {
                choose.emit(file);
            }
        })
    };

    let close = {
        let flow = flow.clone();
        let on_close = props.on_close.clone();
        let redraw = redraw.clone();
        Callback::from(move |()| {
            if flow.borrow_mut().cancel() {
                reader.borrow_mut().take();
                redraw.force_update();
                on_close.emit(());
            }
        })
    };

    let upload = {
        let flow = flow.clone();
        let on_uploaded = props.on_uploaded.clone();
        let bundle = bundle.clone();
        Callback::from(move |_: MouseEvent| {
            let Some(ctx) = api_ctx.clone() else {
                return;
            };
            let file = match flow.borrow_mut().begin_upload() {
                Ok(file) => file,
                Err(rejection) => {
                    if let Some(toasts) = toasts.as_ref() {
                        toasts.failure("upload rejected", &upload_rejection(&bundle, &rejection));
                    }
                    return;
                }
            };
            redraw.force_update();
            let flow = flow.clone();
            let redraw = redraw.clone();
            let on_uploaded = on_uploaded.clone();
            let toasts = toasts.clone();
            yew::platform::spawn_local(async move {
                match ctx.client.upload_bulk_txt(&file).await {
                    Ok(outcome) => {
                        flow.borrow_mut().finish(Ok(()));
                        redraw.force_update();
                        on_uploaded.emit(outcome);
                    }
                    Err(err) => {
                        flow.borrow_mut().finish(Err(err.user_message()));
                        redraw.force_update();
                        if let Some(toasts) = toasts.as_ref() {
                            toasts.failure("bulk upload failed", &err);
                        }
                    }
                }
            });
        })
    };

    let snapshot = flow.borrow().clone();
    let uploading = snapshot.is_uploading();
    let t = |key: &str| bundle.text(key, "");

    let file_panel = match snapshot.stage() {
        UploadStage::Idle => html! {
            <p class="muted">{t("upload.no_file")}</p>
        },
        UploadStage::FileSelected { selected, .. } | UploadStage::Uploading { selected } => html! {
            <div class="upload-file">
                <div class="upload-file-meta">
                    <strong>{selected.name.clone()}</strong>
                    <span class="muted">{format_bytes(selected.size)}</span>
                </div>
                {match selected.preview.as_ref() {
                    None => html! { <div class="skeleton-row"></div> },
                    Some(lines) if lines.is_empty() => html! {
                        <p class="muted">{t("upload.preview_empty")}</p>
                    },
                    Some(lines) => html! {
                        <div class="upload-preview">
                            <span class="muted">
                                {t("upload.preview").replace("{count}", &lines.len().to_string())}
                            </span>
                            <pre>{lines.join("\n")}</pre>
                        </div>
                    },
                }}
            </div>
        },
    };

    html! {
        <Modal
            title={AttrValue::from(t("upload.title"))}
            open={props.open}
            locked={uploading}
            on_close={close.clone()}>
            <div
                class={classes!("dropzone", (*dragging).then_some("active"))}
                ondragover={on_drag_over}
                ondragleave={on_drag_leave}
                ondrop={on_drop}>
                <p>{t("upload.drop_hint")}</p>
                <label class="btn btn-sm">
                    {t("upload.choose")}
                    <input
                        type="file"
                        accept=".txt,text/plain"
                        class="hidden"
                        disabled={uploading}
                        onchange={on_input_change} />
                </label>
                <p class="muted">{t("upload.format_hint")}</p>
            </div>
            {file_panel}
            {snapshot.error().map_or_else(|| html! {}, |error| html! {
                <p class="error" role="alert">{error.to_string()}</p>
            })}
            <div class="modal-actions">
                <button
                    class="btn btn-ghost"
                    disabled={uploading}
                    onclick={Callback::from(move |_: MouseEvent| close.emit(()))}>
                    {t("common.cancel")}
                </button>
                <button
                    class="btn btn-primary"
                    disabled={uploading || snapshot.selected().is_none()}
                    onclick={upload}>
                    {if uploading { t("upload.uploading") } else { t("upload.submit") }}
                </button>
            </div>
        </Modal>
    }
}

fn upload_rejection(bundle: &TranslationBundle, rejection: &UploadRejection) -> ApiError {
    let message = match rejection {
        UploadRejection::NotText { name } => bundle
            .text("upload.not_text", &rejection.to_string())
            .replace("{name}", name),
        UploadRejection::NoFile => bundle.text("upload.no_file", &rejection.to_string()),
        UploadRejection::Busy => bundle.text("upload.busy", &rejection.to_string()),
    };
    ApiError::Validation(message)
}
