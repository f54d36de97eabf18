use dioxus::prelude::*;
use tracing::warn;

use super::form::{part_for, UploadForm, UploadStatus, SUCCESS_CLOSE_DELAY_MS};
use crate::core::{config::AppConfig, timing::sleep_ms};
use crate::t;

#[component]
pub fn UploadModal(on_close: EventHandler<()>) -> Element {
    let config = try_use_context::<AppConfig>().unwrap_or_else(AppConfig::load);
    let mut form = use_signal(UploadForm::default);

    let on_images = move |evt: FormEvent| async move {
        let Some(engine) = evt.files() else {
            return;
        };
        let mut parts = Vec::new();
        for name in engine.files() {
            match engine.read_file(&name).await {
                Some(bytes) => parts.push(part_for(&name, bytes)),
                None => warn!(file = %name, "selected image could not be read"),
            }
        }
        form.write().add_images(parts);
    };

    let on_clinical = move |evt: FormEvent| async move {
        let Some(engine) = evt.files() else {
            return;
        };
        if let Some(name) = engine.files().into_iter().next() {
            match engine.read_file(&name).await {
                Some(bytes) => form.write().set_clinical(part_for(&name, bytes)),
                None => warn!(file = %name, "selected clinical file could not be read"),
            }
        }
    };

    let endpoint = config.fl_endpoint.clone();
    let run_protocol = move |_| {
        let Some((images, clinical)) = form.write().begin_upload() else {
            return;
        };
        let client = api::FlClient::new(endpoint.clone());
        spawn(async move {
            let outcome = client.execute_fl_task(images, clinical).await;
            let succeeded = outcome.is_ok();
            form.write().finish(outcome);
            if succeeded {
                sleep_ms(SUCCESS_CLOSE_DELAY_MS).await;
                form.write().reset();
                on_close.call(());
            }
        });
    };

    let state = form();
    let busy = state.is_busy();
    let image_count = state.images.len();
    let clinical_name = state
        .clinical
        .as_ref()
        .map(|part| part.file_name.clone())
        .unwrap_or_else(|| t!("upload-no-file"));
    let id_placeholder = t!("upload-embryo-id-placeholder");
    let image_names: Vec<(usize, String)> = state
        .images
        .iter()
        .map(|part| part.file_name.clone())
        .enumerate()
        .collect();

    rsx! {
        div { class: "modal-backdrop",
            div {
                class: "modal upload-modal",
                role: "dialog",
                aria_modal: "true",
                aria_labelledby: "upload-modal-title",

                div { class: "modal__header",
                    h2 { id: "upload-modal-title", {t!("upload-title")} }
                    p { class: "modal__description", {t!("upload-description")} }
                }

                div { class: "upload-modal__field",
                    label { r#for: "embryo-id", {t!("upload-embryo-id-label")} }
                    input {
                        id: "embryo-id",
                        r#type: "text",
                        placeholder: "{id_placeholder}",
                        value: "{state.embryo_id}",
                        oninput: move |evt| form.write().embryo_id = evt.value(),
                    }
                }

                div { class: "upload-modal__drops",
                    div { class: "upload-drop upload-drop--images",
                        span { class: "upload-drop__label", {t!("upload-images-label")} " " span { class: "required", "*" } }
                        input {
                            id: "image-upload",
                            class: "visually-hidden",
                            r#type: "file",
                            multiple: true,
                            accept: "image/*",
                            disabled: busy,
                            onchange: on_images,
                        }
                        label { r#for: "image-upload", class: "upload-drop__target",
                            strong { {t!("upload-frames-button")} }
                            span { class: "upload-drop__meta", {t!("upload-files-selected", count = image_count)} }
                        }
                        if !image_names.is_empty() {
                            ul { class: "upload-drop__files",
                                for (index, name) in image_names {
                                    li { key: "{index}-{name}",
                                        span { "{name}" }
                                        button {
                                            r#type: "button",
                                            class: "button button--ghost button--small",
                                            aria_label: t!("upload-remove-file", name = name.as_str()),
                                            disabled: busy,
                                            onclick: move |_| form.write().remove_image(index),
                                            "×"
                                        }
                                    }
                                }
                            }
                        }
                    }

                    div { class: "upload-drop upload-drop--clinical",
                        span { class: "upload-drop__label", {t!("upload-clinical-label")} " " span { class: "required", "*" } }
                        input {
                            id: "clinical-upload",
                            class: "visually-hidden",
                            r#type: "file",
                            accept: ".csv",
                            disabled: busy,
                            onchange: on_clinical,
                        }
                        label { r#for: "clinical-upload", class: "upload-drop__target",
                            strong { {t!("upload-csv-button")} }
                            span { class: "upload-drop__meta", "{clinical_name}" }
                        }
                    }
                }

                p { class: "upload-modal__note",
                    strong { {t!("upload-requirement-title")} ": " }
                    {t!("upload-requirement-body")}
                }

                match &state.status {
                    UploadStatus::Success => rsx! {
                        div { class: "banner banner--success",
                            strong { {t!("upload-success-title")} }
                            p { {t!("upload-success-body")} }
                            if let Some(resp) = state.last_response.as_ref() {
                                p { class: "banner__meta",
                                    {t!(
                                        "upload-success-meta",
                                        node = resp.node_id.as_str(),
                                        round = resp.fl_round,
                                        frames = resp.results.frames_processed
                                    )}
                                }
                            }
                        }
                    },
                    UploadStatus::Error(message) => rsx! {
                        div { class: "banner banner--error",
                            strong { {t!("upload-failure-title")} }
                            p { "{message}" }
                        }
                    },
                    UploadStatus::Idle | UploadStatus::Uploading => rsx! {},
                }

                div { class: "modal__footer",
                    button {
                        r#type: "button",
                        class: "button button--ghost",
                        disabled: busy,
                        onclick: move |_| form.write().reset(),
                        {t!("upload-reset")}
                    }
                    div { class: "modal__footer-actions",
                        button {
                            r#type: "button",
                            class: "button",
                            disabled: busy,
                            onclick: move |_| on_close.call(()),
                            {t!("upload-cancel")}
                        }
                        button {
                            r#type: "button",
                            class: "button button--primary",
                            disabled: busy,
                            onclick: run_protocol,
                            if busy {
                                {t!("upload-executing")}
                            } else {
                                {t!("upload-run")}
                            }
                        }
                    }
                }
            }
        }
    }
}
