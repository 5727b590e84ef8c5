use std::rc::Rc;

use api::Page;
use dioxus::prelude::*;

use crate::bridge::focus_element;
use crate::form::{dom_id, FormField, InputKind};
use crate::platform::ClientGateway;
use crate::session::{ModalView, SessionState};

use super::{update_releasing, ModalOverlay};

/// One input per placeholder plus the output format, with the submit flow.
#[component]
pub fn FormModal(mut session: Signal<SessionState>) -> Element {
    let gateway = use_context::<Rc<ClientGateway>>();
    let formats = gateway.config().documents.formats.clone();

    let state = session.read();
    if state.view() != &ModalView::Form {
        return rsx! {};
    }
    let Some(form) = state.form().cloned() else {
        return rsx! {};
    };
    let submitting = state.is_submitting();
    let form_error = state.form_error().map(str::to_string);
    let invalid: Vec<bool> = form.fields.iter().map(|f| state.is_invalid(&f.name)).collect();
    drop(state);

    let on_submit = move |_| {
        let submission = match session.with_mut(|s| s.prepare_submission()) {
            Ok(submission) => submission,
            Err(blocked) => {
                tracing::debug!("Submission blocked: {blocked:?}");
                if let Some(field) = blocked.focus_target() {
                    focus_element(&dom_id(field));
                }
                return;
            }
        };
        let gateway = gateway.clone();
        spawn(async move {
            let result = gateway
                .submit_document(submission.template_id, submission.fields, &submission.format)
                .await;
            if let Some(url) = session.with_mut(|s| s.finish_submission(&result)) {
                gateway.page().navigate(&url);
            }
        });
    };

    let on_close = move |_| update_releasing(session, |s| s.close());

    rsx! {
        ModalOverlay { title: form.title.clone(), on_close,
            div { class: "document-form",
                for (field, is_invalid) in form.fields.iter().cloned().zip(invalid) {
                    FieldInput { key: "{field.name}", field, is_invalid, session }
                }

                fieldset { class: "format-group",
                    legend { "Output format" }
                    for format in formats {
                        label { key: "{format}", class: "format-option",
                            input {
                                r#type: "radio",
                                name: "format",
                                value: "{format}",
                                checked: form.format == format,
                                onchange: {
                                    let format = format.clone();
                                    move |_| session.with_mut(|s| s.set_format(format.clone()))
                                },
                            }
                            span { "{format.to_uppercase()}" }
                        }
                    }
                }

                if let Some(message) = form_error {
                    div { class: "form-error", role: "alert", "{message}" }
                }

                div { class: "modal-actions",
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        disabled: submitting,
                        onclick: on_submit,
                        if submitting { "Submitting..." } else { "Submit for Approval" }
                    }
                }
            }
        }
    }
}

#[component]
fn FieldInput(field: FormField, is_invalid: bool, mut session: Signal<SessionState>) -> Element {
    let id = field.dom_id();
    let on_input = |name: String| {
        move |evt: FormEvent| session.with_mut(|s| s.set_field(&name, evt.value()))
    };
    let class = if is_invalid { "form-control is-invalid" } else { "form-control" };

    rsx! {
        div { class: "form-group",
            label { r#for: "{id}", "{field.label}" }
            if field.kind == InputKind::Textarea {
                textarea {
                    id: "{id}",
                    class,
                    name: "{field.name}",
                    placeholder: "{field.placeholder}",
                    required: true,
                    value: "{field.value}",
                    oninput: on_input(field.name.clone()),
                }
            } else {
                input {
                    id: "{id}",
                    class,
                    r#type: field.kind.html_type(),
                    name: "{field.name}",
                    placeholder: "{field.placeholder}",
                    required: field.kind.is_required(),
                    value: "{field.value}",
                    oninput: on_input(field.name.clone()),
                }
            }
        }
    }
}
