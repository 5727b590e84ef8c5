use std::rc::Rc;

use dioxus::prelude::*;

use crate::icons::{FaArrowLeft, FaEye, FaPenToSquare};
use crate::platform::{create_object_url, ClientGateway};
use crate::session::{ModalView, SessionState};
use crate::Icon;

use super::{update_releasing, ModalOverlay};

/// Create-or-preview choice for the selected template. Also hosts the
/// preview's loading and error states, so the preview only replaces it once
/// the document has rendered.
#[component]
pub fn OptionsModal(mut session: Signal<SessionState>) -> Element {
    let gateway = use_context::<Rc<ClientGateway>>();
    let default_format = gateway.config().documents.default_format.clone();

    let state = session.read();
    let view = state.view().clone();
    if !view.shows_options() {
        return rsx! {};
    }
    let title = state
        .current_template()
        .map(|t| t.name.clone())
        .unwrap_or_default();
    drop(state);

    let on_create = move |_| {
        let result = session.with_mut(|s| s.open_form(&default_format));
        if let Err(e) = result {
            tracing::warn!("Cannot open form: {e}");
        }
    };

    let on_preview = move |_| {
        let Some(template_id) = session.with_mut(|s| s.begin_preview()) else {
            return;
        };
        let gateway = gateway.clone();
        spawn(async move {
            match gateway.preview_template(template_id).await {
                Ok(preview) => match create_object_url(&preview) {
                    Some(url) => update_releasing(session, |s| s.preview_ready(url)),
                    None => session.with_mut(|s| s.preview_failed("Preview failed")),
                },
                // Already redirecting to login
                Err(e) if e.is_auth() => {}
                Err(e) => session.with_mut(|s| s.preview_failed(&e.to_string())),
            }
        });
    };

    let on_close = move |_| update_releasing(session, |s| s.close());

    rsx! {
        ModalOverlay { title, on_close,
            {match view {
                ModalView::PreviewLoading | ModalView::Preview { .. } => rsx! {
                    div { class: "modal-status",
                        span { class: "spinner" }
                        p { "Generating preview..." }
                    }
                },
                ModalView::PreviewError(message) => rsx! {
                    div { class: "modal-error", role: "alert", "{message}" }
                    div { class: "modal-actions",
                        button {
                            class: "btn btn-outline",
                            r#type: "button",
                            onclick: move |_| update_releasing(session, |s| s.back_to_options()),
                            Icon { icon: FaArrowLeft, width: 12, height: 12 }
                            "Back to Options"
                        }
                    }
                },
                _ => rsx! {
                    p { class: "modal-text", "What would you like to do with this template?" }
                    div { class: "modal-actions",
                        button {
                            class: "btn btn-primary",
                            r#type: "button",
                            onclick: on_create,
                            Icon { icon: FaPenToSquare, width: 12, height: 12 }
                            "Create Document"
                        }
                        button {
                            class: "btn btn-outline",
                            r#type: "button",
                            onclick: on_preview,
                            Icon { icon: FaEye, width: 12, height: 12 }
                            "Preview Template"
                        }
                    }
                },
            }}
        }
    }
}
