use dioxus::prelude::*;

use crate::icons::FaArrowLeft;
use crate::session::{ModalView, SessionState};
use crate::Icon;

use super::{update_releasing, ModalOverlay};

/// Rendered document in an iframe.
///
/// Mounted (hidden) as soon as the object URL exists so the frame can load
/// behind the options modal's spinner; shown once the frame reports `load`.
#[component]
pub fn PreviewModal(mut session: Signal<SessionState>) -> Element {
    let state = session.read();
    let ModalView::Preview { url, loaded } = state.view().clone() else {
        return rsx! {};
    };
    let title = state
        .current_template()
        .map(|t| format!("Preview: {}", t.name))
        .unwrap_or_else(|| "Preview".to_string());
    drop(state);

    rsx! {
        ModalOverlay {
            title,
            wide: true,
            hidden: !loaded,
            on_close: move |_| update_releasing(session, |s| s.close()),
            iframe {
                class: "preview-frame",
                src: "{url}",
                title: "Document preview",
                onload: move |_| session.with_mut(|s| s.preview_loaded()),
            }
            div { class: "modal-actions",
                button {
                    class: "btn btn-outline",
                    r#type: "button",
                    onclick: move |_| update_releasing(session, |s| s.back_to_options()),
                    Icon { icon: FaArrowLeft, width: 12, height: 12 }
                    "Back to Options"
                }
            }
        }
    }
}
