//! The three template modals and their shared overlay.
//!
//! All of them read and write the page's [`SessionState`](crate::SessionState)
//! signal; none owns state of its own beyond what is on screen.

mod overlay;
pub use overlay::ModalOverlay;

mod options_modal;
pub use options_modal::OptionsModal;

mod form_modal;
pub use form_modal::FormModal;

mod preview_modal;
pub use preview_modal::PreviewModal;

use dioxus::prelude::*;

use crate::platform::revoke_object_url;
use crate::session::SessionState;

/// Run `f` against the session and release any object URL it hands back.
pub(crate) fn update_releasing(
    mut session: Signal<SessionState>,
    f: impl FnOnce(&mut SessionState) -> Option<String>,
) {
    if let Some(url) = session.with_mut(f) {
        revoke_object_url(&url);
    }
}
