//! This crate contains all shared UI for the workspace.
//!
//! Pure state ([`form`], [`session`], the catalog view-model and the sidebar
//! state) is kept apart from the components so it can be tested without a
//! renderer. [`platform`] picks the storage backend and builds the gateway.

use dioxus::prelude::*;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub const MAIN_UI_CSS: Asset = asset!("/assets/styling/ui.css");

pub mod bridge;
pub mod form;
pub mod platform;
pub mod session;
pub mod views;

mod catalog;
pub use catalog::{catalog_view, CardModel, CatalogView, TemplateCatalog};

mod modals;
pub use modals::{FormModal, ModalOverlay, OptionsModal, PreviewModal};

mod sidebar;
pub use sidebar::{should_auto_collapse, AppSidebar, SidebarLink, SidebarState};

pub use form::{field_label, DocumentForm, FormField, InputKind, ValidationFailure};
pub use platform::{
    load_config, make_gateway, make_storage, resolve_config, BrowserPage, ClientGateway,
};
pub use session::{ModalView, SessionState, SubmitBlocked, Submission};
