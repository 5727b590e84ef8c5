//! Template catalog: one card per template, with loading, empty and error states.

use api::Template;
use dioxus::prelude::*;

use crate::icons::{FaCircleExclamation, FaFileLines, FaFolderOpen, FaGlobe, FaUser};
use crate::Icon;

pub const EMPTY_MESSAGE: &str = "No templates available";
pub const GENERIC_ERROR: &str = "An error occurred. Please try again later.";

/// What a card shows for one template.
#[derive(Clone, Debug, PartialEq)]
pub struct CardModel {
    pub id: u64,
    pub name: String,
    pub fields_label: String,
    pub public: bool,
    pub uploaded_by: Option<String>,
}

impl From<&Template> for CardModel {
    fn from(t: &Template) -> Self {
        Self {
            id: t.id,
            name: t.name.clone(),
            fields_label: format!("{} fields", t.field_count()),
            public: t.is_public,
            uploaded_by: t.user.as_ref().map(|u| u.username.clone()),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum CatalogView {
    Loading,
    Failed(String),
    Empty,
    Cards(Vec<CardModel>),
}

impl CatalogView {
    /// Whether the error panel should offer a way back to login.
    pub fn needs_login(&self) -> bool {
        matches!(self, Self::Failed(msg) if msg.to_lowercase().contains("expired"))
    }
}

/// Derive the catalog state.
///
/// `loaded` is the fetch state: `None` while in flight, `Some(None)` when the
/// gateway handled the failure itself. `error` is the page's shared error
/// display, which wins over everything else.
pub fn catalog_view(loaded: Option<&Option<Vec<Template>>>, error: Option<&str>) -> CatalogView {
    if let Some(message) = error {
        let message = message.trim();
        return CatalogView::Failed(if message.is_empty() {
            GENERIC_ERROR.to_string()
        } else {
            message.to_string()
        });
    }
    match loaded {
        // Still fetching, or a login redirect is under way
        None | Some(None) => CatalogView::Loading,
        Some(Some(templates)) if templates.is_empty() => CatalogView::Empty,
        Some(Some(templates)) => CatalogView::Cards(templates.iter().map(CardModel::from).collect()),
    }
}

#[component]
pub fn TemplateCatalog(view: CatalogView, login_url: String, on_select: EventHandler<u64>) -> Element {
    let needs_login = view.needs_login();
    match view {
        CatalogView::Loading => rsx! {
            div { class: "catalog-status",
                span { class: "spinner" }
                span { "Loading templates..." }
            }
        },
        CatalogView::Failed(message) => rsx! {
            div { class: "catalog-error", role: "alert",
                Icon { icon: FaCircleExclamation, width: 16, height: 16 }
                span { "{message}" }
                if needs_login {
                    a { class: "catalog-login-link", href: "{login_url}", "Log in again" }
                }
            }
        },
        CatalogView::Empty => rsx! {
            div { class: "catalog-empty",
                Icon { icon: FaFolderOpen, width: 32, height: 32 }
                p { "{EMPTY_MESSAGE}" }
            }
        },
        CatalogView::Cards(cards) => rsx! {
            div { class: "catalog-grid",
                for card in cards {
                    TemplateCard { key: "{card.id}", card: card.clone(), on_select }
                }
            }
        },
    }
}

#[component]
fn TemplateCard(card: CardModel, on_select: EventHandler<u64>) -> Element {
    let id = card.id;
    rsx! {
        div {
            class: "template-card",
            role: "button",
            tabindex: "0",
            onclick: move |_| on_select.call(id),
            onkeydown: move |evt: KeyboardEvent| {
                if evt.key() == Key::Enter {
                    on_select.call(id);
                }
            },
            div { class: "template-card-icon",
                Icon { icon: FaFileLines, width: 20, height: 20 }
            }
            h3 { class: "template-card-title", "{card.name}" }
            div { class: "template-card-meta",
                span { class: "template-card-fields", "{card.fields_label}" }
                if card.public {
                    span { class: "badge badge-public",
                        Icon { icon: FaGlobe, width: 10, height: 10 }
                        "Public"
                    }
                }
            }
            if let Some(owner) = card.uploaded_by.as_ref() {
                div { class: "template-card-owner",
                    Icon { icon: FaUser, width: 10, height: 10 }
                    span { "Uploaded by {owner}" }
                }
            }
        }
    }
}
