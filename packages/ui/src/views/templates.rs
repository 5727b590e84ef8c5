use dioxus::prelude::*;
use store::ClientConfig;

use crate::catalog::{catalog_view, CatalogView, TemplateCatalog};
use crate::modals::{update_releasing, FormModal, OptionsModal, PreviewModal};
use crate::platform::{load_config, make_gateway, resolve_config, BrowserPage};
use crate::session::SessionState;
use crate::MAIN_UI_CSS;

/// The template page: catalog plus the modals it opens.
///
/// A configuration that cannot reach the server stops here with the reason
/// in place of the catalog.
#[component]
pub fn TemplatesView() -> Element {
    let resolved = use_hook(|| {
        let config = try_consume_context::<ClientConfig>().unwrap_or_else(load_config);
        resolve_config(config).map_err(|e| {
            tracing::error!("Unusable configuration: {e}");
            e.to_string()
        })
    });

    match resolved {
        Ok(config) => rsx! {
            TemplatesPage { config }
        },
        Err(message) => rsx! {
            document::Stylesheet { href: MAIN_UI_CSS }
            div { class: "templates-page",
                h1 { class: "page-title", "Document Templates" }
                TemplateCatalog {
                    view: CatalogView::Failed(message),
                    login_url: String::new(),
                    on_select: move |_: u64| {},
                }
            }
        },
    }
}

/// Owns the gateway and the session for everything below it.
#[component]
fn TemplatesPage(config: ClientConfig) -> Element {
    let page = use_hook(BrowserPage::new);
    let gateway = use_context_provider({
        let config = config.clone();
        move || make_gateway(page, config)
    });
    let session = use_context_provider(|| Signal::new(SessionState::default()));

    let templates = use_resource(move || {
        let gateway = gateway.clone();
        async move {
            // A fresh fetch replaces whatever the last one reported
            page.clear_error();
            page.load_csrf().await;
            gateway.list_templates().await
        }
    });

    let view = catalog_view(
        (*templates.read()).as_ref(),
        (*page.error.read()).as_deref(),
    );

    let on_select = move |id: u64| {
        let template = (*templates.read())
            .as_ref()
            .and_then(|loaded| loaded.as_ref())
            .and_then(|list| list.iter().find(|t| t.id == id).cloned());
        match template {
            Some(template) => {
                tracing::debug!(template_id = id, "Template selected");
                update_releasing(session, |s| s.select(template));
            }
            None => tracing::warn!(template_id = id, "Selected template is not loaded"),
        }
    };

    rsx! {
        document::Stylesheet { href: MAIN_UI_CSS }
        div { class: "templates-page",
            h1 { class: "page-title", "Document Templates" }
            TemplateCatalog { view, login_url: config.page_url(&config.routes.login), on_select }
        }
        OptionsModal { session }
        FormModal { session }
        PreviewModal { session }
    }
}
