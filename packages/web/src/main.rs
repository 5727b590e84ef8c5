use dioxus::logger::tracing::Level;
use dioxus::prelude::*;

use store::ClientConfig;
use views::{Shell, Templates};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Root {},
    #[layout(Shell)]
        #[route("/templates")]
        Templates {},
}

const FAVICON: Asset = asset!("/assets/favicon.svg");
const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    if let Err(e) = dioxus::logger::init(Level::INFO) {
        eprintln!("Failed to initialise logging: {e}");
    }
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    let config: ClientConfig = use_context_provider(ui::load_config);
    use_hook(|| {
        tracing::info!(
            base_url = %config.api.base_url,
            formats = ?config.documents.formats,
            "Starting Fillmate client"
        )
    });

    rsx! {
        document::Link { rel: "icon", href: FAVICON }
        document::Stylesheet { href: MAIN_CSS }
        Router::<Route> {}
    }
}

/// Redirect `/` to the template catalog.
#[component]
fn Root() -> Element {
    let nav = use_navigator();
    nav.replace(Route::Templates {});
    rsx! {}
}
