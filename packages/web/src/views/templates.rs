use dioxus::prelude::*;
use ui::views::TemplatesView;

#[component]
pub fn Templates() -> Element {
    rsx! {
        TemplatesView {}
    }
}
