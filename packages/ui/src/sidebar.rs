//! Collapsible navigation sidebar.
//!
//! The user's choice is persisted under `sidebarCollapsed`. Narrow viewports
//! force the sidebar closed on load and on every resize, without touching the
//! stored preference.

use dioxus::prelude::*;
use store::{ClientConfig, KeyValueStore, Preferences};

use crate::bridge::use_viewport_width;
use crate::icons::{FaBars, FaFileLines, FaFolderOpen};
use crate::platform::make_storage;
use crate::Icon;

const SIDEBAR_CSS: Asset = asset!("/assets/styling/sidebar.css");

pub fn should_auto_collapse(width: f64, collapse_below_px: u32) -> bool {
    width < f64::from(collapse_below_px)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SidebarState {
    pub collapsed: bool,
}

impl SidebarState {
    pub fn load<S: KeyValueStore>(prefs: &Preferences<S>) -> Self {
        Self {
            collapsed: prefs.sidebar_collapsed(),
        }
    }

    /// Flip and persist.
    pub fn toggle<S: KeyValueStore>(&mut self, prefs: &Preferences<S>) {
        self.collapsed = !self.collapsed;
        prefs.set_sidebar_collapsed(self.collapsed);
    }

    /// Collapse when the viewport is too narrow. Widening never re-expands.
    pub fn apply_viewport(&mut self, width: f64, collapse_below_px: u32) {
        if should_auto_collapse(width, collapse_below_px) {
            self.collapsed = true;
        }
    }
}

/// Which sidebar entry is highlighted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SidebarLink {
    Templates,
    MyDocuments,
}

#[component]
pub fn AppSidebar(active: SidebarLink, templates_href: String, children: Element) -> Element {
    let config = try_use_context::<ClientConfig>().unwrap_or_default();
    let threshold = config.layout.collapse_below_px;
    let prefs = use_hook(|| Preferences::new(make_storage()));
    let mut state = use_signal({
        let prefs = prefs.clone();
        move || SidebarState::load(&prefs)
    });
    let width = use_viewport_width();

    use_effect(move || {
        if let Some(w) = width() {
            state.with_mut(|s| s.apply_viewport(w, threshold));
        }
    });

    let collapsed = state().collapsed;
    let link_class = |link: SidebarLink| {
        if link == active {
            "sidebar-link active"
        } else {
            "sidebar-link"
        }
    };

    rsx! {
        document::Stylesheet { href: SIDEBAR_CSS }

        div { class: "wrapper",
            aside {
                id: "sidebar",
                class: if collapsed { "sidebar collapsed" } else { "sidebar" },
                div { class: "sidebar-header",
                    button {
                        class: "toggler-btn",
                        r#type: "button",
                        title: if collapsed { "Expand sidebar" } else { "Collapse sidebar" },
                        onclick: move |_| state.with_mut(|s| s.toggle(&prefs)),
                        Icon { icon: FaBars, width: 16, height: 16 }
                    }
                    if !collapsed {
                        span { class: "sidebar-brand", "Fillmate" }
                    }
                }
                nav { class: "sidebar-nav",
                    a { class: link_class(SidebarLink::Templates), href: "{templates_href}",
                        Icon { icon: FaFileLines, width: 14, height: 14 }
                        if !collapsed { span { "Templates" } }
                    }
                    a {
                        class: link_class(SidebarLink::MyDocuments),
                        href: "{config.routes.after_submit}",
                        Icon { icon: FaFolderOpen, width: 14, height: 14 }
                        if !collapsed { span { "My Documents" } }
                    }
                }
            }
            main { class: "main-content", {children} }
        }
    }
}
