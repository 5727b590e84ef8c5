use dioxus::prelude::*;
use ui::{AppSidebar, SidebarLink};

use crate::Route;

/// Sidebar around every routed page.
#[component]
pub fn Shell() -> Element {
    let active = match use_route::<Route>() {
        Route::Templates {} | Route::Root {} => SidebarLink::Templates,
    };

    rsx! {
        AppSidebar {
            active,
            templates_href: Route::Templates {}.to_string(),
            Outlet::<Route> {}
        }
    }
}
