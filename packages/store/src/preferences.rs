//! UI preferences persisted alongside the tokens.

use crate::kv::KeyValueStore;

pub const SIDEBAR_COLLAPSED_KEY: &str = "sidebarCollapsed";

/// Typed accessor for UI preferences.
#[derive(Clone, Debug)]
pub struct Preferences<S> {
    storage: S,
}

impl<S: KeyValueStore> Preferences<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Only the exact string `"true"` counts as collapsed.
    pub fn sidebar_collapsed(&self) -> bool {
        self.storage.get(SIDEBAR_COLLAPSED_KEY).as_deref() == Some("true")
    }

    pub fn set_sidebar_collapsed(&self, collapsed: bool) {
        let value = if collapsed { "true" } else { "false" };
        self.storage.set(SIDEBAR_COLLAPSED_KEY, value);
    }
}
