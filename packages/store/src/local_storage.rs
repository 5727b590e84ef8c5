//! # `localStorage` key/value store — browser-side persistence
//!
//! [`LocalStorageStore`] is the [`KeyValueStore`] used on the web platform. It is
//! a zero-size handle that looks up `window.localStorage` on every call, so it is
//! `Copy` and can be handed to any component or future without lifetimes.
//!
//! Storage can be unavailable (private browsing, disabled cookies, sandboxed
//! iframes); every method then degrades to "absent" / no-op.

use crate::kv::KeyValueStore;

/// `window.localStorage`-backed KeyValueStore for the web platform.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.set_item(key, value);
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(key);
        }
    }
}
