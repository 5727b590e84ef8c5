//! # Key/value storage seam
//!
//! Everything the client persists (the token pair, the sidebar preference) is a
//! string under a string key, which is exactly the shape of the browser's
//! `localStorage`. [`KeyValueStore`] captures that shape so the same token and
//! preference logic works against:
//!
//! | Backend | Where |
//! |---------|-------|
//! | [`crate::MemoryStore`] | tests, and any platform without persistence |
//! | `FileStore` | desktop builds (one file per key under a data directory) |
//! | `LocalStorageStore` | web builds (`window.localStorage`) |
//!
//! Backends never fail loudly: a read that cannot be served is `None`, a write
//! that cannot be performed is dropped. The server holds the authoritative
//! session, so losing a token degrades to a login redirect.

/// Synchronous string storage, mirroring the `localStorage` API.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) {
        (**self).remove(key)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for std::rc::Rc<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) {
        (**self).remove(key)
    }
}
