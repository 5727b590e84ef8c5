//! # Token pair persistence
//!
//! The access/refresh JWT pair lives in client storage under two fixed keys,
//! [`ACCESS_TOKEN_KEY`] and [`REFRESH_TOKEN_KEY`]. [`TokenStore`] is a thin typed
//! view over any [`KeyValueStore`]; it knows nothing about expiry, which is the
//! gateway's concern.

use crate::kv::KeyValueStore;

pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

/// Typed accessor for the persisted token pair.
#[derive(Clone, Debug)]
pub struct TokenStore<S> {
    storage: S,
}

impl<S: KeyValueStore> TokenStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn access(&self) -> Option<String> {
        non_empty(self.storage.get(ACCESS_TOKEN_KEY))
    }

    pub fn refresh(&self) -> Option<String> {
        non_empty(self.storage.get(REFRESH_TOKEN_KEY))
    }

    pub fn set_access(&self, token: &str) {
        self.storage.set(ACCESS_TOKEN_KEY, token);
    }

    /// Remove both tokens. Safe to call repeatedly.
    pub fn clear(&self) {
        self.storage.remove(ACCESS_TOKEN_KEY);
        self.storage.remove(REFRESH_TOKEN_KEY);
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
