pub mod config;
pub mod kv;
pub mod preferences;
pub mod tokens;

mod memory;
pub use memory::MemoryStore;

#[cfg(not(target_arch = "wasm32"))]
mod file_store;
#[cfg(not(target_arch = "wasm32"))]
pub use file_store::FileStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local_storage;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local_storage::LocalStorageStore;

pub use config::{ClientConfig, ConfigError};
pub use kv::KeyValueStore;
pub use preferences::Preferences;
pub use tokens::{TokenStore, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};
