//! Platform constructors: storage backend, the hosting [`api::Page`], the
//! gateway, object URLs and configuration.
//!
//! - **Web** (WASM + `web` feature): `localStorage` via [`store::LocalStorageStore`],
//!   `Blob` object URLs, configuration from built-in defaults
//! - **Desktop** (native): files under `<data_dir>/fillmate/` via [`store::FileStore`],
//!   `data:` URLs, configuration from `<data_dir>/fillmate/fillmate.toml`, which
//!   must name the server in `api.base_url`

use std::rc::Rc;

use api::{Gateway, Page, Preview, ReqwestTransport};
use dioxus::prelude::*;
use store::{ClientConfig, ConfigError};

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub type PlatformStore = store::LocalStorageStore;
#[cfg(not(target_arch = "wasm32"))]
pub type PlatformStore = store::FileStore;
#[cfg(all(target_arch = "wasm32", not(feature = "web")))]
pub type PlatformStore = store::MemoryStore;

pub type ClientGateway = Gateway<ReqwestTransport, PlatformStore, BrowserPage>;

#[cfg(not(target_arch = "wasm32"))]
fn data_dir() -> std::path::PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join("fillmate")
}

/// Create the platform-appropriate key/value store.
pub fn make_storage() -> PlatformStore {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        store::LocalStorageStore::new()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        store::FileStore::new(data_dir())
    }
    #[cfg(all(target_arch = "wasm32", not(feature = "web")))]
    {
        store::MemoryStore::new()
    }
}

/// Load the client configuration, falling back to defaults.
pub fn load_config() -> ClientConfig {
    #[cfg(not(target_arch = "wasm32"))]
    {
        let path = data_dir().join(ClientConfig::filename());
        match std::fs::read_to_string(&path) {
            Ok(text) => match ClientConfig::from_toml(&text) {
                Ok(config) => {
                    tracing::info!("Loaded configuration from {}", path.display());
                    return config;
                }
                Err(e) => tracing::warn!("Ignoring invalid {}: {e}", path.display()),
            },
            Err(_) => tracing::debug!("No configuration at {}, using defaults", path.display()),
        }
    }
    ClientConfig::default()
}

/// The hosting document as the gateway sees it.
///
/// Errors land in a signal the catalog renders; the CSRF token is probed once
/// before the first request and cached in another.
#[derive(Clone, Copy, PartialEq)]
pub struct BrowserPage {
    pub error: Signal<Option<String>>,
    pub csrf: Signal<Option<String>>,
}

impl BrowserPage {
    /// Must be called inside a component.
    pub fn new() -> Self {
        Self {
            error: Signal::new(None),
            csrf: Signal::new(None),
        }
    }

    /// Look the CSRF token up once; later calls are no-ops.
    pub async fn load_csrf(&self) {
        if self.csrf.peek().is_some() {
            return;
        }
        let token = crate::bridge::probe_csrf_token().await;
        if token.is_none() {
            tracing::debug!("No CSRF token on page");
        }
        let mut csrf = self.csrf;
        csrf.set(token);
    }

    pub fn clear_error(&self) {
        let mut error = self.error;
        error.set(None);
    }
}

impl Page for BrowserPage {
    fn navigate(&self, url: &str) {
        tracing::info!("Navigating to {url}");
        #[cfg(target_arch = "wasm32")]
        {
            if let Some(window) = web_sys::window() {
                let _ = window.location().set_href(url);
                return;
            }
        }
        crate::bridge::navigate(url);
    }

    fn csrf_token(&self) -> Option<String> {
        self.csrf.peek().clone()
    }

    fn show_error(&self, message: &str) {
        let mut error = self.error;
        error.set(Some(message.to_string()));
    }
}

/// Give `config` an absolute base URL: the serving origin in a browser, the
/// configured server everywhere else.
pub fn resolve_config(mut config: ClientConfig) -> Result<ClientConfig, ConfigError> {
    #[cfg(target_arch = "wasm32")]
    let origin = web_sys::window().and_then(|w| w.location().origin().ok());
    #[cfg(not(target_arch = "wasm32"))]
    let origin: Option<String> = None;

    config.resolve_base_url(origin.as_deref())?;
    Ok(config)
}

/// Build the gateway for this platform from a [`resolve_config`]d configuration.
pub fn make_gateway(page: BrowserPage, config: ClientConfig) -> Rc<ClientGateway> {
    Rc::new(Gateway::new(
        ReqwestTransport::new(),
        make_storage(),
        page,
        config,
    ))
}

/// Wrap preview bytes in a URL an iframe can load.
pub fn create_object_url(preview: &Preview) -> Option<String> {
    #[cfg(target_arch = "wasm32")]
    {
        use web_sys::{Blob, BlobPropertyBag, Url};

        let bytes = js_sys::Uint8Array::from(preview.bytes.as_slice());
        let parts = js_sys::Array::of1(&bytes);
        let options = BlobPropertyBag::new();
        options.set_type(&preview.content_type);
        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options).ok()?;
        Url::create_object_url_with_blob(&blob).ok()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        Some(preview.data_url())
    }
}

/// Release a URL made by [`create_object_url`].
pub fn revoke_object_url(url: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        if url.starts_with("blob:") {
            let _ = web_sys::Url::revoke_object_url(url);
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = url;
    }
}
