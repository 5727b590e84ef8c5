//! # Client configuration — `fillmate.toml`
//!
//! Defines the TOML configuration the client reads at startup (filename:
//! [`ClientConfig::filename`] = `"fillmate.toml"`). Every field has a default,
//! so a missing or empty file is equivalent to the default configuration, which
//! matches the routes the server ships with.
//!
//! ## Structure
//!
//! ```toml
//! [api]
//! base_url = ""                           # empty = serving origin (web only)
//!
//! [routes]
//! login = "/users/login-page/"
//! after_submit = "/documents/my-documents/"
//!
//! [documents]
//! default_format = "docx"
//! formats = ["docx", "pdf"]
//!
//! [layout]
//! collapse_below_px = 768
//! ```
//!
//! ## Types
//!
//! | Struct | Purpose |
//! |--------|---------|
//! | [`ClientConfig`] | Top-level config with TOML (de)serialisation and the canonical filename. |
//! | [`ApiConfig`] | Host prefix for every API endpoint. |
//! | [`RoutesConfig`] | Page routes the client navigates to. |
//! | [`DocumentsConfig`] | Output formats offered on the submission form. |
//! | [`LayoutConfig`] | Viewport width below which the sidebar auto-collapses. |
//! | [`ConfigError`] | Why a configuration cannot be used as loaded. |

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("api.base_url in fillmate.toml must be an absolute http(s) URL, got {0:?}")]
    RelativeBaseUrl(String),
}

/// Top-level configuration stored in `fillmate.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub routes: RoutesConfig,
    #[serde(default)]
    pub documents: DocumentsConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
}

/// API host configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Prefix for `/api/...` paths. Empty string means same origin.
    #[serde(default)]
    pub base_url: String,
}

/// Page routes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoutesConfig {
    #[serde(default = "default_login_route")]
    pub login: String,
    /// Used when a submission response carries no `redirect_url`.
    #[serde(default = "default_after_submit_route")]
    pub after_submit: String,
}

fn default_login_route() -> String {
    "/users/login-page/".to_string()
}

fn default_after_submit_route() -> String {
    "/documents/my-documents/".to_string()
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            login: default_login_route(),
            after_submit: default_after_submit_route(),
        }
    }
}

/// Document output options.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DocumentsConfig {
    #[serde(default = "default_format")]
    pub default_format: String,
    #[serde(default = "default_formats")]
    pub formats: Vec<String>,
}

fn default_format() -> String {
    "docx".to_string()
}

fn default_formats() -> Vec<String> {
    vec!["docx".to_string(), "pdf".to_string()]
}

impl Default for DocumentsConfig {
    fn default() -> Self {
        Self {
            default_format: default_format(),
            formats: default_formats(),
        }
    }
}

/// Layout behaviour.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Viewport widths strictly below this collapse the sidebar.
    #[serde(default = "default_collapse_below")]
    pub collapse_below_px: u32,
}

fn default_collapse_below() -> u32 {
    768
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            collapse_below_px: default_collapse_below(),
        }
    }
}

impl ClientConfig {
    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "fillmate.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Join an API path (e.g. `"/api/documents/templates/"`) onto the base URL.
    pub fn api_url(&self, path: &str) -> String {
        let base = self.api.base_url.trim_end_matches('/');
        format!("{base}{path}")
    }

    /// Where a page route lives. Root-relative routes are joined onto the base
    /// URL; anything else (already absolute, or empty base) passes through.
    pub fn page_url(&self, route: &str) -> String {
        if route.starts_with('/') && !route.starts_with("//") {
            self.api_url(route)
        } else {
            route.to_string()
        }
    }

    /// Make the base URL absolute, taking `origin` when none is configured.
    ///
    /// Requests are built from absolute URLs only; outside a browser there is
    /// no origin, so the file has to name the server.
    pub fn resolve_base_url(&mut self, origin: Option<&str>) -> Result<(), ConfigError> {
        if self.api.base_url.trim().is_empty() {
            if let Some(origin) = origin.filter(|o| is_absolute_http(o)) {
                self.api.base_url = origin.to_string();
            }
        }
        if is_absolute_http(&self.api.base_url) {
            Ok(())
        } else {
            Err(ConfigError::RelativeBaseUrl(self.api.base_url.clone()))
        }
    }
}

fn is_absolute_http(url: &str) -> bool {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"));
    rest.is_some_and(|host| !host.is_empty() && !host.starts_with('/'))
}
