//! # API crate — authenticated access to the Fillmate document API
//!
//! This crate is everything the client needs to talk to the server, with no
//! dependency on the DOM or on Dioxus. The UI crate supplies the three seams
//! ([`Transport`], [`store::KeyValueStore`], [`Page`]) and calls through a single
//! [`Gateway`].
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`gateway`] | Token lifecycle (read, expiry check, one-shot refresh, logout redirect) and header injection for every protected call |
//! | [`documents`] | Template catalog, submission and preview endpoints, built on the gateway |
//! | [`jwt`] | Decode-and-compare expiry check; malformed tokens count as expired |
//! | [`transport`] | Plain HTTP request/response types, the [`Transport`] trait, and the `reqwest` implementation |
//! | [`page`] | The [`Page`] trait: navigation, CSRF lookup, shared error display |
//! | [`csrf`] | CSRF header/cookie names and cookie parsing |
//! | [`sanitize`] | Strips markup from server-supplied error text before display |
//! | [`models`] | Wire types (`Template`, `Placeholder`, refresh and submit payloads) |
//! | [`error`] | [`ApiError`] / [`TransportError`] |
//!
//! ## Endpoints
//!
//! - `POST /api/users/token/refresh/` — `{refresh}` → `{access}`
//! - `GET /api/documents/templates/` — `[Template]`
//! - `POST /api/documents/templates/{id}/submit/` — multipart → `{redirect_url?}` / `{error}`
//! - `GET /api/documents/templates/{id}/preview/` — rendered document bytes

pub mod csrf;
pub mod documents;
pub mod error;
pub mod gateway;
pub mod jwt;
pub mod models;
pub mod page;
pub mod sanitize;
pub mod transport;

#[cfg(test)]
mod test_support;

pub use documents::{Preview, SubmitOutcome};
pub use error::{ApiError, TransportError};
pub use gateway::Gateway;
pub use models::{Placeholder, PlaceholderType, Template, TemplateOwner};
pub use page::Page;
pub use transport::{Body, HttpRequest, HttpResponse, Method, ReqwestTransport, Transport};
