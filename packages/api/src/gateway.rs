//! # Authenticated Request Gateway
//!
//! Every call to the protected API goes through [`Gateway`]. It guarantees that
//! the outgoing request carries an unexpired bearer token and the CSRF token,
//! and that every authorization failure ends up on one recovery path:
//! [`Gateway::logout_redirect`].
//!
//! ## Token lifecycle
//!
//! ```text
//! get_valid_token ──► stored access token unexpired? ──yes──► use it
//!                                  │ no
//!                                  ▼
//!                  refresh ──► no refresh token ──► logout_redirect, None
//!                      │
//!                      ├─ POST /api/users/token/refresh/ 2xx {access} ──► persist, return it
//!                      └─ anything else ──────────────────────────────────► logout_redirect, None
//! ```
//!
//! A refresh is attempted at most once per call, with no retry or backoff.
//!
//! ## Failure routing
//!
//! | Situation | Outcome |
//! |-----------|---------|
//! | no valid or refreshable token | redirect to login, `None` / [`ApiError::AuthExpired`] |
//! | server answers `401` | redirect to login, `None` / [`ApiError::AuthRejected`] |
//! | other non-2xx, network or parse failure | [`Page::show_error`] with sanitised text, `None` |
//!
//! [`Gateway::request`] is the high-level call for JSON endpoints and applies
//! the whole table. [`Gateway::send`] stops after the auth rows and returns the
//! raw response, for flows that own their error surface (submission, preview).

use serde::de::DeserializeOwned;
use store::{ClientConfig, KeyValueStore, TokenStore};
use tracing::{debug, error, info, warn};

use crate::csrf::CSRF_HEADER;
use crate::documents::REFRESH_PATH;
use crate::error::ApiError;
use crate::jwt;
use crate::models::{RefreshRequest, RefreshResponse};
use crate::page::Page;
use crate::sanitize::strip_markup;
use crate::transport::{Body, HttpRequest, HttpResponse, Transport};

/// Owns the token lifecycle and decorates outbound requests.
pub struct Gateway<T, S, P> {
    transport: T,
    tokens: TokenStore<S>,
    page: P,
    config: ClientConfig,
}

impl<T, S, P> Gateway<T, S, P>
where
    T: Transport,
    S: KeyValueStore,
    P: Page,
{
    pub fn new(transport: T, storage: S, page: P, config: ClientConfig) -> Self {
        Self {
            transport,
            tokens: TokenStore::new(storage),
            page,
            config,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    /// The stored access token if present and unexpired, otherwise the result
    /// of one [`refresh`](Self::refresh).
    pub async fn get_valid_token(&self) -> Option<String> {
        if let Some(token) = self.tokens.access() {
            if !jwt::is_expired(&token) {
                return Some(token);
            }
            debug!("Access token expired, refreshing");
        }
        self.refresh().await
    }

    /// Exchange the refresh token for a new access token.
    ///
    /// On any failure the tokens are cleared and the page is sent to the login
    /// route; the failure itself is only logged.
    pub async fn refresh(&self) -> Option<String> {
        let Some(refresh_token) = self.tokens.refresh() else {
            warn!("No refresh token stored, redirecting to login");
            self.logout_redirect();
            return None;
        };

        match self.exchange_refresh(&refresh_token).await {
            Ok(access) => {
                self.tokens.set_access(&access);
                info!("Access token refreshed");
                Some(access)
            }
            Err(e) => {
                error!("Token refresh failed: {e}");
                self.logout_redirect();
                None
            }
        }
    }

    async fn exchange_refresh(&self, refresh_token: &str) -> Result<String, ApiError> {
        let body = serde_json::to_string(&RefreshRequest {
            refresh: refresh_token,
        })?;
        let request = self.with_csrf(
            HttpRequest::post_json(self.config.api_url(REFRESH_PATH), body)
                .with_header("Content-Type", "application/json"),
        );

        let response = self.transport.send(request).await?;
        if !response.is_success() {
            return Err(ApiError::http_status(
                response.status,
                format!("Refresh failed with status: {}", response.status),
            ));
        }
        let parsed: RefreshResponse = response.json()?;
        if parsed.access.is_empty() {
            return Err(ApiError::Decode("empty access token".to_string()));
        }
        Ok(parsed.access)
    }

    /// Issue `request` with auth headers attached.
    ///
    /// Resolves auth problems (redirecting as needed) and otherwise returns the
    /// response whatever its status, leaving content errors to the caller.
    pub async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let Some(token) = self.get_valid_token().await else {
            return Err(ApiError::AuthExpired);
        };

        let request = self.authorize(request, &token);
        debug!(url = %request.url, "Sending authenticated request");
        let response = self.transport.send(request).await?;

        if response.is_unauthorized() {
            warn!("Server rejected access token, redirecting to login");
            self.logout_redirect();
            return Err(ApiError::AuthRejected);
        }
        Ok(response)
    }

    /// Issue `request` and parse a 2xx JSON body.
    ///
    /// Returns `None` on every failure. Auth failures have already redirected;
    /// anything else has been shown through [`Page::show_error`].
    pub async fn request<R: DeserializeOwned>(&self, request: HttpRequest) -> Option<R> {
        let url = request.url.clone();
        match self.send(request).await.and_then(parse_json_success) {
            Ok(value) => Some(value),
            Err(e) if e.is_auth() => None,
            Err(e) => {
                error!(url = %url, "API request failed: {e}");
                self.page.show_error(&strip_markup(&e.to_string()));
                None
            }
        }
    }

    /// Clear both tokens and leave for the login page. Idempotent.
    pub fn logout_redirect(&self) {
        self.tokens.clear();
        info!("Redirecting to login");
        self.page.navigate(&self.config.page_url(&self.config.routes.login));
    }

    /// Merge the gateway's headers over the caller's.
    fn authorize(&self, request: HttpRequest, token: &str) -> HttpRequest {
        let request = request.with_header("Authorization", format!("Bearer {token}"));
        let request = self.with_csrf(request);
        // Multipart bodies need the boundary the transport generates.
        match request.body {
            Body::Multipart(_) => request.without_header("Content-Type"),
            _ => request.with_header("Content-Type", "application/json"),
        }
    }

    fn with_csrf(&self, request: HttpRequest) -> HttpRequest {
        match self.page.csrf_token() {
            Some(csrf) => request.with_header(CSRF_HEADER, csrf),
            None => {
                debug!("No CSRF token available on page");
                request
            }
        }
    }
}

fn parse_json_success<R: DeserializeOwned>(response: HttpResponse) -> Result<R, ApiError> {
    if !response.is_success() {
        return Err(ApiError::http_status(
            response.status,
            format!("HTTP error! status: {}", response.status),
        ));
    }
    Ok(response.json()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::make_token;
    use crate::test_support::{fresh_token, stale_token, FakePage, FakeTransport};
    use crate::transport::Method;
    use serde::Deserialize;
    use store::{MemoryStore, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        id: u32,
    }

    fn gateway(
        transport: &FakeTransport,
        store: &MemoryStore,
        page: &FakePage,
    ) -> Gateway<FakeTransport, MemoryStore, FakePage> {
        Gateway::new(
            transport.clone(),
            store.clone(),
            page.clone(),
            ClientConfig::default(),
        )
    }

    #[test]
    fn test_login_redirect_targets_configured_host() {
        let store = MemoryStore::with_entries([(REFRESH_TOKEN_KEY, "r")]);
        let page = FakePage::new();
        let mut config = ClientConfig::default();
        config.api.base_url = "https://docs.example.com/".into();
        let gw = Gateway::new(FakeTransport::new(), store.clone(), page.clone(), config);

        gw.logout_redirect();
        assert_eq!(
            page.navigations(),
            vec!["https://docs.example.com/users/login-page/".to_string()]
        );
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_valid_token_is_returned_without_network() {
        let access = fresh_token();
        let store = MemoryStore::with_entries([(ACCESS_TOKEN_KEY, access.as_str())]);
        let transport = FakeTransport::new();
        let page = FakePage::new();

        let gw = gateway(&transport, &store, &page);
        assert_eq!(gw.get_valid_token().await, Some(access));
        assert!(transport.requests().is_empty());
        assert!(page.navigations().is_empty());
    }

    #[tokio::test]
    async fn test_no_refresh_token_redirects_once_and_clears() {
        let stale = stale_token();
        let store = MemoryStore::with_entries([(ACCESS_TOKEN_KEY, stale.as_str())]);
        let transport = FakeTransport::new();
        let page = FakePage::new();

        let gw = gateway(&transport, &store, &page);
        assert_eq!(gw.get_valid_token().await, None);

        assert_eq!(page.navigations(), vec!["/users/login-page/".to_string()]);
        assert!(store.get(ACCESS_TOKEN_KEY).is_none());
        assert!(store.get(REFRESH_TOKEN_KEY).is_none());
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_expired_token_refreshes_once_and_persists() {
        let stale = stale_token();
        let renewed = fresh_token();
        let store = MemoryStore::with_entries([
            (ACCESS_TOKEN_KEY, stale.as_str()),
            (REFRESH_TOKEN_KEY, "refresh-1"),
        ]);
        let transport = FakeTransport::new();
        transport.push_json(200, &format!(r#"{{"access":"{renewed}"}}"#));
        let page = FakePage::new().with_csrf("csrf-1");

        let gw = gateway(&transport, &store, &page);
        assert_eq!(gw.get_valid_token().await, Some(renewed.clone()));
        assert_eq!(store.get(ACCESS_TOKEN_KEY), Some(renewed));
        assert_eq!(store.get(REFRESH_TOKEN_KEY).as_deref(), Some("refresh-1"));

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        let refresh = &requests[0];
        assert_eq!(refresh.method, Method::Post);
        assert_eq!(refresh.url, "/api/users/token/refresh/");
        assert_eq!(refresh.body, Body::Json(r#"{"refresh":"refresh-1"}"#.to_string()));
        assert_eq!(refresh.header("X-CSRFToken"), Some("csrf-1"));
        assert!(page.navigations().is_empty());
    }

    #[tokio::test]
    async fn test_missing_access_token_also_refreshes() {
        let renewed = fresh_token();
        let store = MemoryStore::with_entries([(REFRESH_TOKEN_KEY, "r")]);
        let transport = FakeTransport::new();
        transport.push_json(200, &format!(r#"{{"access":"{renewed}"}}"#));
        let page = FakePage::new();

        let gw = gateway(&transport, &store, &page);
        assert_eq!(gw.get_valid_token().await, Some(renewed));
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_refresh_non_2xx_clears_and_redirects() {
        let stale = stale_token();
        let store = MemoryStore::with_entries([
            (ACCESS_TOKEN_KEY, stale.as_str()),
            (REFRESH_TOKEN_KEY, "revoked"),
        ]);
        let transport = FakeTransport::new();
        transport.push_json(401, r#"{"detail":"Token is blacklisted"}"#);
        let page = FakePage::new();

        let gw = gateway(&transport, &store, &page);
        assert_eq!(gw.get_valid_token().await, None);
        assert!(store.is_empty());
        assert_eq!(page.navigations().len(), 1);
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_refresh_network_and_parse_failures_redirect() {
        for script in [None, Some((200, "not json")), Some((200, r#"{"access":""}"#))] {
            let store = MemoryStore::with_entries([(REFRESH_TOKEN_KEY, "r")]);
            let transport = FakeTransport::new();
            match script {
                Some((status, body)) => transport.push_json(status, body),
                None => transport.push_network_error("offline"),
            }
            let page = FakePage::new();

            let gw = gateway(&transport, &store, &page);
            assert_eq!(gw.refresh().await, None);
            assert!(store.is_empty());
            assert_eq!(page.navigations().len(), 1);
            assert!(page.errors().is_empty());
        }
    }

    #[tokio::test]
    async fn test_request_attaches_headers() {
        let access = fresh_token();
        let store = MemoryStore::with_entries([(ACCESS_TOKEN_KEY, access.as_str())]);
        let transport = FakeTransport::new();
        transport.push_json(200, r#"{"id": 3}"#);
        let page = FakePage::new().with_csrf("csrf-2");

        let gw = gateway(&transport, &store, &page);
        let request = HttpRequest::get("/api/things/")
            .with_header("Accept-Language", "en")
            .with_header("Authorization", "Bearer caller-supplied");
        let item: Option<Item> = gw.request(request).await;
        assert_eq!(item, Some(Item { id: 3 }));

        let sent = &transport.requests()[0];
        let bearer = format!("Bearer {access}");
        assert_eq!(sent.header("Authorization"), Some(bearer.as_str()));
        assert_eq!(sent.header("X-CSRFToken"), Some("csrf-2"));
        assert_eq!(sent.header("Content-Type"), Some("application/json"));
        assert_eq!(sent.header("Accept-Language"), Some("en"));
    }

    #[tokio::test]
    async fn test_multipart_omits_content_type() {
        let access = fresh_token();
        let store = MemoryStore::with_entries([(ACCESS_TOKEN_KEY, access.as_str())]);
        let transport = FakeTransport::new();
        transport.push_json(200, "{}");
        let page = FakePage::new();

        let gw = gateway(&transport, &store, &page);
        let request = HttpRequest::post_multipart("/upload/", vec![("a".into(), "1".into())])
            .with_header("Content-Type", "application/json");
        gw.send(request).await.unwrap();

        let sent = &transport.requests()[0];
        assert!(sent.header("Content-Type").is_none());
        assert!(sent.header("Authorization").is_some());
    }

    #[tokio::test]
    async fn test_401_redirects_even_with_valid_token() {
        let access = fresh_token();
        let store = MemoryStore::with_entries([
            (ACCESS_TOKEN_KEY, access.as_str()),
            (REFRESH_TOKEN_KEY, "r"),
        ]);
        let transport = FakeTransport::new();
        transport.push_json(401, r#"{"detail":"revoked"}"#);
        let page = FakePage::new();

        let gw = gateway(&transport, &store, &page);
        let item: Option<Item> = gw.request(HttpRequest::get("/api/x/")).await;
        assert_eq!(item, None);
        assert_eq!(page.navigations(), vec!["/users/login-page/".to_string()]);
        assert!(store.is_empty());
        assert!(page.errors().is_empty());
        // No refresh attempt after a 401
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_non_2xx_shows_error_and_keeps_tokens() {
        let access = fresh_token();
        let store = MemoryStore::with_entries([(ACCESS_TOKEN_KEY, access.as_str())]);
        let transport = FakeTransport::new();
        transport.push_json(500, "<h1>Server Error</h1>");
        let page = FakePage::new();

        let gw = gateway(&transport, &store, &page);
        let item: Option<Item> = gw.request(HttpRequest::get("/api/x/")).await;
        assert_eq!(item, None);
        assert_eq!(page.errors(), vec!["HTTP error! status: 500".to_string()]);
        assert!(page.navigations().is_empty());
        assert_eq!(store.get(ACCESS_TOKEN_KEY), Some(access));
    }

    #[tokio::test]
    async fn test_network_and_parse_failures_show_error() {
        let access = fresh_token();
        let store = MemoryStore::with_entries([(ACCESS_TOKEN_KEY, access.as_str())]);
        let transport = FakeTransport::new();
        transport.push_network_error("connection <b>refused</b>");
        transport.push_json(200, "[1, 2");
        let page = FakePage::new();

        let gw = gateway(&transport, &store, &page);
        assert_eq!(gw.request::<Item>(HttpRequest::get("/a/")).await, None);
        assert_eq!(gw.request::<Item>(HttpRequest::get("/b/")).await, None);

        let errors = page.errors();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0], "Network error: connection refused");
        assert!(errors[1].starts_with("Malformed response:"));
    }

    #[tokio::test]
    async fn test_send_without_any_token_is_auth_expired() {
        let store = MemoryStore::new();
        let transport = FakeTransport::new();
        let page = FakePage::new();

        let gw = gateway(&transport, &store, &page);
        let result = gw.send(HttpRequest::get("/api/x/")).await;
        assert_eq!(result, Err(ApiError::AuthExpired));
        assert!(transport.requests().is_empty());
        assert_eq!(page.navigations().len(), 1);
    }

    #[tokio::test]
    async fn test_logout_redirect_is_idempotent() {
        let store = MemoryStore::with_entries([(ACCESS_TOKEN_KEY, "a"), (REFRESH_TOKEN_KEY, "r")]);
        let transport = FakeTransport::new();
        let page = FakePage::new();

        let gw = gateway(&transport, &store, &page);
        gw.logout_redirect();
        gw.logout_redirect();
        assert!(store.is_empty());
        assert_eq!(page.navigations().len(), 2);
        assert!(page
            .navigations()
            .iter()
            .all(|url| url == "/users/login-page/"));
    }

    #[tokio::test]
    async fn test_malformed_access_token_is_refreshed() {
        let renewed = make_token(&format!(r#"{{"exp":{}}}"#, jwt::now_secs() + 300.0));
        let store = MemoryStore::with_entries([
            (ACCESS_TOKEN_KEY, "garbage"),
            (REFRESH_TOKEN_KEY, "r"),
        ]);
        let transport = FakeTransport::new();
        transport.push_json(200, &format!(r#"{{"access":"{renewed}"}}"#));
        let page = FakePage::new();

        let gw = gateway(&transport, &store, &page);
        assert_eq!(gw.get_valid_token().await, Some(renewed.clone()));
        assert_eq!(store.get(ACCESS_TOKEN_KEY), Some(renewed));
    }
}
