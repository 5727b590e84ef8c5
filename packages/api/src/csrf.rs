//! CSRF token names and lookup helpers.
//!
//! The server accepts the anti-forgery token either from the hidden form field
//! it renders into pages or from the `csrftoken` cookie. Finding the field is a
//! DOM concern and lives with the [`crate::Page`] implementation; parsing the
//! cookie string lives here so it can be tested.

/// Request header the server reads the token from.
pub const CSRF_HEADER: &str = "X-CSRFToken";
/// Name of the hidden form input rendered by the server.
pub const CSRF_FIELD: &str = "csrfmiddlewaretoken";
/// Name of the cookie carrying the token.
pub const CSRF_COOKIE: &str = "csrftoken";

/// Extract the `csrftoken` value from a `document.cookie`-style string.
pub fn from_cookie(cookies: &str) -> Option<String> {
    cookies
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == CSRF_COOKIE)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Prefer the form field; fall back to the cookie.
pub fn resolve(field_value: Option<String>, cookies: Option<&str>) -> Option<String> {
    field_value
        .filter(|v| !v.is_empty())
        .or_else(|| cookies.and_then(from_cookie))
}
