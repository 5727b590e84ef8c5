//! # Access-token expiry check
//!
//! The client never verifies signatures (it has no key); it only reads the
//! `exp` claim from the payload segment to decide whether a token is worth
//! sending. Anything it cannot read is treated as expired, which pushes the
//! caller towards a refresh or a fresh login rather than trusting a malformed
//! credential.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde::Deserialize;

#[derive(Deserialize)]
struct ExpiryClaim {
    exp: Option<f64>,
}

/// Whether `token` is expired right now.
pub fn is_expired(token: &str) -> bool {
    is_expired_at(token, now_secs())
}

/// Whether `token` is expired at `now` (epoch seconds).
///
/// Expired means `exp < now`. A token without a readable numeric `exp` is
/// expired.
pub fn is_expired_at(token: &str, now: f64) -> bool {
    match expiry(token) {
        Some(exp) => exp < now,
        None => true,
    }
}

/// The `exp` claim of `token`, if the payload can be decoded.
pub fn expiry(token: &str) -> Option<f64> {
    let payload = token.split('.').nth(1)?;
    let bytes = decode_segment(payload)?;
    let claim: ExpiryClaim = serde_json::from_slice(&bytes).ok()?;
    claim.exp.filter(|exp| exp.is_finite())
}

// Accept both alphabets and optional padding; issuers are not always strict.
fn decode_segment(segment: &str) -> Option<Vec<u8>> {
    let normalized: String = segment
        .trim_end_matches('=')
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            other => other,
        })
        .collect();
    URL_SAFE_NO_PAD.decode(normalized).ok()
}

/// Current time in epoch seconds.
#[cfg(target_arch = "wasm32")]
pub fn now_secs() -> f64 {
    js_sys::Date::now() / 1000.0
}

/// Current time in epoch seconds.
#[cfg(not(target_arch = "wasm32"))]
pub fn now_secs() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}

#[cfg(test)]
pub(crate) fn make_token(payload: &str) -> String {
    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
    let body = URL_SAFE_NO_PAD.encode(payload);
    format!("{header}.{body}.signature")
}
