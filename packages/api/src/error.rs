//! Error types for the gateway and document endpoints.

use thiserror::Error;

/// Failure to exchange a request with the server at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Everything that can go wrong on a client flow.
///
/// The two auth variants are terminal for the current flow: by the time a
/// caller sees them, the tokens are cleared and the login redirect has been
/// issued. Callers should stop quietly rather than display them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// No usable access token and none could be refreshed.
    #[error("Your session has expired. Please log in again.")]
    AuthExpired,
    /// The server answered 401 to a token that looked valid locally.
    #[error("Your session has expired or was revoked. Please log in again.")]
    AuthRejected,
    /// A required field was left empty; resumable once the user fills it.
    #[error("{0}")]
    Validation(String),
    /// Non-2xx on a content endpoint, or a client-side precondition failed.
    #[error("{message}")]
    RequestFailure { status: Option<u16>, message: String },
    /// The server answered 2xx with a body we could not read.
    #[error("Malformed response: {0}")]
    Decode(String),
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl ApiError {
    pub fn failure(message: impl Into<String>) -> Self {
        Self::RequestFailure {
            status: None,
            message: message.into(),
        }
    }

    pub fn http_status(status: u16, message: impl Into<String>) -> Self {
        Self::RequestFailure {
            status: Some(status),
            message: message.into(),
        }
    }

    /// True when the login redirect has already been issued for this error.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::AuthExpired | Self::AuthRejected)
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RequestFailure { status, .. } => *status,
            Self::AuthRejected => Some(401),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_classification() {
        assert!(ApiError::AuthExpired.is_auth());
        assert!(ApiError::AuthRejected.is_auth());
        assert!(!ApiError::failure("x").is_auth());
        assert!(!ApiError::Transport(TransportError::Network("down".into())).is_auth());
    }

    #[test]
    fn test_display_uses_message() {
        let e = ApiError::http_status(500, "Request failed with status: 500");
        assert_eq!(e.to_string(), "Request failed with status: 500");
        assert_eq!(e.status(), Some(500));

        let e: ApiError = TransportError::Network("connection refused".into()).into();
        assert_eq!(e.to_string(), "Network error: connection refused");
    }
}
