//! Client error types.
//!
//! HTTP and transport failures are translated into a closed set of variants
//! so callers can branch on the cause without inspecting status codes.

use thiserror::Error;

/// Client error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid or missing credentials (HTTP 401).
    #[error("Authentication failed: {message}")]
    Authentication {
        /// HTTP status code.
        status: u16,
        /// Status line and response body.
        message: String,
    },

    /// Target resource does not exist (HTTP 404).
    #[error("Not found: {message}")]
    NotFound {
        /// HTTP status code.
        status: u16,
        /// Status line and response body.
        message: String,
    },

    /// Platform-side quota exceeded (HTTP 429).
    #[error("Rate limited: {message}")]
    RateLimited {
        /// HTTP status code.
        status: u16,
        /// Status line and response body.
        message: String,
    },

    /// Platform-side failure (HTTP 5xx).
    #[error("Server error: {message}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Status line and response body.
        message: String,
    },

    /// Any other non-2xx response.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Status line and response body.
        message: String,
    },

    /// No status was received: connect failure, timeout, or broken connection.
    #[error("Request error: {0}")]
    Transport(#[source] reqwest::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing failed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Invalid or missing configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Request arguments were rejected before anything was sent.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The gateway was shut down and can no longer dispatch requests.
    #[error("Gateway has been shut down")]
    Shutdown,
}

impl Error {
    /// Map a non-2xx status and its response body to a taxonomy error.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = format!("HTTP error {}: {}", status, body);
        match status {
            401 => Error::Authentication { status, message },
            404 => Error::NotFound { status, message },
            429 => Error::RateLimited { status, message },
            500..=599 => Error::Server { status, message },
            _ => Error::Api { status, message },
        }
    }

    /// HTTP status code, if the failure came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Authentication { status, .. }
            | Error::NotFound { status, .. }
            | Error::RateLimited { status, .. }
            | Error::Server { status, .. }
            | Error::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the gateway's retry policy treats this failure as transient.
    ///
    /// Only transport failures and 5xx responses qualify. 429 is deliberately
    /// left to the caller.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Transport(_) | Error::Server { .. })
    }

    /// Check if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }

    /// Check if this is an authentication error.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Error::Authentication { .. })
    }

    /// Check if this is a rate limit error.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Error::RateLimited { .. })
    }

    /// Check if this is a server error.
    pub fn is_server_error(&self) -> bool {
        matches!(self, Error::Server { .. })
    }

    /// Check if this is a transport error.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_))
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            Error::InvalidRequest(err.to_string())
        } else {
            Error::Transport(err)
        }
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert!(matches!(
            Error::from_status(401, "bad key"),
            Error::Authentication { status: 401, .. }
        ));
        assert!(matches!(
            Error::from_status(404, ""),
            Error::NotFound { status: 404, .. }
        ));
        assert!(matches!(
            Error::from_status(429, ""),
            Error::RateLimited { status: 429, .. }
        ));
        assert!(matches!(
            Error::from_status(500, ""),
            Error::Server { status: 500, .. }
        ));
        assert!(matches!(
            Error::from_status(599, ""),
            Error::Server { status: 599, .. }
        ));
        assert!(matches!(
            Error::from_status(400, ""),
            Error::Api { status: 400, .. }
        ));
        assert!(matches!(
            Error::from_status(403, ""),
            Error::Api { status: 403, .. }
        ));
        assert!(matches!(
            Error::from_status(600, ""),
            Error::Api { status: 600, .. }
        ));
    }

    #[test]
    fn test_message_combines_status_and_body() {
        let err = Error::from_status(404, "{\"error\":\"Agent not found\"}");
        assert_eq!(
            err.to_string(),
            "Not found: HTTP error 404: {\"error\":\"Agent not found\"}"
        );
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn test_is_retryable() {
        assert!(Error::from_status(500, "").is_retryable());
        assert!(Error::from_status(503, "").is_retryable());
        assert!(!Error::from_status(401, "").is_retryable());
        assert!(!Error::from_status(404, "").is_retryable());
        assert!(!Error::from_status(429, "").is_retryable());
        assert!(!Error::from_status(422, "").is_retryable());
        assert!(!Error::Config("missing".to_string()).is_retryable());
        assert!(!Error::Shutdown.is_retryable());

        let json = serde_json::from_str::<u32>("nope").unwrap_err();
        assert!(!Error::from(json).is_retryable());
    }

    #[test]
    fn test_local_errors_have_no_status() {
        assert_eq!(Error::Shutdown.status(), None);
        assert_eq!(Error::InvalidRequest("x".to_string()).status(), None);
    }

    #[test]
    fn test_predicates() {
        assert!(Error::from_status(401, "").is_auth_error());
        assert!(Error::from_status(404, "").is_not_found());
        assert!(Error::from_status(429, "").is_rate_limited());
        assert!(Error::from_status(502, "").is_server_error());
        assert!(!Error::from_status(400, "").is_server_error());
    }
}
