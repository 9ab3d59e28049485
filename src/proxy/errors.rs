use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Categories of proxy errors for consistent error handling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProxyErrorKind {
    /// HTTP status error (4xx, 5xx)
    HttpStatus,
    /// Connection timeout or request timeout
    Timeout,
    /// Failed to parse the response body
    Parse,
}

impl fmt::Display for ProxyErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProxyErrorKind::HttpStatus => write!(f, "http_status"),
            ProxyErrorKind::Timeout => write!(f, "timeout"),
            ProxyErrorKind::Parse => write!(f, "parse"),
        }
    }
}

/// Structured error from the completion endpoint with kind and details.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxyError {
    /// Error category
    pub kind: ProxyErrorKind,
    /// One-line summary suitable for display
    pub message: String,
    /// Optional additional details (e.g., raw error body)
    pub details: Option<String>,
}

impl ProxyError {
    /// Creates a new proxy error.
    pub fn new(kind: ProxyErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            details: None,
        }
    }

    /// Creates an HTTP status error.
    pub fn http_status(status: u16, body: &str) -> Self {
        let message = format!("HTTP {}", status);
        let details = if body.is_empty() {
            None
        } else {
            // Try to extract a cleaner error message from JSON
            if let Ok(json) = serde_json::from_str::<Value>(body)
                && let Some(error_obj) = json.get("error")
                && let Some(msg) = error_obj.get("message").and_then(|v| v.as_str())
            {
                return Self {
                    kind: ProxyErrorKind::HttpStatus,
                    message: format!("HTTP {}: {}", status, msg),
                    details: Some(body.to_string()),
                };
            }
            Some(body.to_string())
        };
        Self {
            kind: ProxyErrorKind::HttpStatus,
            message,
            details,
        }
    }

    /// Creates a timeout error.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ProxyErrorKind::Timeout, message)
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::new(ProxyErrorKind::Parse, message)
    }
}

impl fmt::Display for ProxyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ProxyError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_extracts_provider_message() {
        let body = r#"{"error":{"type":"overloaded","message":"Try again later"}}"#;
        let err = ProxyError::http_status(503, body);

        assert_eq!(err.kind, ProxyErrorKind::HttpStatus);
        assert_eq!(err.message, "HTTP 503: Try again later");
        assert_eq!(err.details.as_deref(), Some(body));
    }

    #[test]
    fn test_http_status_keeps_raw_body_when_not_json() {
        let err = ProxyError::http_status(500, "Internal Server Error");

        assert_eq!(err.message, "HTTP 500");
        assert_eq!(err.details.as_deref(), Some("Internal Server Error"));
    }

    #[test]
    fn test_http_status_empty_body_has_no_details() {
        let err = ProxyError::http_status(502, "");

        assert_eq!(err.message, "HTTP 502");
        assert!(err.details.is_none());
    }

    #[test]
    fn test_display_shows_message_only() {
        let err = ProxyError::timeout("Request timed out: deadline elapsed");
        assert_eq!(err.to_string(), "Request timed out: deadline elapsed");
    }
}
