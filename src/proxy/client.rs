use anyhow::Result;
use serde_json::Value;
use tracing::{debug, warn};

use super::errors::{ProxyError, ProxyErrorKind};
use super::types::CompletionRequest;
use crate::transcript::Message;

/// Display text used when the response matches no known shape.
const NO_RESPONSE_PLACEHOLDER: &str = "(No response)";

/// HTTP client for the completion endpoint.
pub struct ProxyClient {
    endpoint: String,
    http: reqwest::Client,
}

impl ProxyClient {
    /// Creates a client for the given endpoint URL.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            http: reqwest::Client::new(),
        }
    }

    /// Sends the full transcript and returns the reply text.
    ///
    /// One POST, one awaited response. No retry, no backoff, no
    /// application-level timeout.
    pub async fn send(&self, messages: &[Message]) -> Result<String> {
        let request = CompletionRequest { messages };

        debug!(
            endpoint = %self.endpoint,
            messages = messages.len(),
            "sending completion request"
        );

        let response = self
            .http
            .post(&self.endpoint)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(Self::classify_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(ProxyError::http_status(status.as_u16(), &error_body).into());
        }

        let body = response.text().await.map_err(Self::classify_reqwest_error)?;
        let json: Value = serde_json::from_str(&body)
            .map_err(|e| ProxyError::parse(format!("Invalid JSON response: {}", e)))?;

        Ok(extract_reply(&json))
    }

    /// Classifies a reqwest error into a ProxyError.
    fn classify_reqwest_error(e: reqwest::Error) -> ProxyError {
        if e.is_timeout() {
            ProxyError::timeout(format!("Request timed out: {}", e))
        } else if e.is_connect() {
            ProxyError::timeout(format!("Connection failed: {}", e))
        } else if e.is_request() {
            ProxyError::new(ProxyErrorKind::HttpStatus, format!("Request error: {}", e))
        } else {
            ProxyError::new(ProxyErrorKind::HttpStatus, format!("Network error: {}", e))
        }
    }
}

/// Picks the display text out of a completion response.
///
/// Prefers `choices[0].message.content`, falls back to a top-level `answer`
/// string, and degrades to a fixed placeholder when neither is present.
fn extract_reply(json: &Value) -> String {
    if let Some(content) = json
        .get("choices")
        .and_then(|choices| choices.get(0))
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(|content| content.as_str())
    {
        return content.to_string();
    }

    if let Some(answer) = json.get("answer").and_then(|v| v.as_str()) {
        return answer.to_string();
    }

    warn!("completion response matched no known shape, using placeholder");
    NO_RESPONSE_PLACEHOLDER.to_string()
}
