//! Telegram Bot API client for outbound message delivery.
//!
//! One operation is used: `sendMessage` with HTML parse mode and link
//! previews disabled. The call is bounded by the configured timeout and is
//! never retried; failure is reported back to the webhook caller.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{error, info};

const TELEGRAM_API_BASE: &str = "https://api.telegram.org/bot";

/// Why an outbound delivery failed.
#[derive(Debug, Error)]
pub enum SendError {
    /// Transport-level failure, including the timeout firing.
    #[error("telegram request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("telegram api returned status {status}")]
    Api { status: StatusCode, body: String },
}

/// Handle to the fixed destination chat.
///
/// Cheap to clone; the inner reqwest client is reference-counted.
#[derive(Clone)]
pub struct Telegram {
    client: Client,
    base_url: String,
    chat_id: String,
    timeout: Duration,
}

impl Telegram {
    /// Create a client for the given bot token and destination chat.
    pub fn new(token: &str, chat_id: String, timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            base_url: format!("{}{}", TELEGRAM_API_BASE, token),
            chat_id,
            timeout,
        }
    }

    /// Send `text` to the configured chat using HTML parse mode.
    ///
    /// Returns the parsed API response on success. On a non-success status
    /// the response body is logged (truncated) and carried in the error.
    pub async fn send_message(&self, text: &str) -> Result<Value, SendError> {
        let url = format!("{}/sendMessage", self.base_url);
        let body = json!({
            "chat_id": self.chat_id,
            "text": text,
            "parse_mode": "HTML",
            "disable_web_page_preview": true,
        });

        let resp = self
            .client
            .post(&url)
            .json(&body)
            .timeout(self.timeout)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            error!(
                status_code = status.as_u16(),
                response = truncate(&body, 300),
                "telegram_api_error"
            );
            return Err(SendError::Api { status, body });
        }

        let parsed: Value = resp.json().await?;
        info!(message_length = text.len(), "telegram_message_sent");

        Ok(parsed)
    }
}

/// Truncate a string to at most `max` bytes on a char boundary.
fn truncate(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_string_unchanged() {
        assert_eq!(truncate("ok", 300), "ok");
    }

    #[test]
    fn test_truncate_long_string() {
        let long = "a".repeat(500);
        assert_eq!(truncate(&long, 300).len(), 300);
    }

    #[test]
    fn test_truncate_respects_char_boundary() {
        // 🟢 is 4 bytes; cutting at 5 must back off to the boundary
        let s = "x🟢🟢";
        assert_eq!(truncate(s, 2), "x");
        assert_eq!(truncate(s, 5), "x🟢");
    }

    #[test]
    fn test_send_url_shape() {
        let tg = Telegram::new("123:abc", "@chan".to_string(), Duration::from_secs(10));
        assert_eq!(tg.base_url, "https://api.telegram.org/bot123:abc");
        assert_eq!(tg.chat_id, "@chan");
    }
}
