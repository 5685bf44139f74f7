//! Configuration module for environment variable parsing.
//!
//! All configuration is read once at startup. The three required values are
//! fatal when missing or empty: the process must not start without them.

use std::env;

use anyhow::{ensure, Context, Result};

/// Application configuration loaded from environment variables.
///
/// Immutable after startup. `webhook_secret` must never be logged.
#[derive(Clone)]
pub struct Config {
    /// Telegram Bot API token (from @BotFather)
    pub bot_token: String,

    /// Destination chat, e.g. "@mychannel" or a numeric -100... id
    pub chat_id: String,

    /// Shared secret that incoming payloads must carry in their "secret" field
    pub webhook_secret: String,

    /// Port for the web server to listen on
    pub port: u16,

    /// Timeout in milliseconds for the outbound Telegram call
    pub relay_timeout_ms: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Fails if any required variable is unset or empty.
    pub fn from_env() -> Result<Self> {
        Ok(Config {
            bot_token: required("TELEGRAM_BOT_TOKEN")?,

            chat_id: required("TELEGRAM_CHAT_ID")?,

            webhook_secret: required("WEBHOOK_SECRET")?,

            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8000),

            relay_timeout_ms: env::var("RELAY_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10_000),
        })
    }
}

/// Read an environment variable that must be present and non-empty.
fn required(name: &str) -> Result<String> {
    let value = env::var(name).with_context(|| format!("Missing {}", name))?;
    ensure!(!value.trim().is_empty(), "Missing {}", name);
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_present() {
        env::set_var("TEST_REQUIRED_PRESENT", "value");
        assert_eq!(required("TEST_REQUIRED_PRESENT").unwrap(), "value");
        env::remove_var("TEST_REQUIRED_PRESENT");
    }

    #[test]
    fn test_required_missing() {
        assert!(required("TEST_REQUIRED_NONEXISTENT").is_err());
    }

    #[test]
    fn test_required_empty() {
        env::set_var("TEST_REQUIRED_EMPTY", "   ");
        assert!(required("TEST_REQUIRED_EMPTY").is_err());
        env::remove_var("TEST_REQUIRED_EMPTY");
    }
}
