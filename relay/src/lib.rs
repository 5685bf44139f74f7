//! Signal Relay - forwards TradingView-style JSON alerts to a Telegram channel.
//!
//! A single thin web server:
//! - Receives JSON alerts on `/webhook`
//! - Authenticates them with a shared secret carried in the payload
//! - Formats a human-readable HTML message
//! - Relays it to one fixed Telegram chat via the Bot API
//!
//! ## Architecture
//!
//! ```text
//! Webhook → Validator → Formatter → Telegram sendMessage → HTTP response
//! ```
//!
//! Nothing is persisted; every request is independent and the relay result is
//! reported synchronously to the caller.

pub mod config;
pub mod format;
pub mod telegram;
pub mod web;

// Re-export commonly used types
pub use config::Config;
pub use format::format_signal;
pub use telegram::{SendError, Telegram};
pub use web::AppState;
