//! Web server module: the health probe and the webhook endpoint.
//!
//! The webhook handler does the whole job inline: validate the payload,
//! format the message, relay it to Telegram, and report the outcome as the
//! HTTP response. No queueing, no background work.

pub mod handlers;

pub use handlers::{health, webhook, AppState, HealthResponse, Rejection, WebhookResponse};
