//! Webhook endpoint handlers.
//!
//! Validation is a pure function over the raw body so it can be tested
//! without an HTTP stack. The secret is the entire trust boundary; its value
//! is never logged, only the rejection reason.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{error, info, warn};

use crate::config::Config;
use crate::format::format_signal;
use crate::telegram::Telegram;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub telegram: Telegram,
}

impl AppState {
    pub fn new(config: Config, telegram: Telegram) -> Self {
        Self {
            config: Arc::new(config),
            telegram,
        }
    }
}

// =============================================================================
// Health Check
// =============================================================================

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub ok: bool,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { ok: true })
}

// =============================================================================
// Webhook
// =============================================================================

/// Why a webhook body was rejected before the relay was invoked.
#[derive(Debug, PartialEq, Eq)]
pub enum Rejection {
    /// Body did not parse as a JSON object.
    NotJson,
    /// Body parsed but the object carried no fields.
    EmptyPayload,
    /// The `secret` field was missing or did not match.
    BadSecret,
}

impl Rejection {
    pub fn status(&self) -> StatusCode {
        match self {
            Rejection::NotJson | Rejection::EmptyPayload => StatusCode::BAD_REQUEST,
            Rejection::BadSecret => StatusCode::UNAUTHORIZED,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Rejection::NotJson => "Expecting JSON",
            Rejection::EmptyPayload => "Empty payload",
            Rejection::BadSecret => "Bad secret",
        }
    }
}

/// Parse and authenticate a raw webhook body.
///
/// The `secret` field is coerced to its string form before comparison since
/// alert sources sometimes send it as a number.
pub fn validate_payload(body: &str, secret: &str) -> Result<Map<String, Value>, Rejection> {
    let value: Value = serde_json::from_str(body).map_err(|_| Rejection::NotJson)?;

    let payload = match value {
        Value::Object(map) => map,
        _ => return Err(Rejection::NotJson),
    };

    if payload.is_empty() {
        return Err(Rejection::EmptyPayload);
    }

    let provided = match payload.get("secret") {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    };

    if provided != secret {
        return Err(Rejection::BadSecret);
    }

    Ok(payload)
}

/// Webhook response.
#[derive(Serialize)]
pub struct WebhookResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telegram: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
}

impl WebhookResponse {
    fn relayed(telegram: Value) -> Self {
        Self {
            ok: true,
            telegram: Some(telegram),
            error: None,
        }
    }

    fn failed(error: &'static str) -> Self {
        Self {
            ok: false,
            telegram: None,
            error: Some(error),
        }
    }
}

/// Webhook endpoint.
///
/// Validates the body, formats the alert, and relays it synchronously. The
/// Telegram API response is echoed to the caller on success; relay failures
/// surface as a generic 500 with the detail kept in the server log.
pub async fn webhook(State(state): State<AppState>, body: String) -> impl IntoResponse {
    let payload = match validate_payload(&body, &state.config.webhook_secret) {
        Ok(payload) => payload,
        Err(rejection) => {
            warn!(reason = rejection.description(), "webhook_rejected");
            return (
                rejection.status(),
                Json(WebhookResponse::failed(rejection.description())),
            );
        }
    };

    info!(field_count = payload.len(), "webhook_accepted");

    let text = format_signal(&payload);

    match state.telegram.send_message(&text).await {
        Ok(response) => (StatusCode::OK, Json(WebhookResponse::relayed(response))),
        Err(e) => {
            error!(error = %e, "telegram_send_failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(WebhookResponse::failed("Telegram send failed")),
            )
        }
    }
}
